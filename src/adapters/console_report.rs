//! Plain-text tabular report.

use std::io::Write;

use crate::domain::error::FolioError;
use crate::domain::normalizer::Extraction;
use crate::domain::settings::{DEFAULT_DECIMALS, DEFAULT_REPORT_TITLE, Settings};
use crate::domain::valuation::{PriceSource, ValuationReport};
use crate::ports::report_port::ReportPort;

const RULE_WIDTH: usize = 96;

pub struct ConsoleReportAdapter {
    title: String,
    decimals: usize,
    show_diagnostics: bool,
}

impl Default for ConsoleReportAdapter {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            decimals: DEFAULT_DECIMALS,
            show_diagnostics: true,
        }
    }
}

impl ConsoleReportAdapter {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            title: settings.report_title.clone(),
            decimals: settings.decimals,
            show_diagnostics: settings.show_diagnostics,
        }
    }

    fn write_table(&self, report: &ValuationReport, out: &mut dyn Write) -> std::io::Result<()> {
        let d = self.decimals;
        writeln!(out, "{}", self.title)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            out,
            "{:<8} {:>10} {:>12} {:>12} {:>12} {:>12} {:>10} {:>10}",
            "SYMBOL", "QTY", "BUY PRICE", "COST", "VALUE", "GAIN", "RETURN %", "WEIGHT %"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for m in &report.metrics {
            let marker = match m.price_source {
                PriceSource::Market => "",
                PriceSource::PurchaseFallback => " *",
            };
            writeln!(
                out,
                "{:<8} {:>10} {:>12.d$} {:>12.d$} {:>12.d$} {:>12.d$} {:>10.d$} {:>10.d$}{}",
                m.symbol,
                m.quantity,
                m.purchase_price,
                m.acquisition_value,
                m.current_value,
                m.absolute_gain,
                m.return_pct,
                m.weight_pct,
                marker,
            )?;
        }

        let agg = &report.aggregate;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(out, "Total value:      {:.d$}", agg.total_current_value)?;
        writeln!(out, "Total cost:       {:.d$}", agg.total_acquisition_value)?;
        writeln!(out, "Total gain:       {:.d$}", agg.total_gain)?;
        writeln!(out, "Positions:        {}", agg.position_count)?;
        if agg.fallback_count > 0 {
            writeln!(
                out,
                "* {} position(s) valued at purchase price (no current price)",
                agg.fallback_count
            )?;
        }
        Ok(())
    }

    fn write_diagnostics(&self, extraction: &Extraction, out: &mut dyn Write) -> std::io::Result<()> {
        if extraction.rejections.is_empty() && extraction.substitutions.is_empty() {
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "Diagnostics:")?;
        for r in &extraction.rejections {
            writeln!(out, "  skipped {}: {}", r.symbol, r.reason)?;
        }
        for s in &extraction.substitutions {
            writeln!(
                out,
                "  {}: {} {} replaced by {}",
                s.symbol, s.field, s.original, s.replacement
            )?;
        }
        Ok(())
    }
}

impl ReportPort for ConsoleReportAdapter {
    fn write(&self, report: &ValuationReport, out: &mut dyn Write) -> Result<(), FolioError> {
        self.write_table(report, out)?;
        Ok(())
    }

    fn write_with_diagnostics(
        &self,
        report: &ValuationReport,
        extraction: &Extraction,
        out: &mut dyn Write,
    ) -> Result<(), FolioError> {
        self.write_table(report, out)?;
        if self.show_diagnostics {
            self.write_diagnostics(extraction, out)?;
        }
        Ok(())
    }
}

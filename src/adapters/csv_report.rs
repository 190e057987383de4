//! CSV export of per-position metrics.

use std::io::Write;

use serde::Serialize;

use crate::domain::error::FolioError;
use crate::domain::valuation::{PositionMetrics, PriceSource, ValuationReport};
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct MetricsRow<'a> {
    symbol: &'a str,
    quantity: f64,
    purchase_price: f64,
    current_price: f64,
    price_source: &'static str,
    acquisition_value: f64,
    current_value: f64,
    absolute_gain: f64,
    return_pct: f64,
    weight_pct: f64,
}

impl<'a> From<&'a PositionMetrics> for MetricsRow<'a> {
    fn from(m: &'a PositionMetrics) -> Self {
        MetricsRow {
            symbol: &m.symbol,
            quantity: m.quantity,
            purchase_price: m.purchase_price,
            current_price: m.current_price,
            price_source: match m.price_source {
                PriceSource::Market => "market",
                PriceSource::PurchaseFallback => "purchase_fallback",
            },
            acquisition_value: m.acquisition_value,
            current_value: m.current_value,
            absolute_gain: m.absolute_gain,
            return_pct: m.return_pct,
            weight_pct: m.weight_pct,
        }
    }
}

/// Writes one CSV row per position, raw numbers unrounded.
#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &ValuationReport, out: &mut dyn Write) -> Result<(), FolioError> {
        let mut wtr = csv::Writer::from_writer(out);
        for m in &report.metrics {
            wtr.serialize(MetricsRow::from(m))
                .map_err(|e| std::io::Error::other(e.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

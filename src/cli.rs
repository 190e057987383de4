//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;

use crate::adapters::console_report::ConsoleReportAdapter;
use crate::adapters::csv_report::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_data_adapter::FileDataAdapter;
use crate::domain::error::FolioError;
use crate::domain::normalizer::{Extraction, Normalizer, Strictness};
use crate::domain::portfolio::Portfolio;
use crate::domain::settings::Settings;
use crate::domain::valuation::{acquisition_value, ValuationReport};
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "folioscan", about = "Portfolio normalizer and valuation report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Portfolio file (.json or .csv)
    #[arg(short, long)]
    pub portfolio: PathBuf,
    /// Current prices (.csv)
    #[arg(long)]
    pub prices: Option<PathBuf>,
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Overrides [normalizer] strictness
    #[arg(long)]
    pub strictness: Option<Strictness>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Table,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Value every position and print the full report
    Report {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },
    /// Print acquisition values, gains and returns as lists
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List the normalized positions with their cost
    Positions {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the structure of a portfolio file
    Inspect {
        #[arg(short, long)]
        portfolio: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report { source, format } => run_report(&source, format),
        Command::Summary { source } => run_summary(&source),
        Command::Positions { source } => run_positions(&source),
        Command::Inspect { portfolio } => run_inspect(&portfolio),
    }
}

/// Loads settings from the optional config file, then applies CLI overrides.
pub fn load_settings(
    config_path: Option<&PathBuf>,
    strictness: Option<Strictness>,
) -> Result<Settings, FolioError> {
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path).map_err(|e| FolioError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?
        }
        None => FileConfigAdapter::empty(),
    };
    for key in adapter.unknown_keys() {
        warn!(key = %key, "ignoring unknown config key");
    }
    let mut settings = Settings::from_config(&adapter)?;
    if let Some(s) = strictness {
        settings.strictness = s;
    }
    Ok(settings)
}

/// Loads both sources, extracts positions and values them.
///
/// Unreadable sources degrade to empty inputs independently of each other;
/// only a hard-fail normalizer can make this return an error.
pub fn build_report(
    data_port: &dyn DataPort,
    portfolio_path: &Path,
    prices_path: Option<&Path>,
    settings: &Settings,
) -> Result<(Extraction, ValuationReport), FolioError> {
    let tree = data_port.tree_or_empty(portfolio_path);
    let prices = prices_path
        .map(|p| data_port.prices_or_empty(p))
        .unwrap_or_default();

    let extraction = Normalizer::new(settings.strictness).extract(&tree)?;
    let report = ValuationReport::build(&extraction.positions, &prices);
    Ok((extraction, report))
}

fn prepare(source: &SourceArgs) -> Result<(Settings, Extraction, ValuationReport), FolioError> {
    let settings = load_settings(source.config.as_ref(), source.strictness)?;
    let data_port = FileDataAdapter::from_settings(&settings);
    eprintln!("Loading portfolio from {}", source.portfolio.display());
    let (extraction, report) = build_report(
        &data_port,
        &source.portfolio,
        source.prices.as_deref(),
        &settings,
    )?;
    eprintln!(
        "Found {} position(s), skipped {}",
        extraction.positions.len(),
        extraction.rejections.len()
    );
    Ok((settings, extraction, report))
}

fn finish(result: Result<(), FolioError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_report(source: &SourceArgs, format: ReportFormat) -> ExitCode {
    finish(prepare(source).and_then(|(settings, extraction, report)| {
        let adapter: Box<dyn ReportPort> = match format {
            ReportFormat::Table => Box::new(ConsoleReportAdapter::from_settings(&settings)),
            ReportFormat::Csv => Box::new(CsvReportAdapter),
        };
        adapter.write_with_diagnostics(&report, &extraction, &mut io::stdout().lock())
    }))
}

fn run_summary(source: &SourceArgs) -> ExitCode {
    finish(prepare(source).and_then(|(settings, _, report)| {
        write_summary(&report, settings.decimals, &mut io::stdout().lock())
    }))
}

fn run_positions(source: &SourceArgs) -> ExitCode {
    finish(prepare(source).and_then(|(settings, extraction, _)| {
        let portfolio = extraction.into_portfolio();
        write_positions(&portfolio, settings.decimals, &mut io::stdout().lock())
    }))
}

fn run_inspect(portfolio: &Path) -> ExitCode {
    let data_port = FileDataAdapter::default();
    finish(data_port.load_tree(portfolio).and_then(|tree| {
        let mut out = io::stdout().lock();
        for line in tree.outline() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }))
}

fn format_list(values: &[f64], decimals: usize) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v:.decimals$}")).collect();
    format!("[{}]", items.join(", "))
}

pub fn write_summary(
    report: &ValuationReport,
    decimals: usize,
    out: &mut dyn Write,
) -> Result<(), FolioError> {
    writeln!(
        out,
        "Acquisition values: {}",
        format_list(&report.acquisition_values(), decimals)
    )?;
    writeln!(out, "Gains:              {}", format_list(&report.gains(), decimals))?;
    writeln!(out, "Returns %:          {}", format_list(&report.returns(), decimals))?;
    Ok(())
}

pub fn write_positions(
    portfolio: &Portfolio,
    decimals: usize,
    out: &mut dyn Write,
) -> Result<(), FolioError> {
    writeln!(
        out,
        "{:<8} {:>10} {:>12} {:>14} {:<12}",
        "SYMBOL", "QTY", "PRICE", "COST", "DATE"
    )?;
    writeln!(out, "{}", "-".repeat(60))?;
    for p in &portfolio.positions {
        writeln!(
            out,
            "{:<8} {:>10} {:>12.decimals$} {:>14.decimals$} {:<12}",
            p.symbol(),
            p.quantity(),
            p.purchase_price(),
            acquisition_value(p),
            p.purchase_date().format("%Y-%m-%d"),
        )?;
    }
    writeln!(out, "{}", "-".repeat(60))?;
    writeln!(out, "Total cost:  {:.decimals$}", portfolio.total_cost())?;
    writeln!(out, "Positions:   {}", portfolio.position_count())?;
    Ok(())
}

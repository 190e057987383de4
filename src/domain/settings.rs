//! Run settings and their validation.
//!
//! Settings come from an optional INI file. Every key has a default, so an
//! empty config is valid.

use crate::domain::error::FolioError;
use crate::domain::normalizer::Strictness;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_SYMBOL_COLUMN: &str = "symbol";
pub const DEFAULT_PRICE_COLUMN: &str = "purchase_price";
pub const DEFAULT_REPORT_TITLE: &str = "Portfolio";
pub const DEFAULT_DECIMALS: usize = 2;
const MAX_DECIMALS: i64 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub strictness: Strictness,
    pub symbol_column: String,
    pub price_column: String,
    pub report_title: String,
    pub decimals: usize,
    pub show_diagnostics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            strictness: Strictness::default(),
            symbol_column: DEFAULT_SYMBOL_COLUMN.to_string(),
            price_column: DEFAULT_PRICE_COLUMN.to_string(),
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            decimals: DEFAULT_DECIMALS,
            show_diagnostics: true,
        }
    }
}

impl Settings {
    /// Validates `config` and builds settings from it.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, FolioError> {
        validate_settings(config)?;
        let defaults = Settings::default();
        Ok(Settings {
            strictness: match config.get_string("normalizer", "strictness") {
                Some(s) => parse_strictness(&s)?,
                None => defaults.strictness,
            },
            symbol_column: config
                .get_string("prices", "symbol_column")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.symbol_column),
            price_column: config
                .get_string("prices", "price_column")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.price_column),
            report_title: config
                .get_string("report", "title")
                .unwrap_or(defaults.report_title),
            decimals: config.get_int("report", "decimals", DEFAULT_DECIMALS as i64) as usize,
            show_diagnostics: config.get_bool("report", "show_diagnostics", true),
        })
    }
}

pub fn validate_settings(config: &dyn ConfigPort) -> Result<(), FolioError> {
    validate_strictness(config)?;
    validate_column(config, "symbol_column")?;
    validate_column(config, "price_column")?;
    validate_decimals(config)?;
    Ok(())
}

fn parse_strictness(value: &str) -> Result<Strictness, FolioError> {
    value.parse().map_err(|reason| FolioError::ConfigInvalid {
        section: "normalizer".to_string(),
        key: "strictness".to_string(),
        reason,
    })
}

fn validate_strictness(config: &dyn ConfigPort) -> Result<(), FolioError> {
    if let Some(value) = config.get_string("normalizer", "strictness") {
        parse_strictness(&value)?;
    }
    Ok(())
}

fn validate_column(config: &dyn ConfigPort, key: &str) -> Result<(), FolioError> {
    if let Some(value) = config.get_string("prices", key) {
        if value.trim().is_empty() {
            return Err(FolioError::ConfigInvalid {
                section: "prices".to_string(),
                key: key.to_string(),
                reason: format!("{key} must not be empty"),
            });
        }
    }
    Ok(())
}

fn validate_decimals(config: &dyn ConfigPort) -> Result<(), FolioError> {
    let value = config.get_int("report", "decimals", DEFAULT_DECIMALS as i64);
    if !(0..=MAX_DECIMALS).contains(&value) {
        return Err(FolioError::ConfigInvalid {
            section: "report".to_string(),
            key: "decimals".to_string(),
            reason: format!("decimals must be between 0 and {MAX_DECIMALS}"),
        });
    }
    Ok(())
}

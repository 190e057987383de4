#![allow(dead_code)]

use chrono::NaiveDate;
use folioscan::domain::error::FolioError;
use folioscan::domain::position::Position;
use folioscan::domain::tree::Node;
use folioscan::domain::valuation::PriceTable;
use folioscan::ports::data_port::DataPort;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct MockDataPort {
    pub trees: HashMap<PathBuf, Node>,
    pub prices: HashMap<PathBuf, PriceTable>,
    pub errors: HashMap<PathBuf, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
            prices: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_tree(mut self, path: &str, value: Value) -> Self {
        self.trees.insert(PathBuf::from(path), Node::from(value));
        self
    }

    pub fn with_prices(mut self, path: &str, prices: &[(&str, f64)]) -> Self {
        self.prices
            .insert(PathBuf::from(path), prices.iter().copied().collect());
        self
    }

    pub fn with_error(mut self, path: &str, reason: &str) -> Self {
        self.errors.insert(PathBuf::from(path), reason.to_string());
        self
    }

    fn check(&self, path: &Path) -> Result<(), FolioError> {
        match self.errors.get(path) {
            Some(reason) => Err(FolioError::SourceUnavailable {
                path: path.display().to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl DataPort for MockDataPort {
    fn load_tree(&self, path: &Path) -> Result<Node, FolioError> {
        self.check(path)?;
        self.trees
            .get(path)
            .cloned()
            .ok_or_else(|| FolioError::SourceUnavailable {
                path: path.display().to_string(),
                reason: "not found".into(),
            })
    }

    fn load_prices(&self, path: &Path) -> Result<PriceTable, FolioError> {
        self.check(path)?;
        self.prices
            .get(path)
            .cloned()
            .ok_or_else(|| FolioError::SourceUnavailable {
                path: path.display().to_string(),
                reason: "not found".into(),
            })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_position(symbol: &str, quantity: f64, price: f64) -> Position {
    Position::new(symbol, quantity, price, date(2023, 1, 15)).unwrap()
}

pub fn position_json(symbol: &str, quantity: f64, price: f64) -> Value {
    serde_json::json!({
        "symbol": symbol,
        "quantity": quantity,
        "purchase_price": price,
        "purchase_date": "2023-01-15",
    })
}

/// The two-position sample portfolio, nested the way an account export
/// would nest it.
pub fn sample_portfolio_json() -> Value {
    serde_json::json!({
        "owner": "sample",
        "accounts": [
            {"name": "brokerage", "holdings": {"positions": [
                position_json("AAPL", 10.0, 150.0)
            ]}},
            {"name": "ira", "holdings": {"positions": [
                position_json("GOOGL", 2.0, 2500.0)
            ]}}
        ]
    })
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

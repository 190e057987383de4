//! Valuation of normalized positions against a price table.
//!
//! All metric functions are pure. [`value_positions`] makes two passes: one
//! to resolve prices and current values, one to derive weights from the
//! portfolio total.

use std::collections::HashMap;

use tracing::warn;

use super::position::Position;

/// Current market prices keyed by symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a price for `symbol`. Keys are trimmed; a later entry for the
    /// same symbol replaces an earlier one.
    pub fn insert(&mut self, symbol: &str, price: f64) {
        self.prices.insert(symbol.trim().to_string(), price);
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = PriceTable::new();
        for (symbol, price) in iter {
            table.insert(symbol.as_ref(), price);
        }
        table
    }
}

/// Where a position's current price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Market,
    /// No market price was available; the purchase price stands in.
    PurchaseFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionMetrics {
    pub symbol: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub price_source: PriceSource,
    pub acquisition_value: f64,
    pub current_value: f64,
    pub absolute_gain: f64,
    pub return_pct: f64,
    pub weight_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioAggregate {
    pub total_current_value: f64,
    pub total_acquisition_value: f64,
    pub total_gain: f64,
    pub position_count: usize,
    pub fallback_count: usize,
}

fn has_cost_basis(position: &Position) -> bool {
    position.purchase_price() > 0.0 && position.quantity() > 0.0
}

pub fn acquisition_value(position: &Position) -> f64 {
    position.quantity() * position.purchase_price()
}

pub fn current_value(position: &Position, current_price: f64) -> f64 {
    position.quantity() * current_price
}

/// Zero when the position has no meaningful cost basis.
pub fn absolute_gain(position: &Position, current_price: f64) -> f64 {
    if !has_cost_basis(position) {
        return 0.0;
    }
    (current_price - position.purchase_price()) * position.quantity()
}

/// Return in percent. Zero when the position has no meaningful cost basis.
pub fn percentage_return(position: &Position, current_price: f64) -> f64 {
    if !has_cost_basis(position) {
        return 0.0;
    }
    (current_price - position.purchase_price()) / position.purchase_price() * 100.0
}

pub fn portfolio_weight(current_value: f64, total_current_value: f64) -> f64 {
    if total_current_value > 0.0 {
        current_value / total_current_value * 100.0
    } else {
        0.0
    }
}

/// Resolves the current price for `position`, falling back to its purchase
/// price when the table has no entry.
pub fn resolve_price(position: &Position, prices: &PriceTable) -> (f64, PriceSource) {
    match prices.get(position.symbol()) {
        Some(price) => (price, PriceSource::Market),
        None => (position.purchase_price(), PriceSource::PurchaseFallback),
    }
}

pub fn value_positions(positions: &[Position], prices: &PriceTable) -> Vec<PositionMetrics> {
    let mut metrics: Vec<PositionMetrics> = positions
        .iter()
        .map(|position| {
            let (current_price, price_source) = resolve_price(position, prices);
            if price_source == PriceSource::PurchaseFallback {
                warn!(
                    symbol = position.symbol(),
                    purchase_price = position.purchase_price(),
                    "no current price, using purchase price"
                );
            }
            PositionMetrics {
                symbol: position.symbol().to_string(),
                quantity: position.quantity(),
                purchase_price: position.purchase_price(),
                current_price,
                price_source,
                acquisition_value: acquisition_value(position),
                current_value: current_value(position, current_price),
                absolute_gain: absolute_gain(position, current_price),
                return_pct: percentage_return(position, current_price),
                weight_pct: 0.0,
            }
        })
        .collect();

    let total: f64 = metrics.iter().map(|m| m.current_value).sum();
    for m in &mut metrics {
        m.weight_pct = portfolio_weight(m.current_value, total);
    }
    metrics
}

pub fn aggregate(metrics: &[PositionMetrics]) -> PortfolioAggregate {
    PortfolioAggregate {
        total_current_value: metrics.iter().map(|m| m.current_value).sum(),
        total_acquisition_value: metrics.iter().map(|m| m.acquisition_value).sum(),
        total_gain: metrics.iter().map(|m| m.absolute_gain).sum(),
        position_count: metrics.len(),
        fallback_count: metrics
            .iter()
            .filter(|m| m.price_source == PriceSource::PurchaseFallback)
            .count(),
    }
}

/// Per-position metrics together with their aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationReport {
    pub metrics: Vec<PositionMetrics>,
    pub aggregate: PortfolioAggregate,
}

impl ValuationReport {
    pub fn build(positions: &[Position], prices: &PriceTable) -> Self {
        let metrics = value_positions(positions, prices);
        let aggregate = aggregate(&metrics);
        ValuationReport { metrics, aggregate }
    }

    pub fn acquisition_values(&self) -> Vec<f64> {
        self.metrics.iter().map(|m| m.acquisition_value).collect()
    }

    pub fn gains(&self) -> Vec<f64> {
        self.metrics.iter().map(|m| m.absolute_gain).collect()
    }

    pub fn returns(&self) -> Vec<f64> {
        self.metrics.iter().map(|m| m.return_pct).collect()
    }

    pub fn fallback_symbols(&self) -> impl Iterator<Item = &str> {
        self.metrics
            .iter()
            .filter(|m| m.price_source == PriceSource::PurchaseFallback)
            .map(|m| m.symbol.as_str())
    }
}

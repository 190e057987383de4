//! Portfolio snapshot.

use super::position::{Position, Transaction};
use super::valuation::acquisition_value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Portfolio {
    pub positions: Vec<Position>,
    pub transactions: Vec<Transaction>,
}

impl Portfolio {
    pub fn new(positions: Vec<Position>) -> Self {
        Portfolio {
            positions,
            transactions: Vec::new(),
        }
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Sum of acquisition values over all positions.
    pub fn total_cost(&self) -> f64 {
        self.positions.iter().map(acquisition_value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_position(symbol: &str, quantity: f64, price: f64) -> Position {
        Position::new(
            symbol,
            quantity,
            price,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn new_portfolio_has_no_transactions() {
        let portfolio = Portfolio::new(vec![sample_position("AAPL", 10.0, 150.0)]);
        assert_eq!(portfolio.position_count(), 1);
        assert!(portfolio.transactions.is_empty());
    }

    #[test]
    fn default_is_empty() {
        let portfolio = Portfolio::default();
        assert_eq!(portfolio.position_count(), 0);
        assert_eq!(portfolio.total_cost(), 0.0);
    }

    #[test]
    fn total_cost_sums_acquisition_values() {
        let portfolio = Portfolio::new(vec![
            sample_position("AAPL", 10.0, 150.0),
            sample_position("GOOGL", 2.0, 2500.0),
        ]);
        assert!((portfolio.total_cost() - 6500.0).abs() < f64::EPSILON);
    }
}

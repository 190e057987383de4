//! Position and transaction records.

use chrono::NaiveDate;

use super::error::PositionError;

/// A validated holding. Only constructed through [`Position::new`], so every
/// instance has a non-empty symbol, a finite positive quantity and a finite
/// non-negative purchase price.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    symbol: String,
    quantity: f64,
    purchase_price: f64,
    purchase_date: NaiveDate,
}

impl Position {
    pub fn new(
        symbol: impl Into<String>,
        quantity: f64,
        purchase_price: f64,
        purchase_date: NaiveDate,
    ) -> Result<Self, PositionError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(PositionError::EmptySymbol);
        }
        // Written as negations so NaN fails validation too.
        if !(quantity > 0.0 && quantity.is_finite()) {
            return Err(PositionError::NonPositiveQuantity { quantity });
        }
        if !(purchase_price >= 0.0 && purchase_price.is_finite()) {
            return Err(PositionError::NegativePrice {
                price: purchase_price,
            });
        }
        Ok(Position {
            symbol,
            quantity,
            purchase_price,
            purchase_date,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn purchase_price(&self) -> f64 {
        self.purchase_price
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Buy,
    Sell,
}

/// Ledger entry. Part of the portfolio shape but no loader fills it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub kind: TransactionKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
    }

    #[test]
    fn new_accepts_valid_fields() {
        let pos = Position::new("AAPL", 10.0, 150.0, date()).unwrap();
        assert_eq!(pos.symbol(), "AAPL");
        assert!((pos.quantity() - 10.0).abs() < f64::EPSILON);
        assert!((pos.purchase_price() - 150.0).abs() < f64::EPSILON);
        assert_eq!(pos.purchase_date(), date());
    }

    #[test]
    fn zero_purchase_price_is_valid() {
        assert!(Position::new("AAPL", 10.0, 0.0, date()).is_ok());
    }

    #[test]
    fn rejects_non_positive_quantity() {
        assert_eq!(
            Position::new("GOOGL", -10.0, 2500.0, date()),
            Err(PositionError::NonPositiveQuantity { quantity: -10.0 })
        );
        assert!(Position::new("GOOGL", 0.0, 2500.0, date()).is_err());
    }

    #[test]
    fn rejects_negative_price() {
        assert_eq!(
            Position::new("MSFT", 1.0, -0.5, date()),
            Err(PositionError::NegativePrice { price: -0.5 })
        );
    }

    #[test]
    fn rejects_nan_fields() {
        assert!(Position::new("MSFT", f64::NAN, 1.0, date()).is_err());
        assert!(Position::new("MSFT", 1.0, f64::NAN, date()).is_err());
    }

    #[test]
    fn rejects_infinite_fields() {
        assert_eq!(
            Position::new("MSFT", f64::INFINITY, 1.0, date()),
            Err(PositionError::NonPositiveQuantity {
                quantity: f64::INFINITY
            })
        );
        assert!(Position::new("MSFT", 1.0, f64::INFINITY, date()).is_err());
    }

    #[test]
    fn rejects_blank_symbol() {
        assert_eq!(
            Position::new("  ", 1.0, 1.0, date()),
            Err(PositionError::EmptySymbol)
        );
    }
}

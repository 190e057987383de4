//! CSV readers for portfolio rows and current prices.

use std::io::Read;

use tracing::warn;

use crate::domain::error::FolioError;
use crate::domain::settings::{DEFAULT_PRICE_COLUMN, DEFAULT_SYMBOL_COLUMN};
use crate::domain::tree::Node;
use crate::domain::valuation::PriceTable;

pub struct CsvAdapter {
    symbol_column: String,
    price_column: String,
}

impl Default for CsvAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL_COLUMN, DEFAULT_PRICE_COLUMN)
    }
}

impl CsvAdapter {
    pub fn new(symbol_column: &str, price_column: &str) -> Self {
        Self {
            symbol_column: symbol_column.to_string(),
            price_column: price_column.to_string(),
        }
    }

    /// Reads CSV rows into a sequence of mappings keyed by header, with every
    /// cell kept as text. `source` names the input in error messages.
    pub fn read_tree<R: Read>(&self, reader: R, source: &str) -> Result<Node, FolioError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers().map_err(|e| format_error(source, e))?.clone();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| format_error(source, e))?;
            let entries = headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.trim().to_string(), Node::text(value)))
                .collect();
            rows.push(Node::Mapping(entries));
        }
        Ok(Node::Sequence(rows))
    }

    /// Reads a price table. Rows whose price is not a non-negative number are
    /// skipped with a warning; a missing column fails the whole source.
    pub fn read_prices<R: Read>(&self, reader: R, source: &str) -> Result<PriceTable, FolioError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers().map_err(|e| format_error(source, e))?.clone();
        let symbol_idx = column_index(&headers, &self.symbol_column, source)?;
        let price_idx = column_index(&headers, &self.price_column, source)?;

        let mut table = PriceTable::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| format_error(source, e))?;
            let symbol = record.get(symbol_idx).unwrap_or("").trim();
            let raw_price = record.get(price_idx).unwrap_or("").trim();

            if symbol.is_empty() {
                warn!(source, row = line + 1, "skipping price row without symbol");
                continue;
            }
            match raw_price.parse::<f64>() {
                Ok(price) if price.is_finite() && price >= 0.0 => table.insert(symbol, price),
                _ => warn!(source, symbol, price = raw_price, "skipping invalid price"),
            }
        }
        Ok(table)
    }
}

fn column_index(headers: &csv::StringRecord, column: &str, source: &str) -> Result<usize, FolioError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| FolioError::SourceFormat {
            path: source.to_string(),
            reason: format!("missing column '{column}'"),
        })
}

fn format_error(source: &str, e: csv::Error) -> FolioError {
    FolioError::SourceFormat {
        path: source.to_string(),
        reason: format!("CSV parse error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTFOLIO_CSV: &str = "symbol,quantity,purchase_price,purchase_date\n\
        AAPL,10,150.0,2023-01-15\n\
        GOOGL,2,2500.0,2023-03-01\n";

    #[test]
    fn read_tree_builds_row_mappings() {
        let tree = CsvAdapter::default()
            .read_tree(PORTFOLIO_CSV.as_bytes(), "test")
            .unwrap();
        let Node::Sequence(rows) = &tree else {
            panic!("expected sequence");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("symbol"), Some(&Node::text("AAPL")));
        assert_eq!(rows[1].get("purchase_date"), Some(&Node::text("2023-03-01")));
    }

    #[test]
    fn read_tree_header_only_is_empty() {
        let tree = CsvAdapter::default()
            .read_tree("symbol,quantity\n".as_bytes(), "test")
            .unwrap();
        assert_eq!(tree, Node::empty());
    }

    #[test]
    fn read_tree_ragged_row_is_format_error() {
        let err = CsvAdapter::default()
            .read_tree("a,b\n1,2,3\n".as_bytes(), "bad.csv")
            .unwrap_err();
        assert!(matches!(err, FolioError::SourceFormat { path, .. } if path == "bad.csv"));
    }

    #[test]
    fn read_prices_uses_purchase_price_column_by_default() {
        let table = CsvAdapter::default()
            .read_prices(PORTFOLIO_CSV.replace("150.0", "160.0").as_bytes(), "test")
            .unwrap();
        assert_eq!(table.get("AAPL"), Some(160.0));
        assert_eq!(table.get("GOOGL"), Some(2500.0));
    }

    #[test]
    fn read_prices_trims_symbols() {
        let csv = "symbol,purchase_price\n  AAPL  ,160\n";
        let table = CsvAdapter::default().read_prices(csv.as_bytes(), "test").unwrap();
        assert_eq!(table.get("AAPL"), Some(160.0));
    }

    #[test]
    fn read_prices_custom_columns() {
        let csv = "ticker,close\nMSFT,410.5\n";
        let table = CsvAdapter::new("ticker", "close")
            .read_prices(csv.as_bytes(), "test")
            .unwrap();
        assert_eq!(table.get("MSFT"), Some(410.5));
    }

    #[test]
    fn read_prices_skips_invalid_rows() {
        let csv = "symbol,purchase_price\nAAPL,abc\nGOOGL,-1\n,5\nMSFT,300\n";
        let table = CsvAdapter::default().read_prices(csv.as_bytes(), "test").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("MSFT"), Some(300.0));
    }

    #[test]
    fn read_prices_skips_infinite_prices() {
        let csv = "symbol,purchase_price\nAAPL,inf\nGOOGL,1e400\nMSFT,300\n";
        let table = CsvAdapter::default().read_prices(csv.as_bytes(), "test").unwrap();
        assert_eq!(table.get("AAPL"), None);
        assert_eq!(table.get("GOOGL"), None);
        assert_eq!(table.get("MSFT"), Some(300.0));
    }

    #[test]
    fn read_prices_missing_column_is_error() {
        let csv = "symbol,close\nAAPL,1\n";
        let err = CsvAdapter::default().read_prices(csv.as_bytes(), "p.csv").unwrap_err();
        assert!(matches!(err, FolioError::SourceFormat { reason, .. } if reason.contains("purchase_price")));
    }
}

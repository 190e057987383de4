//! Position discovery in arbitrarily shaped portfolio trees.
//!
//! The normalizer walks a [`Node`] depth-first and treats every mapping that
//! carries all of [`REQUIRED_FIELDS`] as a position candidate. A candidate is
//! never descended into, even if it holds further mappings. Any other mapping
//! or sequence is searched recursively, so positions may sit at any depth.
//!
//! What happens to a candidate that fails conversion depends on the
//! configured [`Strictness`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::error::{FolioError, PositionError};
use super::portfolio::Portfolio;
use super::position::Position;
use super::tree::{Node, Scalar};

pub const REQUIRED_FIELDS: [&str; 4] = ["symbol", "quantity", "purchase_price", "purchase_date"];

/// Symbol used in diagnostics when a candidate has no usable symbol.
pub const UNKNOWN_SYMBOL: &str = "unknown";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How the normalizer treats candidates with bad data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Drop the candidate, record it and keep searching.
    #[default]
    Reject,
    /// Replace out-of-range values with the nearest valid one where such a
    /// value exists; otherwise behave like `Reject`.
    Substitute,
    /// Abort extraction on the first bad candidate.
    HardFail,
}

impl FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Strictness::Reject),
            "substitute" => Ok(Strictness::Substitute),
            "hard-fail" | "hard_fail" | "hardfail" => Ok(Strictness::HardFail),
            other => Err(format!(
                "unknown strictness '{other}' (expected reject, substitute or hard-fail)"
            )),
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strictness::Reject => "reject",
            Strictness::Substitute => "substitute",
            Strictness::HardFail => "hard-fail",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub symbol: String,
    pub reason: PositionError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub symbol: String,
    pub field: &'static str,
    pub original: f64,
    pub replacement: f64,
}

/// Everything a single extraction pass produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
    pub positions: Vec<Position>,
    pub rejections: Vec<Rejection>,
    pub substitutions: Vec<Substitution>,
}

impl Extraction {
    pub fn into_portfolio(self) -> Portfolio {
        Portfolio::new(self.positions)
    }

    pub fn candidate_count(&self) -> usize {
        self.positions.len() + self.rejections.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    strictness: Strictness,
}

impl Normalizer {
    pub fn new(strictness: Strictness) -> Self {
        Normalizer { strictness }
    }

    /// Searches `tree` for position candidates.
    ///
    /// Only [`Strictness::HardFail`] can return an error.
    pub fn extract(&self, tree: &Node) -> Result<Extraction, FolioError> {
        let mut extraction = Extraction::default();
        self.walk(tree, &mut extraction)?;
        debug!(
            candidates = extraction.candidate_count(),
            accepted = extraction.positions.len(),
            "extraction finished"
        );
        Ok(extraction)
    }

    fn walk(&self, node: &Node, out: &mut Extraction) -> Result<(), FolioError> {
        match node {
            Node::Mapping(_) if node.has_keys(&REQUIRED_FIELDS) => self.accept(node, out),
            Node::Mapping(entries) => {
                for (_, value) in entries {
                    self.walk(value, out)?;
                }
                Ok(())
            }
            Node::Sequence(items) => {
                for item in items {
                    self.walk(item, out)?;
                }
                Ok(())
            }
            Node::Scalar(_) => Ok(()),
        }
    }

    fn accept(&self, candidate: &Node, out: &mut Extraction) -> Result<(), FolioError> {
        let symbol = candidate_symbol(candidate);
        match convert_candidate(candidate, self.strictness) {
            Ok((position, substitutions)) => {
                for sub in substitutions {
                    warn!(
                        symbol = %sub.symbol,
                        field = sub.field,
                        original = sub.original,
                        replacement = sub.replacement,
                        "substituted invalid value"
                    );
                    out.substitutions.push(sub);
                }
                out.positions.push(position);
                Ok(())
            }
            Err(reason) if self.strictness == Strictness::HardFail => {
                Err(FolioError::InvalidPosition { symbol, reason })
            }
            Err(reason) => {
                warn!(symbol = %symbol, %reason, "skipping invalid position");
                out.rejections.push(Rejection { symbol, reason });
                Ok(())
            }
        }
    }
}

/// Extracts every valid position from `tree`, skipping and logging invalid
/// candidates. Never fails.
pub fn extract_positions(tree: &Node) -> Vec<Position> {
    Normalizer::default()
        .extract(tree)
        .map(|e| e.positions)
        .unwrap_or_default()
}

fn candidate_symbol(candidate: &Node) -> String {
    candidate
        .get("symbol")
        .and_then(Node::as_scalar)
        .filter(|s| !matches!(s, Scalar::Null))
        .map(|s| s.to_string().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string())
}

fn convert_candidate(
    candidate: &Node,
    strictness: Strictness,
) -> Result<(Position, Vec<Substitution>), PositionError> {
    let symbol = match scalar_field(candidate, "symbol")? {
        Scalar::Null => String::new(),
        s => s.to_string().trim().to_string(),
    };
    let quantity = number_field(candidate, "quantity")?;
    let mut purchase_price = number_field(candidate, "purchase_price")?;
    let purchase_date = date_field(candidate, "purchase_date")?;

    let mut substitutions = Vec::new();
    if strictness == Strictness::Substitute && purchase_price < 0.0 {
        substitutions.push(Substitution {
            symbol: symbol.clone(),
            field: "purchase_price",
            original: purchase_price,
            replacement: 0.0,
        });
        purchase_price = 0.0;
    }

    let position = Position::new(symbol, quantity, purchase_price, purchase_date)?;
    Ok((position, substitutions))
}

fn scalar_field<'a>(candidate: &'a Node, field: &'static str) -> Result<&'a Scalar, PositionError> {
    candidate
        .get(field)
        .ok_or(PositionError::MissingField { field })?
        .as_scalar()
        .ok_or(PositionError::NotScalar { field })
}

fn number_field(candidate: &Node, field: &'static str) -> Result<f64, PositionError> {
    let scalar = scalar_field(candidate, field)?;
    scalar
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PositionError::InvalidNumber {
            field,
            value: scalar.to_string(),
        })
}

fn date_field(candidate: &Node, field: &'static str) -> Result<NaiveDate, PositionError> {
    let scalar = scalar_field(candidate, field)?;
    let invalid = || PositionError::InvalidDate {
        value: scalar.to_string(),
    };
    match scalar {
        Scalar::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

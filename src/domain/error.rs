//! Domain error types.

/// Why a single position candidate could not be turned into a [`Position`].
///
/// These never abort a traversal on their own; the normalizer decides what
/// to do with them based on its strictness.
///
/// [`Position`]: super::position::Position
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PositionError {
    #[error("missing field {field}")]
    MissingField { field: &'static str },

    #[error("{field} must be a scalar value")]
    NotScalar { field: &'static str },

    #[error("invalid {field} value {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid purchase_date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity { quantity: f64 },

    #[error("purchase_price must be non-negative, got {price}")]
    NegativePrice { price: f64 },

    #[error("symbol is empty")]
    EmptySymbol,
}

/// Top-level error type for folioscan.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("cannot read {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("malformed source {path}: {reason}")]
    SourceFormat { path: String, reason: String },

    #[error("invalid position {symbol}: {reason}")]
    InvalidPosition {
        symbol: String,
        #[source]
        reason: PositionError,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FolioError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            FolioError::Io(_) => 1,
            FolioError::ConfigParse { .. } | FolioError::ConfigInvalid { .. } => 2,
            FolioError::SourceUnavailable { .. } | FolioError::SourceFormat { .. } => 3,
            FolioError::InvalidPosition { .. } => 4,
        }
    }
}

impl From<&FolioError> for std::process::ExitCode {
    fn from(err: &FolioError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}

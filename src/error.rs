use thiserror::Error;

/// Failure to turn caller-supplied text into a typed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Value was not supplied at all.
    #[error("missing value")]
    Missing,

    /// Hex body had an odd number of digits and strict parsing was requested.
    #[error("odd number of hex digits")]
    OddLength,

    /// Hex body contained a character outside `[0-9a-fA-F]`.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Decoded bytes did not have the width the field requires.
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    /// Decimal or hex integer was malformed or did not fit the target width.
    #[error("invalid integer: {0}")]
    Integer(String),

    /// A cap was set to zero.
    #[error("must be greater than zero")]
    Zero,

    /// Text did not name one of the known values.
    #[error("unknown value {0:?}")]
    Unknown(String),
}

/// Errors surfaced by configuration, validation and mining.
#[derive(Debug, Error)]
pub enum MineError {
    /// A config field is missing or malformed, or a cap is zero.
    #[error("invalid config field `{field}`: {source}")]
    InvalidConfig {
        field: String,
        #[source]
        source: ParseError,
    },

    /// Pattern is too long, or the scheme does not search by pattern.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Seed text was supplied but is not a valid 128-bit integer.
    #[error("invalid seed {input:?}: {source}")]
    SeedParse {
        input: String,
        #[source]
        source: ParseError,
    },

    /// A JSON mining request could not be deserialized.
    #[error("malformed request: {0}")]
    Request(#[from] serde_json::Error),

    /// Engine bookkeeping went wrong. The run is aborted.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// The worker thread pool could not be started.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl MineError {
    pub(crate) fn config(field: impl Into<String>, source: ParseError) -> Self {
        MineError::InvalidConfig {
            field: field.into(),
            source,
        }
    }
}

pub type Result<T, E = MineError> = std::result::Result<T, E>;

use thiserror::Error;

/// Top-level error type for safety-core operations.
///
/// Scoring is total and never produces one of these. Both variants are
/// caller errors raised by the ledger; configuration problems surface as
/// the engine's `ConfigError` before anything runs.
#[derive(Debug, Error)]
pub enum SafeguardError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for safety-core operations.
pub type Result<T> = std::result::Result<T, SafeguardError>;

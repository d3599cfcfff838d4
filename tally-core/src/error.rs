use thiserror::Error;

/// Failures raised while turning caller input into ledger records.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;

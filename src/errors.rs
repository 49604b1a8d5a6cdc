use thiserror::Error;

/// Error type that captures ledger validation and persistence failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("ledger schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u8, supported: u8 },
}

impl LedgerError {
    /// Builds an `InvalidInput` error for the named mutation field.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

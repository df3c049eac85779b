use thiserror::Error;

/// Errors raised by balance mutations.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Insufficient tokens: needed {needed}, available {available}")]
    InsufficientTokens { needed: i64, available: i64 },
}

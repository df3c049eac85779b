use thiserror::Error;

/// Errors for vault and bill operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Vault holds {available} tokens, {requested} requested")]
    InsufficientVaultBalance { requested: i64, available: i64 },

    #[error("Bill '{0}' not found")]
    BillNotFound(String),

    #[error("Interest rate must not be negative")]
    NegativeInterestRate,
}

//! Core error types for the household economy engine.
//!
//! Every failure is a declined operation: the command leaves the state
//! untouched and surfaces one of these errors to the caller. Domain
//! modules define their own error enums, which are folded into the
//! root [`Error`] here.

use thiserror::Error;

use crate::auction::AuctionError;
use crate::ledger::LedgerError;
use crate::market::MarketError;
use crate::rewards::RewardError;
use crate::shop::ShopError;
use crate::tasks::TaskError;
use crate::users::UserError;
use crate::vault::VaultError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the economy engine.
///
/// Three families per the failure policy: validation errors (malformed
/// input, rejected before any mutation), precondition errors (operation
/// not legal in the current state), and insufficient-resource errors
/// (balance or stock too low). None is retried by the core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Task operation failed: {0}")]
    Task(#[from] TaskError),

    #[error("Auction operation failed: {0}")]
    Auction(#[from] AuctionError),

    #[error("Shop operation failed: {0}")]
    Shop(#[from] ShopError),

    #[error("Market operation failed: {0}")]
    Market(#[from] MarketError),

    #[error("Reward operation failed: {0}")]
    Reward(#[from] RewardError),

    #[error("Vault operation failed: {0}")]
    Vault(#[from] VaultError),

    #[error("User operation failed: {0}")]
    User(#[from] UserError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

/// Rejects negative token amounts before any mutation takes place.
pub(crate) fn ensure_non_negative(amount: i64) -> std::result::Result<(), ValidationError> {
    if amount < 0 {
        return Err(ValidationError::NegativeAmount(amount));
    }
    Ok(())
}

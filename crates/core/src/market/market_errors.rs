use thiserror::Error;

/// Errors for the administrator-curated market.
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Market item '{0}' not found")]
    NotFound(String),
}

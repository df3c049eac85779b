use thiserror::Error;

/// Precondition errors for the bidding protocol.
#[derive(Error, Debug)]
pub enum AuctionError {
    #[error("An auction is already running")]
    AlreadyActive,

    #[error("No active auction")]
    NotActive,

    #[error("Bid of {bid} does not beat the highest bid of {highest}")]
    BidTooLow { bid: i64, highest: i64 },
}

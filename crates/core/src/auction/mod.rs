//! Auction module - the singleton bidding protocol.

mod auction_errors;
mod auction_model;
mod auction_service;

pub use auction_errors::AuctionError;
pub use auction_model::Auction;
pub use auction_service::AuctionService;

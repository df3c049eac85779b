//! Market module - administrator-curated rewards and flash sales.

mod market_errors;
mod market_model;
mod market_service;

pub use market_errors::MarketError;
pub use market_model::{MarketItem, NewMarketItem};
pub use market_service::MarketService;

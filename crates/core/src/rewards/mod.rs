//! Rewards module - weighted-random loot-box mechanics.

mod rewards_errors;
mod rewards_model;
mod rewards_service;

pub use rewards_errors::RewardError;
pub use rewards_model::RewardEntry;
pub use rewards_service::RewardService;

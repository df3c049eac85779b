//! Hearthledger Core - domain models, services, and state for a
//! household virtual economy.
//!
//! This crate contains the complete economy and task-lifecycle engine:
//! the chore state machine (with negotiation and financial
//! pseudo-tasks), the auction bidding protocol, the daily shop
//! rotation, the weighted-random reward selector, and the token
//! ledger. It holds no timers and performs no I/O: commands are
//! synchronous transformations of an in-memory [`EconomyState`], and
//! time-driven behavior is triggered by the host.

pub mod auction;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod ledger;
pub mod market;
pub mod notifications;
pub mod rewards;
pub mod shop;
pub mod state;
pub mod tasks;
pub mod users;
pub mod vault;

pub use engine::EconomyEngine;
pub use state::EconomyState;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! Vault module - shared savings, interest, bills, transfers.

mod vault_errors;
mod vault_model;
mod vault_service;


pub use vault_errors::VaultError;
pub use vault_model::{Bill, NewBill};
pub use vault_service::VaultService;

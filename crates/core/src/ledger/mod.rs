//! Ledger module - balance mutation, transaction log, progression.

mod ledger_errors;
mod ledger_model;
mod ledger_service;

#[cfg(test)]
mod ledger_service_tests;

pub use ledger_errors::LedgerError;
pub use ledger_model::{Transaction, TransactionKind};
pub use ledger_service::{streak_multiplier, LedgerService};

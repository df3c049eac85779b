//! Ledger domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Earn,
    Spend,
}

/// Immutable ledger entry. Entries are append-only and prepended to
/// the running list, newest first; they are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// `None` marks a household-level entry (e.g. vault interest).
    pub user_id: Option<String>,
    pub amount: i64,
    pub kind: TransactionKind,
    pub reason: String,
    /// Streak multiplier applied to an earn, when one was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

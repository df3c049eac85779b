//! Vault domain models.

use serde::{Deserialize, Serialize};

/// Recurring deduction definition. The core applies bills only when
/// explicitly triggered; scheduling belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub title: String,
    pub amount: i64,
    pub frequency: String,
}

/// Input model for creating a bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub title: String,
    pub amount: i64,
    pub frequency: String,
}

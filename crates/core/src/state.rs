//! The shared economy state tree.
//!
//! Every command reads this structure, computes, and applies its
//! changes as one atomic step. There is no hidden global container:
//! callers own an [`EconomyState`] (usually through the engine facade)
//! and may snapshot it wholesale via serde for external persistence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auction::Auction;
use crate::constants::DEFAULT_INTEREST_RATE;
use crate::ledger::Transaction;
use crate::market::MarketItem;
use crate::notifications::Notification;
use crate::shop::{CatalogItem, ShopSlot};
use crate::tasks::Task;
use crate::users::User;
use crate::vault::Bill;

/// Single authoritative state for one household.
///
/// Users are keyed by id; any "current user", "logged-in user", or
/// roster view is a lookup into this table, never a separate mutable
/// copy. The transaction list is newest-first and append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyState {
    pub users: BTreeMap<String, User>,
    pub tasks: Vec<Task>,
    pub transactions: Vec<Transaction>,
    pub market_items: Vec<MarketItem>,
    pub catalog: Vec<CatalogItem>,
    pub shop_slots: Vec<ShopSlot>,
    pub last_shop_refresh: Option<DateTime<Utc>>,
    pub auction: Option<Auction>,
    /// Shared savings balance. Never negative.
    pub vault_balance: i64,
    pub interest_rate: Decimal,
    pub bills: Vec<Bill>,
    pub notifications: Vec<Notification>,
}

impl Default for EconomyState {
    fn default() -> Self {
        EconomyState {
            users: BTreeMap::new(),
            tasks: Vec::new(),
            transactions: Vec::new(),
            market_items: Vec::new(),
            catalog: Vec::new(),
            shop_slots: Vec::new(),
            last_shop_refresh: None,
            auction: None,
            vault_balance: 0,
            interest_rate: DEFAULT_INTEREST_RATE,
            bills: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

impl EconomyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Tasks waiting on an administrator decision.
    pub fn approval_queue(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.needs_approval()).collect()
    }
}

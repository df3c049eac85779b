//! Notification domain models.
//!
//! Every user-visible mutating command appends one of these records.
//! The core only emits structured entries; formatting, delivery, and
//! dismissal are presentation concerns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audience a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetRole {
    Admin,
    Member,
    All,
}

/// Category of a notification, used by the presentation layer for
/// filtering and iconography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    NewChore,
    Claimable,
    ApprovalRequested,
    TaskApproved,
    TaskRejected,
    CounterOffer,
    CounterOfferRejected,
    AuctionStarted,
    BidPlaced,
    AuctionEnded,
    ShopRefreshed,
    Purchase,
    RewardWon,
    VaultRequest,
    BillsProcessed,
    Transfer,
    GoalCompleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
    pub target_role: TargetRole,
}

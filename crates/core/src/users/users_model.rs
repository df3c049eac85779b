//! User domain models.

use serde::{Deserialize, Serialize};

/// Role of a household participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    Member,
}

/// Savings goal reservation: tokens moved here are earmarked and not
/// spendable until the goal completes (consumed) or is cancelled
/// (refunded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub item_id: String,
    pub target_cost: i64,
    pub saved_tokens: i64,
}

/// Domain model representing a household participant.
///
/// Users are stored once in the authoritative table on the state tree;
/// "current user" and roster views are lookups, never copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Spendable balance. Never negative.
    pub tokens: i64,
    /// Consecutive approved-completion count.
    pub streak: u32,
    pub xp: i64,
    pub level: i64,
    pub badges: Vec<String>,
    pub wishlist: Vec<String>,
    pub active_goal: Option<SavingsGoal>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Input model for joining a household.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: Option<String>,
    pub name: String,
    pub role: Role,
}

//! Task domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TASK_REWARD;
use crate::errors::ValidationError;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Open,
    Accepted,
    Pending,
    Completed,
    Negotiating,
}

/// Whether a chore recurs or was posted ad hoc to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskType {
    Regular,
    Spontaneous,
}

/// What a task record actually is.
///
/// The vault reuses the task list for pending financial requests so
/// they flow through the same approval queue as chores; the variants
/// keep approval/rejection logic a match instead of flag checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TaskKind {
    Chore {
        task_type: TaskType,
        #[serde(skip_serializing_if = "Option::is_none")]
        frequency: Option<String>,
    },
    /// Vault funds already decremented; approval releases them to the
    /// requester, rejection restores the vault.
    Withdrawal,
    /// Spendable tokens checked but untouched; approval debits them.
    Cashout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub reward: i64,
    pub status: TaskStatus,
    #[serde(flatten)]
    pub kind: TaskKind,
    pub assigned_to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_offer_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_offer_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn is_financial_request(&self) -> bool {
        matches!(self.kind, TaskKind::Withdrawal | TaskKind::Cashout)
    }

    pub fn is_spontaneous(&self) -> bool {
        matches!(
            self.kind,
            TaskKind::Chore {
                task_type: TaskType::Spontaneous,
                ..
            }
        )
    }

    /// Only pending or negotiating tasks sit in the approval queue.
    pub fn needs_approval(&self) -> bool {
        matches!(self.status, TaskStatus::Pending | TaskStatus::Negotiating)
    }

    pub(crate) fn clear_negotiation(&mut self) {
        self.proposed_by = None;
        self.counter_offer_amount = None;
        self.counter_offer_reason = None;
    }
}

/// Input model for creating a chore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub reward: Option<i64>,
    pub task_type: TaskType,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub assigned_to: Vec<String>,
}

impl NewTask {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }
        if let Some(reward) = self.reward {
            if reward < 0 {
                return Err(ValidationError::NegativeAmount(reward));
            }
        }
        Ok(())
    }

    pub fn reward_or_default(&self) -> i64 {
        self.reward.unwrap_or(DEFAULT_TASK_REWARD)
    }
}

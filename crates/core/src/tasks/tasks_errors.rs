use thiserror::Error;

use super::tasks_model::TaskStatus;

/// Precondition errors for task state transitions.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task '{0}' not found")]
    NotFound(String),

    #[error("Task '{0}' is not a claimable pool task")]
    NotClaimable(String),

    #[error("Task '{0}' is completed and immutable")]
    AlreadyCompleted(String),

    #[error("Task '{id}' is {status:?}, expected {expected:?}")]
    WrongStatus {
        id: String,
        status: TaskStatus,
        expected: TaskStatus,
    },

    #[error("Task '{0}' is not open for negotiation")]
    NotNegotiable(String),

    #[error("Task '{0}' has no counter-offer proposer")]
    NoProposer(String),

    #[error("Task '{0}' has no assignees to credit")]
    NoAssignees(String),
}

use thiserror::Error;

/// Errors for membership and savings-goal operations.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("A user with id '{0}' already exists in the household")]
    AlreadyMember(String),

    #[error("User '{0}' has no active savings goal")]
    NoActiveGoal(String),

    #[error("Goal needs {target} tokens saved, only {saved} reserved")]
    GoalNotFunded { target: i64, saved: i64 },
}

use thiserror::Error;

/// Errors for loot-box spins.
#[derive(Error, Debug)]
pub enum RewardError {
    #[error("Reward pool is empty")]
    EmptyPool,
}

//! Reward pool domain models.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::shop::ItemTier;

/// One entry in a weighted reward pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEntry {
    pub label: String,
    pub tier: ItemTier,
    /// Relative chance weight. Must be finite and positive.
    pub weight: f64,
    /// Tokens credited when this entry wins, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_payout: Option<i64>,
}

impl RewardEntry {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(ValidationError::InvalidInput(format!(
                "reward weight for '{}' must be finite and positive",
                self.label
            )));
        }
        if let Some(payout) = self.token_payout {
            if payout < 0 {
                return Err(ValidationError::NegativeAmount(payout));
            }
        }
        Ok(())
    }
}

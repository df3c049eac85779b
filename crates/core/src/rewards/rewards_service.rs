use rand::Rng;

use crate::errors::{ensure_non_negative, Result};
use crate::ledger::LedgerService;
use crate::notifications::{push_notification, NotificationKind, TargetRole};
use crate::state::EconomyState;

use super::rewards_errors::RewardError;
use super::rewards_model::RewardEntry;

/// Weighted-random reward selection (gacha / loot box).
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardService {
    ledger: LedgerService,
}

impl RewardService {
    pub fn new(ledger: LedgerService) -> Self {
        RewardService { ledger }
    }

    /// Draws one entry: a uniform value in `[0, total_weight)` walks
    /// the pool summing weights until the cumulative sum exceeds the
    /// draw. The last entry absorbs floating-point edge cases.
    pub fn select<'a, R: Rng + ?Sized>(
        &self,
        pool: &'a [RewardEntry],
        rng: &mut R,
    ) -> Result<&'a RewardEntry> {
        if pool.is_empty() {
            return Err(RewardError::EmptyPool.into());
        }
        for entry in pool {
            entry.validate()?;
        }

        let total: f64 = pool.iter().map(|e| e.weight).sum();
        let draw = rng.gen_range(0.0..total);
        let mut cumulative = 0.0;
        for entry in pool {
            cumulative += entry.weight;
            if cumulative > draw {
                return Ok(entry);
            }
        }
        // Accumulated rounding can leave the draw just past the sum.
        Ok(pool.last().expect("pool checked non-empty"))
    }

    /// Paid spin: the entry cost is debited no matter the outcome, and
    /// a winning token payout is credited in the same operation. The
    /// spend and earn entries share the spin's cause label.
    pub fn spin<R: Rng + ?Sized>(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        pool: &[RewardEntry],
        cost: i64,
        rng: &mut R,
    ) -> Result<RewardEntry> {
        ensure_non_negative(cost)?;
        let won = self.select(pool, rng)?.clone();

        self.ledger
            .debit_tokens(state, user_id, cost, "Loot box spin: entry cost")?;
        if let Some(payout) = won.token_payout.filter(|p| *p > 0) {
            self.ledger.credit_raw(
                state,
                user_id,
                payout,
                &format!("Loot box spin: won {}", won.label),
            )?;
        }

        push_notification(
            state,
            NotificationKind::RewardWon,
            format!("Loot box opened: {}", won.label),
            TargetRole::All,
        );
        Ok(won)
    }
}

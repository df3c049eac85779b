use chrono::Utc;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::constants::{
    CHORE_MASTER_BADGE, CHORE_MASTER_LEVEL, RISING_STAR_BADGE, RISING_STAR_LEVEL,
    STREAK_TIER_1_DAYS, STREAK_TIER_1_MULTIPLIER, STREAK_TIER_2_DAYS, STREAK_TIER_2_MULTIPLIER,
    STREAK_TIER_3_DAYS, STREAK_TIER_3_MULTIPLIER, XP_PER_LEVEL, XP_PER_TOKEN,
};
use crate::errors::{ensure_non_negative, Error, Result};
use crate::state::EconomyState;

use super::ledger_errors::LedgerError;
use super::ledger_model::{Transaction, TransactionKind};

/// Earn multiplier for a consecutive-completion streak.
pub fn streak_multiplier(streak: u32) -> Decimal {
    if streak >= STREAK_TIER_3_DAYS {
        STREAK_TIER_3_MULTIPLIER
    } else if streak >= STREAK_TIER_2_DAYS {
        STREAK_TIER_2_MULTIPLIER
    } else if streak >= STREAK_TIER_1_DAYS {
        STREAK_TIER_1_MULTIPLIER
    } else {
        Decimal::ONE
    }
}

/// Token balance mutation and progression primitives.
///
/// All other components move tokens through this service so that the
/// non-negativity invariant and the append-only transaction log are
/// enforced in exactly one place.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        LedgerService
    }

    /// Credits tokens with the streak multiplier and progression side
    /// effects, returning the final (multiplied, floored) amount.
    ///
    /// XP is derived from the base amount; the multiplier only scales
    /// the tokens credited.
    pub fn credit_tokens(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        amount: i64,
        reason: &str,
    ) -> Result<i64> {
        ensure_non_negative(amount)?;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UnknownUser(user_id.to_string()))?;

        let multiplier = streak_multiplier(user.streak);
        let final_amount = (Decimal::from(amount) * multiplier)
            .floor()
            .to_i64()
            .ok_or_else(|| Error::Unexpected(format!("credit overflow for amount {}", amount)))?;

        user.tokens += final_amount;
        user.xp += amount * XP_PER_TOKEN;
        user.level = user.xp / XP_PER_LEVEL + 1;

        if user.level >= RISING_STAR_LEVEL && !user.badges.iter().any(|b| b == RISING_STAR_BADGE) {
            user.badges.push(RISING_STAR_BADGE.to_string());
        }
        if user.level >= CHORE_MASTER_LEVEL && !user.badges.iter().any(|b| b == CHORE_MASTER_BADGE)
        {
            user.badges.push(CHORE_MASTER_BADGE.to_string());
        }

        log::debug!(
            "credited {} tokens (base {}, x{}) to user {}",
            final_amount,
            amount,
            multiplier,
            user_id
        );
        self.record(
            state,
            Some(user_id),
            final_amount,
            TransactionKind::Earn,
            reason,
            Some(multiplier),
        );
        Ok(final_amount)
    }

    /// Plain credit: an earn entry with no multiplier, XP, or badge
    /// side effects. Used when tokens move rather than being earned
    /// (withdrawal releases, loot payouts, shop token bonuses).
    pub fn credit_raw(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        amount: i64,
        reason: &str,
    ) -> Result<()> {
        ensure_non_negative(amount)?;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UnknownUser(user_id.to_string()))?;
        user.tokens += amount;
        self.record(
            state,
            Some(user_id),
            amount,
            TransactionKind::Earn,
            reason,
            None,
        );
        Ok(())
    }

    /// Deducts tokens, failing with no mutation and no transaction when
    /// the balance is too low.
    pub fn debit_tokens(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        amount: i64,
        reason: &str,
    ) -> Result<()> {
        ensure_non_negative(amount)?;
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UnknownUser(user_id.to_string()))?;
        if amount > user.tokens {
            return Err(LedgerError::InsufficientTokens {
                needed: amount,
                available: user.tokens,
            }
            .into());
        }
        user.tokens -= amount;
        self.record(
            state,
            Some(user_id),
            amount,
            TransactionKind::Spend,
            reason,
            None,
        );
        Ok(())
    }

    /// Prepends one immutable entry to the ledger.
    pub(crate) fn record(
        &self,
        state: &mut EconomyState,
        user_id: Option<&str>,
        amount: i64,
        kind: TransactionKind,
        reason: &str,
        multiplier: Option<Decimal>,
    ) {
        state.transactions.insert(
            0,
            Transaction {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.map(str::to_string),
                amount,
                kind,
                reason: reason.to_string(),
                multiplier,
                timestamp: Utc::now(),
            },
        );
    }
}

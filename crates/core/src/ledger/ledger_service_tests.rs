use rust_decimal_macros::dec;

use crate::constants::{CHORE_MASTER_BADGE, RISING_STAR_BADGE};
use crate::ledger::{streak_multiplier, LedgerService, TransactionKind};
use crate::state::EconomyState;
use crate::users::{Role, User};

fn member(id: &str, tokens: i64, streak: u32) -> User {
    User {
        id: id.to_string(),
        name: id.to_string(),
        role: Role::Member,
        tokens,
        streak,
        xp: 0,
        level: 1,
        badges: Vec::new(),
        wishlist: Vec::new(),
        active_goal: None,
    }
}

fn state_with(users: Vec<User>) -> EconomyState {
    let mut state = EconomyState::new();
    for user in users {
        state.users.insert(user.id.clone(), user);
    }
    state
}

#[test]
fn test_streak_multiplier_table() {
    assert_eq!(streak_multiplier(0), dec!(1));
    assert_eq!(streak_multiplier(6), dec!(1));
    assert_eq!(streak_multiplier(7), dec!(1.2));
    assert_eq!(streak_multiplier(13), dec!(1.2));
    assert_eq!(streak_multiplier(14), dec!(1.5));
    assert_eq!(streak_multiplier(29), dec!(1.5));
    assert_eq!(streak_multiplier(30), dec!(2.0));
    assert_eq!(streak_multiplier(365), dec!(2.0));
}

#[test]
fn test_credit_applies_multiplier_and_floors() {
    let ledger = LedgerService::new();

    for (streak, amount, expected) in [
        (6u32, 100i64, 100i64),
        (7, 100, 120),
        (14, 100, 150),
        (30, 100, 200),
        // 5 * 1.2 = 6.0; 3 * 1.2 = 3.6 floors to 3
        (7, 5, 6),
        (7, 3, 3),
    ] {
        let mut state = state_with(vec![member("kid", 0, streak)]);
        let credited = ledger.credit_tokens(&mut state, "kid", amount, "chore").unwrap();
        assert_eq!(credited, expected, "streak {} amount {}", streak, amount);
        assert_eq!(state.users["kid"].tokens, expected);
    }
}

#[test]
fn test_xp_derives_from_base_amount() {
    let ledger = LedgerService::new();
    let mut state = state_with(vec![member("kid", 0, 30)]);

    // Base 40 at x2.0 credits 80 tokens but only 400 XP.
    ledger.credit_tokens(&mut state, "kid", 40, "chore").unwrap();
    let user = &state.users["kid"];
    assert_eq!(user.tokens, 80);
    assert_eq!(user.xp, 400);
    assert_eq!(user.level, 1);
}

#[test]
fn test_level_and_badges_unlock_without_duplicates() {
    let ledger = LedgerService::new();
    let mut state = state_with(vec![member("kid", 0, 0)]);

    ledger.credit_tokens(&mut state, "kid", 50, "chore").unwrap();
    {
        let user = &state.users["kid"];
        assert_eq!(user.xp, 500);
        assert_eq!(user.level, 2);
        assert_eq!(user.badges, vec![RISING_STAR_BADGE.to_string()]);
    }

    // Crossing the same threshold again must not duplicate the badge.
    ledger.credit_tokens(&mut state, "kid", 50, "chore").unwrap();
    assert_eq!(state.users["kid"].badges.len(), 1);

    // 2000 XP total puts the user at level 5.
    ledger.credit_tokens(&mut state, "kid", 100, "chore").unwrap();
    let user = &state.users["kid"];
    assert_eq!(user.level, 5);
    assert_eq!(
        user.badges,
        vec![RISING_STAR_BADGE.to_string(), CHORE_MASTER_BADGE.to_string()]
    );
}

#[test]
fn test_earn_transaction_annotated_with_multiplier() {
    let ledger = LedgerService::new();
    let mut state = state_with(vec![member("kid", 0, 14)]);

    ledger.credit_tokens(&mut state, "kid", 10, "chore").unwrap();
    let tx = &state.transactions[0];
    assert_eq!(tx.kind, TransactionKind::Earn);
    assert_eq!(tx.amount, 15);
    assert_eq!(tx.multiplier, Some(dec!(1.5)));
    assert_eq!(tx.user_id.as_deref(), Some("kid"));
}

#[test]
fn test_transactions_prepended_newest_first() {
    let ledger = LedgerService::new();
    let mut state = state_with(vec![member("kid", 100, 0)]);

    ledger.credit_tokens(&mut state, "kid", 10, "first").unwrap();
    ledger.debit_tokens(&mut state, "kid", 5, "second").unwrap();

    assert_eq!(state.transactions[0].reason, "second");
    assert_eq!(state.transactions[1].reason, "first");
}

#[test]
fn test_debit_insufficient_balance_mutates_nothing() {
    let ledger = LedgerService::new();
    let mut state = state_with(vec![member("kid", 10, 0)]);

    assert!(ledger.debit_tokens(&mut state, "kid", 11, "toy").is_err());
    assert_eq!(state.users["kid"].tokens, 10);
    assert!(state.transactions.is_empty());
}

#[test]
fn test_debit_success_logs_spend() {
    let ledger = LedgerService::new();
    let mut state = state_with(vec![member("kid", 10, 0)]);

    ledger.debit_tokens(&mut state, "kid", 10, "toy").unwrap();
    assert_eq!(state.users["kid"].tokens, 0);
    assert_eq!(state.transactions[0].kind, TransactionKind::Spend);
}

#[test]
fn test_negative_amounts_rejected() {
    let ledger = LedgerService::new();
    let mut state = state_with(vec![member("kid", 10, 0)]);

    assert!(ledger.credit_tokens(&mut state, "kid", -1, "bad").is_err());
    assert!(ledger.debit_tokens(&mut state, "kid", -1, "bad").is_err());
    assert!(ledger.credit_raw(&mut state, "kid", -1, "bad").is_err());
    assert_eq!(state.users["kid"].tokens, 10);
    assert!(state.transactions.is_empty());
}

#[test]
fn test_credit_raw_skips_progression() {
    let ledger = LedgerService::new();
    let mut state = state_with(vec![member("kid", 0, 30)]);

    ledger.credit_raw(&mut state, "kid", 50, "refund").unwrap();
    let user = &state.users["kid"];
    // No multiplier, no XP.
    assert_eq!(user.tokens, 50);
    assert_eq!(user.xp, 0);
    assert!(state.transactions[0].multiplier.is_none());
}

#[test]
fn test_unknown_user_rejected() {
    let ledger = LedgerService::new();
    let mut state = EconomyState::new();
    assert!(ledger.credit_tokens(&mut state, "ghost", 10, "x").is_err());
    assert!(ledger.debit_tokens(&mut state, "ghost", 10, "x").is_err());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The credited amount never drops below the base amount and
        /// never exceeds double it, for any streak.
        #[test]
        fn credit_bounded_by_multiplier_range(
            streak in 0u32..400,
            amount in 0i64..1_000_000,
        ) {
            let ledger = LedgerService::new();
            let mut state = state_with(vec![member("kid", 0, streak)]);
            let credited = ledger.credit_tokens(&mut state, "kid", amount, "chore").unwrap();
            prop_assert!(credited >= amount);
            prop_assert!(credited <= amount * 2);
            prop_assert_eq!(state.users["kid"].tokens, credited);
        }

        /// A debit either succeeds leaving a non-negative balance or
        /// fails leaving the balance untouched.
        #[test]
        fn balance_never_goes_negative(
            balance in 0i64..1_000_000,
            debit in 0i64..2_000_000,
        ) {
            let ledger = LedgerService::new();
            let mut state = state_with(vec![member("kid", balance, 0)]);
            let result = ledger.debit_tokens(&mut state, "kid", debit, "spend");
            if debit <= balance {
                prop_assert!(result.is_ok());
                prop_assert_eq!(state.users["kid"].tokens, balance - debit);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(state.users["kid"].tokens, balance);
            }
        }
    }
}

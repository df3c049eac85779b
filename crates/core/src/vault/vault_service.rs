use chrono::Utc;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::{ensure_non_negative, Error, Result};
use crate::ledger::{LedgerError, LedgerService, TransactionKind};
use crate::notifications::{push_notification, NotificationKind, TargetRole};
use crate::state::EconomyState;
use crate::tasks::{Task, TaskKind, TaskStatus};
use crate::users::Role;

use super::vault_errors::VaultError;
use super::vault_model::{Bill, NewBill};

/// Shared savings vault, recurring bills, and peer transfers.
///
/// Withdrawals are two-phase: the vault is decremented up front and a
/// pending request task carries the funds until an administrator
/// approves (release to the requester) or rejects (restore the vault).
/// Cash-outs are the mirror image: checked now, debited on approval.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultService {
    ledger: LedgerService,
}

impl VaultService {
    pub fn new(ledger: LedgerService) -> Self {
        VaultService { ledger }
    }

    pub fn deposit_to_vault(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        amount: i64,
    ) -> Result<()> {
        ensure_non_negative(amount)?;
        self.ledger
            .debit_tokens(state, user_id, amount, "Vault deposit")?;
        state.vault_balance += amount;
        Ok(())
    }

    /// Phase one of a withdrawal: the vault gives the funds up
    /// immediately, a pending request task holds them until the
    /// administrator decides.
    pub fn withdraw_from_vault(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        amount: i64,
    ) -> Result<String> {
        ensure_non_negative(amount)?;
        Self::ensure_user(state, user_id)?;
        if amount > state.vault_balance {
            return Err(VaultError::InsufficientVaultBalance {
                requested: amount,
                available: state.vault_balance,
            }
            .into());
        }
        state.vault_balance -= amount;
        let task_id = Self::enqueue_request(
            state,
            TaskKind::Withdrawal,
            user_id,
            amount,
            format!("Vault withdrawal of {} tokens", amount),
        );
        push_notification(
            state,
            NotificationKind::VaultRequest,
            format!("Withdrawal of {} tokens awaits approval", amount),
            TargetRole::Admin,
        );
        Ok(task_id)
    }

    /// Requests converting allowance tokens to real-world money. The
    /// balance is only checked here; approval performs the debit.
    pub fn request_allowance_cashout(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        amount: i64,
    ) -> Result<String> {
        ensure_non_negative(amount)?;
        let available = state
            .users
            .get(user_id)
            .map(|u| u.tokens)
            .ok_or_else(|| LedgerError::UnknownUser(user_id.to_string()))?;
        if available < amount {
            return Err(LedgerError::InsufficientTokens {
                needed: amount,
                available,
            }
            .into());
        }
        let task_id = Self::enqueue_request(
            state,
            TaskKind::Cashout,
            user_id,
            amount,
            format!("Allowance cash-out of {} tokens", amount),
        );
        push_notification(
            state,
            NotificationKind::VaultRequest,
            format!("Cash-out of {} tokens awaits approval", amount),
            TargetRole::Admin,
        );
        Ok(task_id)
    }

    /// Credits `floor(vault_balance * interest_rate)` to the vault,
    /// logged as one household-level earn entry. A no-op when the
    /// computed interest is not positive.
    pub fn apply_interest(&self, state: &mut EconomyState) -> Result<i64> {
        let interest = (Decimal::from(state.vault_balance) * state.interest_rate)
            .floor()
            .to_i64()
            .ok_or_else(|| Error::Unexpected("interest overflow".to_string()))?;
        if interest <= 0 {
            return Ok(0);
        }
        state.vault_balance += interest;
        self.ledger.record(
            state,
            None,
            interest,
            TransactionKind::Earn,
            "Vault interest",
            None,
        );
        log::debug!("applied {} tokens of vault interest", interest);
        Ok(interest)
    }

    pub fn set_interest_rate(&self, state: &mut EconomyState, rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO {
            return Err(VaultError::NegativeInterestRate.into());
        }
        state.interest_rate = rate;
        Ok(())
    }

    pub fn add_bill(&self, state: &mut EconomyState, new_bill: NewBill) -> Result<Bill> {
        ensure_non_negative(new_bill.amount)?;
        let bill = Bill {
            id: Uuid::new_v4().to_string(),
            title: new_bill.title,
            amount: new_bill.amount,
            frequency: new_bill.frequency,
        };
        state.bills.push(bill.clone());
        Ok(bill)
    }

    pub fn remove_bill(&self, state: &mut EconomyState, bill_id: &str) -> Result<()> {
        let before = state.bills.len();
        state.bills.retain(|b| b.id != bill_id);
        if state.bills.len() == before {
            return Err(VaultError::BillNotFound(bill_id.to_string()).into());
        }
        Ok(())
    }

    /// Deducts the sum of all bills from every member, clamping each
    /// balance at zero, and logs one spend entry per bill per member.
    /// Idempotence over time is the caller's concern; each invocation
    /// applies the bills once.
    pub fn process_bills(&self, state: &mut EconomyState) -> Result<()> {
        let total: i64 = state.bills.iter().map(|b| b.amount).sum();
        if total <= 0 {
            return Ok(());
        }
        let bills = state.bills.clone();
        let member_ids: Vec<String> = state
            .users
            .values()
            .filter(|u| u.role == Role::Member)
            .map(|u| u.id.clone())
            .collect();

        for member_id in &member_ids {
            if let Some(user) = state.users.get_mut(member_id) {
                user.tokens = (user.tokens - total).max(0);
            }
            for bill in &bills {
                self.ledger.record(
                    state,
                    Some(member_id.as_str()),
                    bill.amount,
                    TransactionKind::Spend,
                    &format!("Bill: {}", bill.title),
                    None,
                );
            }
        }
        push_notification(
            state,
            NotificationKind::BillsProcessed,
            format!("Bills totalling {} tokens were collected", total),
            TargetRole::Member,
        );
        Ok(())
    }

    /// Peer transfer: atomically debits the sender and credits the
    /// recipient, logging a single spend entry tagged with both the
    /// recipient and the memo.
    pub fn transfer_tokens(
        &self,
        state: &mut EconomyState,
        from_user_id: &str,
        to_user_id: &str,
        amount: i64,
        memo: &str,
    ) -> Result<()> {
        ensure_non_negative(amount)?;
        if !state.users.contains_key(to_user_id) {
            return Err(LedgerError::UnknownUser(to_user_id.to_string()).into());
        }
        let available = state
            .users
            .get(from_user_id)
            .map(|u| u.tokens)
            .ok_or_else(|| LedgerError::UnknownUser(from_user_id.to_string()))?;
        if available < amount {
            return Err(LedgerError::InsufficientTokens {
                needed: amount,
                available,
            }
            .into());
        }

        if let Some(sender) = state.users.get_mut(from_user_id) {
            sender.tokens -= amount;
        }
        if let Some(recipient) = state.users.get_mut(to_user_id) {
            recipient.tokens += amount;
        }
        self.ledger.record(
            state,
            Some(from_user_id),
            amount,
            TransactionKind::Spend,
            &format!("Transfer to {}: {}", to_user_id, memo),
            None,
        );
        push_notification(
            state,
            NotificationKind::Transfer,
            format!("{} tokens were sent to {}", amount, to_user_id),
            TargetRole::Member,
        );
        Ok(())
    }

    fn ensure_user(state: &EconomyState, user_id: &str) -> Result<()> {
        if !state.users.contains_key(user_id) {
            return Err(LedgerError::UnknownUser(user_id.to_string()).into());
        }
        Ok(())
    }

    fn enqueue_request(
        state: &mut EconomyState,
        kind: TaskKind,
        user_id: &str,
        amount: i64,
        title: String,
    ) -> String {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title,
            reward: amount,
            status: TaskStatus::Pending,
            kind,
            assigned_to: vec![user_id.to_string()],
            proof_url: None,
            rejection_reason: None,
            proposed_by: None,
            counter_offer_amount: None,
            counter_offer_reason: None,
            created_at: Utc::now(),
        };
        let id = task.id.clone();
        state.tasks.push(task);
        id
    }
}

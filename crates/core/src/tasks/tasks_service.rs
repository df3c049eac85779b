use chrono::Utc;
use uuid::Uuid;

use crate::errors::{ensure_non_negative, Result, ValidationError};
use crate::ledger::{LedgerError, LedgerService};
use crate::notifications::{push_notification, NotificationKind, TargetRole};
use crate::state::EconomyState;

use super::tasks_errors::TaskError;
use super::tasks_model::{NewTask, Task, TaskKind, TaskStatus};

/// Task lifecycle engine: creation, claiming, proof submission,
/// approval/rejection, counter-offer negotiation, and the financial
/// pseudo-tasks the vault enqueues.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskService {
    ledger: LedgerService,
}

impl TaskService {
    pub fn new(ledger: LedgerService) -> Self {
        TaskService { ledger }
    }

    fn position(state: &EconomyState, task_id: &str) -> Result<usize> {
        state
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| TaskError::NotFound(task_id.to_string()).into())
    }

    fn ensure_user(state: &EconomyState, user_id: &str) -> Result<()> {
        if !state.users.contains_key(user_id) {
            return Err(LedgerError::UnknownUser(user_id.to_string()).into());
        }
        Ok(())
    }

    /// Creates a chore with a generated id. Unassigned spontaneous
    /// tasks are announced to the member pool; pre-assigned ones to
    /// their assignee.
    pub fn create_task(&self, state: &mut EconomyState, new_task: NewTask) -> Result<Task> {
        new_task.validate()?;
        for assignee in &new_task.assigned_to {
            Self::ensure_user(state, assignee)?;
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new_task.title.clone(),
            reward: new_task.reward_or_default(),
            status: TaskStatus::Open,
            kind: TaskKind::Chore {
                task_type: new_task.task_type,
                frequency: new_task.frequency.clone(),
            },
            assigned_to: new_task.assigned_to.clone(),
            proof_url: None,
            rejection_reason: None,
            proposed_by: None,
            counter_offer_amount: None,
            counter_offer_reason: None,
            created_at: Utc::now(),
        };

        if task.is_spontaneous() && task.assigned_to.is_empty() {
            push_notification(
                state,
                NotificationKind::Claimable,
                format!(
                    "'{}' is up for grabs for {} tokens",
                    task.title, task.reward
                ),
                TargetRole::Member,
            );
        } else if !task.assigned_to.is_empty() {
            push_notification(
                state,
                NotificationKind::NewChore,
                format!("New chore assigned: '{}'", task.title),
                TargetRole::Member,
            );
        }

        state.tasks.push(task.clone());
        Ok(task)
    }

    /// Claims an open spontaneous pool task for `user_id`.
    pub fn claim_task(&self, state: &mut EconomyState, task_id: &str, user_id: &str) -> Result<()> {
        Self::ensure_user(state, user_id)?;
        let idx = Self::position(state, task_id)?;
        let task = &mut state.tasks[idx];
        if !task.is_spontaneous() || task.status != TaskStatus::Open {
            return Err(TaskError::NotClaimable(task_id.to_string()).into());
        }
        task.assigned_to.push(user_id.to_string());
        task.status = TaskStatus::Accepted;
        task.rejection_reason = None;
        Ok(())
    }

    /// Moves a task into the approval queue. Deliberately unguarded:
    /// resubmission after a rejection is the normal flow.
    pub fn submit_proof(
        &self,
        state: &mut EconomyState,
        task_id: &str,
        proof_url: &str,
    ) -> Result<()> {
        let idx = Self::position(state, task_id)?;
        let title = {
            let task = &mut state.tasks[idx];
            task.status = TaskStatus::Pending;
            task.proof_url = Some(proof_url.to_string());
            task.title.clone()
        };
        push_notification(
            state,
            NotificationKind::ApprovalRequested,
            format!("'{}' is waiting for approval", title),
            TargetRole::Admin,
        );
        Ok(())
    }

    /// Administrator approval, branching on what the task record is.
    ///
    /// Chores split the reward evenly (integer floor, remainder lost)
    /// across assignees, credit through the ledger primitive with the
    /// streak/XP/badge side effects, and complete. Financial requests
    /// settle and are removed from the list entirely.
    pub fn approve_task(&self, state: &mut EconomyState, task_id: &str) -> Result<()> {
        let idx = Self::position(state, task_id)?;
        let task = state.tasks[idx].clone();

        match &task.kind {
            TaskKind::Withdrawal => {
                let requester = task
                    .assigned_to
                    .first()
                    .cloned()
                    .ok_or_else(|| TaskError::NoAssignees(task.id.clone()))?;
                self.ledger.credit_raw(
                    state,
                    &requester,
                    task.reward,
                    &format!("Vault withdrawal released ({} tokens)", task.reward),
                )?;
                state.tasks.remove(idx);
                push_notification(
                    state,
                    NotificationKind::TaskApproved,
                    format!("Withdrawal of {} tokens was approved", task.reward),
                    TargetRole::Member,
                );
            }
            TaskKind::Cashout => {
                let requester = task
                    .assigned_to
                    .first()
                    .cloned()
                    .ok_or_else(|| TaskError::NoAssignees(task.id.clone()))?;
                let available = state
                    .users
                    .get(&requester)
                    .map(|u| u.tokens)
                    .ok_or_else(|| LedgerError::UnknownUser(requester.clone()))?;
                if available < task.reward {
                    // The requester spent the tokens in the meantime:
                    // the request is cancelled without fund movement.
                    state.tasks.remove(idx);
                    push_notification(
                        state,
                        NotificationKind::TaskRejected,
                        "Cash-out cancelled: not enough tokens left".to_string(),
                        TargetRole::Member,
                    );
                    return Err(LedgerError::InsufficientTokens {
                        needed: task.reward,
                        available,
                    }
                    .into());
                }
                self.ledger.debit_tokens(
                    state,
                    &requester,
                    task.reward,
                    &format!("Allowance cash-out ({} tokens)", task.reward),
                )?;
                state.tasks.remove(idx);
                push_notification(
                    state,
                    NotificationKind::TaskApproved,
                    format!("Cash-out of {} tokens was approved", task.reward),
                    TargetRole::Member,
                );
            }
            TaskKind::Chore { .. } => {
                if task.status == TaskStatus::Completed {
                    return Err(TaskError::AlreadyCompleted(task.id).into());
                }
                if task.status != TaskStatus::Pending {
                    return Err(TaskError::WrongStatus {
                        id: task.id,
                        status: task.status,
                        expected: TaskStatus::Pending,
                    }
                    .into());
                }
                if task.assigned_to.is_empty() {
                    return Err(TaskError::NoAssignees(task.id).into());
                }
                for assignee in &task.assigned_to {
                    Self::ensure_user(state, assignee)?;
                }

                // Integer floor split; the remainder is not distributed.
                let share = task.reward / task.assigned_to.len() as i64;
                for assignee in &task.assigned_to {
                    self.ledger.credit_tokens(
                        state,
                        assignee,
                        share,
                        &format!("Chore completed: {}", task.title),
                    )?;
                    if let Some(user) = state.users.get_mut(assignee) {
                        user.streak += 1;
                    }
                }

                let stored = &mut state.tasks[idx];
                stored.status = TaskStatus::Completed;
                stored.rejection_reason = None;
                push_notification(
                    state,
                    NotificationKind::TaskApproved,
                    format!("'{}' was approved", task.title),
                    TargetRole::Member,
                );
            }
        }
        Ok(())
    }

    /// Administrator rejection. Financial requests are removed (a
    /// withdrawal refunds the vault); chores fall back to their owner
    /// or the open pool, carrying the reason.
    pub fn reject_task(&self, state: &mut EconomyState, task_id: &str, reason: &str) -> Result<()> {
        let idx = Self::position(state, task_id)?;
        let task = state.tasks[idx].clone();

        match &task.kind {
            TaskKind::Withdrawal => {
                state.vault_balance += task.reward;
                state.tasks.remove(idx);
                push_notification(
                    state,
                    NotificationKind::TaskRejected,
                    format!("Withdrawal declined: {}", reason),
                    TargetRole::Member,
                );
            }
            TaskKind::Cashout => {
                // Cash-out never debited anything, so nothing to reverse.
                state.tasks.remove(idx);
                push_notification(
                    state,
                    NotificationKind::TaskRejected,
                    format!("Cash-out declined: {}", reason),
                    TargetRole::Member,
                );
            }
            TaskKind::Chore { .. } => {
                if task.status == TaskStatus::Completed {
                    return Err(TaskError::AlreadyCompleted(task.id).into());
                }
                if task.status != TaskStatus::Pending {
                    return Err(TaskError::WrongStatus {
                        id: task.id,
                        status: task.status,
                        expected: TaskStatus::Pending,
                    }
                    .into());
                }
                let stored = &mut state.tasks[idx];
                stored.status = if stored.assigned_to.is_empty() {
                    TaskStatus::Open
                } else {
                    TaskStatus::Accepted
                };
                stored.rejection_reason = Some(reason.to_string());
                push_notification(
                    state,
                    NotificationKind::TaskRejected,
                    format!("'{}' was rejected: {}", task.title, reason),
                    TargetRole::Member,
                );
            }
        }
        Ok(())
    }

    /// Proposes a different reward on an unclaimed pool task.
    pub fn submit_counter_offer(
        &self,
        state: &mut EconomyState,
        task_id: &str,
        user_id: &str,
        amount: i64,
        reason: &str,
    ) -> Result<()> {
        ensure_non_negative(amount)?;
        Self::ensure_user(state, user_id)?;
        let idx = Self::position(state, task_id)?;
        let title = {
            let task = &mut state.tasks[idx];
            if !task.is_spontaneous()
                || task.status != TaskStatus::Open
                || !task.assigned_to.is_empty()
            {
                return Err(TaskError::NotNegotiable(task_id.to_string()).into());
            }
            task.status = TaskStatus::Negotiating;
            task.proposed_by = Some(user_id.to_string());
            task.counter_offer_amount = Some(amount);
            task.counter_offer_reason = Some(reason.to_string());
            task.title.clone()
        };
        push_notification(
            state,
            NotificationKind::CounterOffer,
            format!("Counter-offer of {} tokens on '{}'", amount, title),
            TargetRole::Admin,
        );
        Ok(())
    }

    /// Accepts the pending counter-offer: the proposer takes the task
    /// at the proposed reward.
    pub fn accept_counter_offer(&self, state: &mut EconomyState, task_id: &str) -> Result<()> {
        let idx = Self::position(state, task_id)?;
        let title = {
            let task = &mut state.tasks[idx];
            if task.status != TaskStatus::Negotiating {
                return Err(TaskError::NotNegotiable(task_id.to_string()).into());
            }
            let proposer = task
                .proposed_by
                .clone()
                .ok_or_else(|| TaskError::NoProposer(task_id.to_string()))?;
            let amount = task
                .counter_offer_amount
                .ok_or_else(|| ValidationError::MissingField("counterOfferAmount".to_string()))?;
            task.assigned_to = vec![proposer];
            task.reward = amount;
            task.status = TaskStatus::Accepted;
            task.clear_negotiation();
            task.title.clone()
        };
        push_notification(
            state,
            NotificationKind::CounterOffer,
            format!("Counter-offer on '{}' was accepted", title),
            TargetRole::Member,
        );
        Ok(())
    }

    /// Declines the pending counter-offer and reopens the task.
    pub fn reject_counter_offer(
        &self,
        state: &mut EconomyState,
        task_id: &str,
        reason: &str,
    ) -> Result<()> {
        let idx = Self::position(state, task_id)?;
        let title = {
            let task = &mut state.tasks[idx];
            if task.status != TaskStatus::Negotiating {
                return Err(TaskError::NotNegotiable(task_id.to_string()).into());
            }
            task.status = TaskStatus::Open;
            task.clear_negotiation();
            task.title.clone()
        };
        push_notification(
            state,
            NotificationKind::CounterOfferRejected,
            format!("Counter-offer on '{}' was declined: {}", title, reason),
            TargetRole::Member,
        );
        Ok(())
    }
}

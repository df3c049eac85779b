use uuid::Uuid;

use crate::errors::{ensure_non_negative, Result};
use crate::ledger::{LedgerError, LedgerService};
use crate::market::MarketError;
use crate::notifications::{push_notification, NotificationKind, TargetRole};
use crate::state::EconomyState;

use super::users_errors::UserError;
use super::users_model::{NewUser, SavingsGoal, User};

/// Membership and savings-goal operations.
///
/// Users are appended at household-join time and never deleted. Goal
/// savings are reserved out of the spendable balance and flow back on
/// cancellation, so the two pools stay disjoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserService {
    ledger: LedgerService,
}

impl UserService {
    pub fn new(ledger: LedgerService) -> Self {
        UserService { ledger }
    }

    pub fn add_member(&self, state: &mut EconomyState, new_user: NewUser) -> Result<User> {
        let id = new_user.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        if state.users.contains_key(&id) {
            return Err(UserError::AlreadyMember(id).into());
        }
        let user = User {
            id: id.clone(),
            name: new_user.name,
            role: new_user.role,
            tokens: 0,
            streak: 0,
            xp: 0,
            level: 1,
            badges: Vec::new(),
            wishlist: Vec::new(),
            active_goal: None,
        };
        state.users.insert(id, user.clone());
        Ok(user)
    }

    pub fn add_to_wishlist(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        item_id: &str,
    ) -> Result<()> {
        let user = Self::get_mut(state, user_id)?;
        if !user.wishlist.iter().any(|i| i == item_id) {
            user.wishlist.push(item_id.to_string());
        }
        Ok(())
    }

    pub fn remove_from_wishlist(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        item_id: &str,
    ) -> Result<()> {
        let user = Self::get_mut(state, user_id)?;
        user.wishlist.retain(|i| i != item_id);
        Ok(())
    }

    /// Starts saving toward a market item. Replacing an existing goal
    /// refunds its reserved tokens first.
    pub fn set_active_goal(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        item_id: &str,
    ) -> Result<()> {
        let target_cost = state
            .market_items
            .iter()
            .find(|i| i.id == item_id)
            .map(|i| i.cost)
            .ok_or_else(|| MarketError::NotFound(item_id.to_string()))?;

        if Self::get_mut(state, user_id)?.active_goal.is_some() {
            self.cancel_active_goal(state, user_id)?;
        }
        let user = Self::get_mut(state, user_id)?;
        user.active_goal = Some(SavingsGoal {
            item_id: item_id.to_string(),
            target_cost,
            saved_tokens: 0,
        });
        Ok(())
    }

    /// Moves spendable tokens into the goal reservation.
    pub fn allocate_to_goal(
        &self,
        state: &mut EconomyState,
        user_id: &str,
        amount: i64,
    ) -> Result<()> {
        ensure_non_negative(amount)?;
        let user = Self::get_mut(state, user_id)?;
        if user.active_goal.is_none() {
            return Err(UserError::NoActiveGoal(user_id.to_string()).into());
        }
        self.ledger
            .debit_tokens(state, user_id, amount, "Saved toward goal")?;
        let user = Self::get_mut(state, user_id)?;
        if let Some(goal) = user.active_goal.as_mut() {
            goal.saved_tokens += amount;
        }
        Ok(())
    }

    /// Abandons the goal, refunding every reserved token.
    pub fn cancel_active_goal(&self, state: &mut EconomyState, user_id: &str) -> Result<()> {
        let goal = Self::get_mut(state, user_id)?
            .active_goal
            .take()
            .ok_or_else(|| UserError::NoActiveGoal(user_id.to_string()))?;
        self.ledger
            .credit_raw(state, user_id, goal.saved_tokens, "Goal cancelled, savings refunded")?;
        Ok(())
    }

    /// Completes a fully funded goal, consuming the reservation.
    pub fn complete_active_goal(&self, state: &mut EconomyState, user_id: &str) -> Result<String> {
        let user = Self::get_mut(state, user_id)?;
        let goal = user
            .active_goal
            .as_ref()
            .ok_or_else(|| UserError::NoActiveGoal(user_id.to_string()))?;
        if goal.saved_tokens < goal.target_cost {
            return Err(UserError::GoalNotFunded {
                target: goal.target_cost,
                saved: goal.saved_tokens,
            }
            .into());
        }
        let item_id = goal.item_id.clone();
        user.active_goal = None;
        user.wishlist.retain(|i| i != &item_id);
        push_notification(
            state,
            NotificationKind::GoalCompleted,
            format!("Savings goal for '{}' reached", item_id),
            TargetRole::All,
        );
        Ok(item_id)
    }

    fn get_mut<'a>(state: &'a mut EconomyState, user_id: &str) -> Result<&'a mut User> {
        state
            .users
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UnknownUser(user_id.to_string()).into())
    }
}

//! The command facade the presentation layer talks to.
//!
//! One [`EconomyEngine`] owns the state for one household and applies
//! commands synchronously, one at a time; each command either fully
//! applies or leaves the state untouched. Multi-writer deployments
//! must serialize commands per household before they reach this type.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::auction::{Auction, AuctionService};
use crate::errors::Result;
use crate::ledger::{LedgerService, Transaction};
use crate::market::{MarketItem, MarketService, NewMarketItem};
use crate::notifications::{Notification, NotificationService, TargetRole};
use crate::rewards::{RewardEntry, RewardService};
use crate::shop::{ShopService, ShopSlot};
use crate::state::EconomyState;
use crate::tasks::{NewTask, Task, TaskService};
use crate::users::{NewUser, User, UserService};
use crate::vault::{Bill, NewBill, VaultService};

pub struct EconomyEngine {
    state: EconomyState,
    users: UserService,
    ledger: LedgerService,
    tasks: TaskService,
    auction: AuctionService,
    shop: ShopService,
    market: MarketService,
    rewards: RewardService,
    vault: VaultService,
    notifications: NotificationService,
}

impl Default for EconomyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EconomyEngine {
    pub fn new() -> Self {
        Self::with_state(EconomyState::new())
    }

    /// Resumes from an externally persisted snapshot.
    pub fn with_state(state: EconomyState) -> Self {
        let ledger = LedgerService::new();
        EconomyEngine {
            state,
            users: UserService::new(ledger),
            ledger,
            tasks: TaskService::new(ledger),
            auction: AuctionService::new(),
            shop: ShopService::new(ledger),
            market: MarketService::new(ledger),
            rewards: RewardService::new(ledger),
            vault: VaultService::new(ledger),
            notifications: NotificationService::new(),
        }
    }

    // ===== Read model =====

    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.state.user(user_id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.state.users.values()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn approval_queue(&self) -> Vec<&Task> {
        self.state.approval_queue()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn market_items(&self) -> &[MarketItem] {
        &self.state.market_items
    }

    pub fn shop_slots(&self) -> &[ShopSlot] {
        &self.state.shop_slots
    }

    pub fn auction(&self) -> Option<&Auction> {
        self.state.auction.as_ref()
    }

    pub fn vault_balance(&self) -> i64 {
        self.state.vault_balance
    }

    pub fn bills(&self) -> &[Bill] {
        &self.state.bills
    }

    pub fn notifications_for(&self, role: TargetRole) -> Vec<&Notification> {
        self.notifications.notifications_for(&self.state, role)
    }

    // ===== Membership & goals =====

    pub fn add_member(&mut self, new_user: NewUser) -> Result<User> {
        self.users.add_member(&mut self.state, new_user)
    }

    pub fn add_to_wishlist(&mut self, user_id: &str, item_id: &str) -> Result<()> {
        self.users.add_to_wishlist(&mut self.state, user_id, item_id)
    }

    pub fn remove_from_wishlist(&mut self, user_id: &str, item_id: &str) -> Result<()> {
        self.users
            .remove_from_wishlist(&mut self.state, user_id, item_id)
    }

    pub fn set_active_goal(&mut self, user_id: &str, item_id: &str) -> Result<()> {
        self.users.set_active_goal(&mut self.state, user_id, item_id)
    }

    pub fn allocate_to_goal(&mut self, user_id: &str, amount: i64) -> Result<()> {
        self.users.allocate_to_goal(&mut self.state, user_id, amount)
    }

    pub fn cancel_active_goal(&mut self, user_id: &str) -> Result<()> {
        self.users.cancel_active_goal(&mut self.state, user_id)
    }

    pub fn complete_active_goal(&mut self, user_id: &str) -> Result<String> {
        self.users.complete_active_goal(&mut self.state, user_id)
    }

    // ===== Ledger =====

    pub fn credit_tokens(&mut self, user_id: &str, amount: i64, reason: &str) -> Result<i64> {
        self.ledger
            .credit_tokens(&mut self.state, user_id, amount, reason)
    }

    pub fn debit_tokens(&mut self, user_id: &str, amount: i64, reason: &str) -> Result<()> {
        self.ledger
            .debit_tokens(&mut self.state, user_id, amount, reason)
    }

    // ===== Tasks =====

    pub fn create_task(&mut self, new_task: NewTask) -> Result<Task> {
        self.tasks.create_task(&mut self.state, new_task)
    }

    pub fn claim_task(&mut self, task_id: &str, user_id: &str) -> Result<()> {
        self.tasks.claim_task(&mut self.state, task_id, user_id)
    }

    pub fn submit_proof(&mut self, task_id: &str, proof_url: &str) -> Result<()> {
        self.tasks.submit_proof(&mut self.state, task_id, proof_url)
    }

    pub fn approve_task(&mut self, task_id: &str) -> Result<()> {
        self.tasks.approve_task(&mut self.state, task_id)
    }

    pub fn reject_task(&mut self, task_id: &str, reason: &str) -> Result<()> {
        self.tasks.reject_task(&mut self.state, task_id, reason)
    }

    pub fn submit_counter_offer(
        &mut self,
        task_id: &str,
        user_id: &str,
        amount: i64,
        reason: &str,
    ) -> Result<()> {
        self.tasks
            .submit_counter_offer(&mut self.state, task_id, user_id, amount, reason)
    }

    pub fn accept_counter_offer(&mut self, task_id: &str) -> Result<()> {
        self.tasks.accept_counter_offer(&mut self.state, task_id)
    }

    pub fn reject_counter_offer(&mut self, task_id: &str, reason: &str) -> Result<()> {
        self.tasks
            .reject_counter_offer(&mut self.state, task_id, reason)
    }

    // ===== Auction =====

    pub fn start_auction(
        &mut self,
        item_name: &str,
        duration_secs: u32,
        starting_bid: i64,
    ) -> Result<()> {
        self.auction
            .start_auction(&mut self.state, item_name, duration_secs, starting_bid)
    }

    pub fn place_bid(&mut self, user_id: &str, amount: i64) -> Result<()> {
        self.auction.place_bid(&mut self.state, user_id, amount)
    }

    /// Called by the host scheduler roughly once per second.
    pub fn tick_auction(&mut self) {
        self.auction.tick_auction(&mut self.state)
    }

    // ===== Shop & market =====

    pub fn refresh_daily_shop<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<bool> {
        self.shop.refresh_daily_shop(&mut self.state, now, rng)
    }

    pub fn buy_shop_item(
        &mut self,
        buyer_id: &str,
        item_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.shop
            .buy_shop_item(&mut self.state, buyer_id, item_id, now)
    }

    pub fn add_market_item(&mut self, new_item: NewMarketItem) -> Result<MarketItem> {
        self.market.add_market_item(&mut self.state, new_item)
    }

    pub fn remove_market_item(&mut self, item_id: &str) -> Result<()> {
        self.market.remove_market_item(&mut self.state, item_id)
    }

    pub fn start_flash_sale(
        &mut self,
        item_id: &str,
        sale_price: i64,
        until: DateTime<Utc>,
    ) -> Result<()> {
        self.market
            .start_flash_sale(&mut self.state, item_id, sale_price, until)
    }

    pub fn end_flash_sale(&mut self, item_id: &str) -> Result<()> {
        self.market.end_flash_sale(&mut self.state, item_id)
    }

    pub fn redeem_market_item(
        &mut self,
        buyer_id: &str,
        item_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.market
            .redeem_market_item(&mut self.state, buyer_id, item_id, now)
    }

    // ===== Rewards =====

    pub fn spin_loot_box<R: Rng + ?Sized>(
        &mut self,
        user_id: &str,
        pool: &[RewardEntry],
        cost: i64,
        rng: &mut R,
    ) -> Result<RewardEntry> {
        self.rewards.spin(&mut self.state, user_id, pool, cost, rng)
    }

    // ===== Vault & bills =====

    pub fn deposit_to_vault(&mut self, user_id: &str, amount: i64) -> Result<()> {
        self.vault.deposit_to_vault(&mut self.state, user_id, amount)
    }

    pub fn withdraw_from_vault(&mut self, user_id: &str, amount: i64) -> Result<String> {
        self.vault
            .withdraw_from_vault(&mut self.state, user_id, amount)
    }

    pub fn request_allowance_cashout(&mut self, user_id: &str, amount: i64) -> Result<String> {
        self.vault
            .request_allowance_cashout(&mut self.state, user_id, amount)
    }

    pub fn apply_interest(&mut self) -> Result<i64> {
        self.vault.apply_interest(&mut self.state)
    }

    pub fn set_interest_rate(&mut self, rate: Decimal) -> Result<()> {
        self.vault.set_interest_rate(&mut self.state, rate)
    }

    pub fn add_bill(&mut self, new_bill: NewBill) -> Result<Bill> {
        self.vault.add_bill(&mut self.state, new_bill)
    }

    pub fn remove_bill(&mut self, bill_id: &str) -> Result<()> {
        self.vault.remove_bill(&mut self.state, bill_id)
    }

    pub fn process_bills(&mut self) -> Result<()> {
        self.vault.process_bills(&mut self.state)
    }

    pub fn transfer_tokens(
        &mut self,
        from_user_id: &str,
        to_user_id: &str,
        amount: i64,
        memo: &str,
    ) -> Result<()> {
        self.vault
            .transfer_tokens(&mut self.state, from_user_id, to_user_id, amount, memo)
    }

    // ===== Notifications =====

    pub fn mark_notification_read(&mut self, notification_id: &str) -> Result<()> {
        self.notifications.mark_read(&mut self.state, notification_id)
    }

    pub fn clear_read_notifications(&mut self) {
        self.notifications.clear_read(&mut self.state)
    }
}

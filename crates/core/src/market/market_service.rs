use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{ensure_non_negative, Result};
use crate::ledger::LedgerService;
use crate::notifications::{push_notification, NotificationKind, TargetRole};
use crate::state::EconomyState;

use super::market_errors::MarketError;
use super::market_model::{MarketItem, NewMarketItem};

/// Administrator CRUD over market rewards, flash-sale windows, and
/// member redemptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketService {
    ledger: LedgerService,
}

impl MarketService {
    pub fn new(ledger: LedgerService) -> Self {
        MarketService { ledger }
    }

    pub fn add_market_item(
        &self,
        state: &mut EconomyState,
        new_item: NewMarketItem,
    ) -> Result<MarketItem> {
        ensure_non_negative(new_item.cost)?;
        let item = MarketItem {
            id: new_item.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_item.name,
            cost: new_item.cost,
            original_cost: None,
            sale_until: None,
        };
        state.market_items.push(item.clone());
        Ok(item)
    }

    pub fn remove_market_item(&self, state: &mut EconomyState, item_id: &str) -> Result<()> {
        let before = state.market_items.len();
        state.market_items.retain(|i| i.id != item_id);
        if state.market_items.len() == before {
            return Err(MarketError::NotFound(item_id.to_string()).into());
        }
        Ok(())
    }

    /// Puts an item on sale until the given instant. Starting a new
    /// sale on an already-discounted item keeps the first regular
    /// price on record.
    pub fn start_flash_sale(
        &self,
        state: &mut EconomyState,
        item_id: &str,
        sale_price: i64,
        until: DateTime<Utc>,
    ) -> Result<()> {
        ensure_non_negative(sale_price)?;
        let item = Self::get_mut(state, item_id)?;
        if item.original_cost.is_none() {
            item.original_cost = Some(item.cost);
        }
        item.cost = sale_price;
        item.sale_until = Some(until);
        Ok(())
    }

    pub fn end_flash_sale(&self, state: &mut EconomyState, item_id: &str) -> Result<()> {
        let item = Self::get_mut(state, item_id)?;
        if let Some(original) = item.original_cost.take() {
            item.cost = original;
        }
        item.sale_until = None;
        Ok(())
    }

    /// Redeems a market reward at its sale-aware price.
    pub fn redeem_market_item(
        &self,
        state: &mut EconomyState,
        buyer_id: &str,
        item_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let (name, price) = state
            .market_items
            .iter()
            .find(|i| i.id == item_id)
            .map(|i| (i.name.clone(), i.effective_cost(now)))
            .ok_or_else(|| MarketError::NotFound(item_id.to_string()))?;
        self.ledger
            .debit_tokens(state, buyer_id, price, &format!("Reward redeemed: {}", name))?;
        push_notification(
            state,
            NotificationKind::Purchase,
            format!("'{}' was redeemed for {} tokens", name, price),
            TargetRole::Admin,
        );
        Ok(())
    }

    fn get_mut<'a>(state: &'a mut EconomyState, item_id: &str) -> Result<&'a mut MarketItem> {
        state
            .market_items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| MarketError::NotFound(item_id.to_string()).into())
    }
}

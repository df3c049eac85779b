use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{
    COMMON_EXPIRY_HOURS, LEGENDARY_EXPIRY_HOURS, LEGENDARY_INCLUDE_CHANCE, LEGENDARY_STOCK,
    RARE_CANDIDATES_PER_CATEGORY, RARE_EXPIRY_HOURS, RARE_INCLUDE_CHANCE,
    SHOP_REFRESH_WINDOW_HOURS, UNCOMMON_CANDIDATES_PER_CATEGORY, UNCOMMON_EXPIRY_HOURS,
    UNCOMMON_INCLUDE_CHANCE,
};
use crate::errors::Result;
use crate::ledger::LedgerService;
use crate::notifications::{push_notification, NotificationKind, TargetRole};
use crate::state::EconomyState;

use super::shop_errors::ShopError;
use super::shop_model::{CatalogItem, ItemTier, ShopCategory, ShopSlot};

/// Daily rotation and purchase flow for the reward shop.
///
/// The rotation is probabilistic per tier; callers inject the RNG so
/// tests can pin the draw sequence. The core never schedules the
/// refresh itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShopService {
    ledger: LedgerService,
}

impl ShopService {
    pub fn new(ledger: LedgerService) -> Self {
        ShopService { ledger }
    }

    /// Rebuilds the slot set from the catalog. A no-op (returning
    /// `false`) while the previous rotation is under 24 hours old and
    /// still has slots.
    pub fn refresh_daily_shop<R: Rng + ?Sized>(
        &self,
        state: &mut EconomyState,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<bool> {
        if let Some(last) = state.last_shop_refresh {
            let fresh = now - last < Duration::hours(SHOP_REFRESH_WINDOW_HOURS);
            if fresh && !state.shop_slots.is_empty() {
                log::debug!("shop rotation still fresh, skipping refresh");
                return Ok(false);
            }
        }

        let mut slots = Vec::new();

        // Commons are always stocked.
        for item in state.catalog.iter().filter(|i| i.tier == ItemTier::Common) {
            slots.push(Self::mint_slot(item, item.max_stock, now, COMMON_EXPIRY_HOURS));
        }

        for category in ShopCategory::ALL {
            let uncommons = Self::tier_pool(&state.catalog, category, ItemTier::Uncommon);
            for item in
                uncommons.choose_multiple(rng, UNCOMMON_CANDIDATES_PER_CATEGORY)
            {
                if rng.gen_bool(UNCOMMON_INCLUDE_CHANCE) {
                    slots.push(Self::mint_slot(
                        item,
                        item.max_stock,
                        now,
                        UNCOMMON_EXPIRY_HOURS,
                    ));
                }
            }

            let rares = Self::tier_pool(&state.catalog, category, ItemTier::Rare);
            for item in rares.choose_multiple(rng, RARE_CANDIDATES_PER_CATEGORY) {
                if rng.gen_bool(RARE_INCLUDE_CHANCE) {
                    slots.push(Self::mint_slot(item, item.max_stock, now, RARE_EXPIRY_HOURS));
                }
            }

            // One roll per category decides whether a legendary shows
            // up at all; its stock is always a single unit.
            if rng.gen_bool(LEGENDARY_INCLUDE_CHANCE) {
                let legendaries = Self::tier_pool(&state.catalog, category, ItemTier::Legendary);
                if let Some(item) = legendaries.choose(rng) {
                    slots.push(Self::mint_slot(item, LEGENDARY_STOCK, now, LEGENDARY_EXPIRY_HOURS));
                }
            }
        }

        state.shop_slots = slots;
        state.last_shop_refresh = Some(now);
        push_notification(
            state,
            NotificationKind::ShopRefreshed,
            "The shop has restocked".to_string(),
            TargetRole::All,
        );
        Ok(true)
    }

    /// Buys one unit from a live slot: debits the buyer, decrements
    /// stock, and credits any embedded token bonus in the same
    /// operation.
    pub fn buy_shop_item(
        &self,
        state: &mut EconomyState,
        buyer_id: &str,
        item_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let slot_idx = state
            .shop_slots
            .iter()
            .position(|s| s.item_id == item_id)
            .ok_or_else(|| ShopError::SlotNotFound(item_id.to_string()))?;
        {
            let slot = &state.shop_slots[slot_idx];
            if now > slot.expires_at {
                return Err(ShopError::SlotExpired(item_id.to_string()).into());
            }
            if slot.stock == 0 {
                return Err(ShopError::OutOfStock(item_id.to_string()).into());
            }
        }
        let item = state
            .catalog
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| ShopError::UnknownCatalogItem(item_id.to_string()))?;

        // Debit first so an insufficient balance mutates nothing.
        self.ledger.debit_tokens(
            state,
            buyer_id,
            item.cost,
            &format!("Shop purchase: {}", item.name),
        )?;
        state.shop_slots[slot_idx].stock -= 1;

        if let Some(bonus) = item.embedded_token_bonus() {
            self.ledger.credit_raw(
                state,
                buyer_id,
                bonus,
                &format!("Token pack opened: {}", item.name),
            )?;
        }

        push_notification(
            state,
            NotificationKind::Purchase,
            format!("'{}' was bought from the shop", item.name),
            TargetRole::Admin,
        );
        Ok(())
    }

    fn tier_pool(
        catalog: &[CatalogItem],
        category: ShopCategory,
        tier: ItemTier,
    ) -> Vec<CatalogItem> {
        catalog
            .iter()
            .filter(|i| i.category == category && i.tier == tier)
            .cloned()
            .collect()
    }

    fn mint_slot(
        item: &CatalogItem,
        stock: u32,
        now: DateTime<Utc>,
        expiry_hours: i64,
    ) -> ShopSlot {
        ShopSlot {
            item_id: item.id.clone(),
            stock,
            expires_at: now + Duration::hours(expiry_hours),
        }
    }
}

//! Shop domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog category, rotated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShopCategory {
    Merch,
    System,
}

impl ShopCategory {
    pub const ALL: [ShopCategory; 2] = [ShopCategory::Merch, ShopCategory::System];
}

/// Rarity tier driving rotation probability, stock, and slot lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemTier {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Static catalog definition an administrator curates. Slots are
/// minted from these on every rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub category: ShopCategory,
    pub tier: ItemTier,
    pub cost: i64,
    /// Stock a freshly minted slot starts with.
    pub max_stock: u32,
}

impl CatalogItem {
    /// Token packs embed their payout in the display name and carry
    /// `tokens` in their id (e.g. `tokens-small` / "Pouch of 50
    /// tokens"). Buying one credits the parsed amount back.
    pub fn embedded_token_bonus(&self) -> Option<i64> {
        if !self.id.contains("tokens") {
            return None;
        }
        let mut digits = String::new();
        for c in self.name.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if !digits.is_empty() {
                break;
            }
        }
        digits.parse().ok()
    }
}

/// Live purchasable instance of a catalog item. Stock only decreases;
/// a slot past its expiry is inert even before it is purged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSlot {
    pub item_id: String,
    pub stock: u32,
    pub expires_at: DateTime<Utc>,
}

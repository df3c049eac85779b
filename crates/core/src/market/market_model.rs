//! Market domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Administrator-defined reward. While a flash sale runs, `cost` is
/// the discounted price and `original_cost` remembers the regular one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketItem {
    pub id: String,
    pub name: String,
    pub cost: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_until: Option<DateTime<Utc>>,
}

impl MarketItem {
    /// Price at `now`: the sale price inside the window, the regular
    /// price once it lapses.
    pub fn effective_cost(&self, now: DateTime<Utc>) -> i64 {
        match self.sale_until {
            Some(until) if now < until => self.cost,
            Some(_) => self.original_cost.unwrap_or(self.cost),
            None => self.cost,
        }
    }
}

/// Input model for adding a market item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketItem {
    pub id: Option<String>,
    pub name: String,
    pub cost: i64,
}

//! Auction domain model.

use serde::{Deserialize, Serialize};

/// The household's single auction. At most one is active at a time;
/// a finished auction stays readable until the next one starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub item_name: String,
    /// Monotonically non-decreasing while the auction is active.
    pub highest_bid: i64,
    pub highest_bidder: Option<String>,
    /// Seconds remaining. Decremented only by external ticks.
    pub time_left: u32,
    pub is_active: bool,
}

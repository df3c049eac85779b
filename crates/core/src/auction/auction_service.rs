use crate::constants::ANTI_SNIPE_FLOOR_SECS;
use crate::errors::{ensure_non_negative, Result};
use crate::ledger::LedgerError;
use crate::notifications::{push_notification, NotificationKind, TargetRole};
use crate::state::EconomyState;

use super::auction_errors::AuctionError;
use super::auction_model::Auction;

/// Bidding protocol over the singleton auction.
///
/// Tokens are checked at bid time but never escrowed, and the
/// countdown only moves when an external caller ticks it. Settlement
/// is an administrator workflow; the result here is informational.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuctionService;

impl AuctionService {
    pub fn new() -> Self {
        AuctionService
    }

    pub fn start_auction(
        &self,
        state: &mut EconomyState,
        item_name: &str,
        duration_secs: u32,
        starting_bid: i64,
    ) -> Result<()> {
        ensure_non_negative(starting_bid)?;
        if state.auction.as_ref().is_some_and(|a| a.is_active) {
            return Err(AuctionError::AlreadyActive.into());
        }
        state.auction = Some(Auction {
            item_name: item_name.to_string(),
            highest_bid: starting_bid,
            highest_bidder: None,
            time_left: duration_secs,
            is_active: true,
        });
        push_notification(
            state,
            NotificationKind::AuctionStarted,
            format!(
                "Auction for '{}' started at {} tokens",
                item_name, starting_bid
            ),
            TargetRole::All,
        );
        Ok(())
    }

    /// Places a bid. The bid must strictly beat the current highest and
    /// fit within the bidder's balance. A bid landing under the
    /// anti-sniping floor raises the countdown to exactly that floor.
    pub fn place_bid(&self, state: &mut EconomyState, user_id: &str, amount: i64) -> Result<()> {
        let available = state
            .users
            .get(user_id)
            .map(|u| u.tokens)
            .ok_or_else(|| LedgerError::UnknownUser(user_id.to_string()))?;

        let auction = state
            .auction
            .as_mut()
            .filter(|a| a.is_active)
            .ok_or(AuctionError::NotActive)?;
        if amount <= auction.highest_bid {
            return Err(AuctionError::BidTooLow {
                bid: amount,
                highest: auction.highest_bid,
            }
            .into());
        }
        if available < amount {
            return Err(LedgerError::InsufficientTokens {
                needed: amount,
                available,
            }
            .into());
        }

        auction.highest_bid = amount;
        auction.highest_bidder = Some(user_id.to_string());
        if auction.time_left < ANTI_SNIPE_FLOOR_SECS {
            auction.time_left = ANTI_SNIPE_FLOOR_SECS;
        }
        let item_name = auction.item_name.clone();
        push_notification(
            state,
            NotificationKind::BidPlaced,
            format!("New highest bid of {} tokens on '{}'", amount, item_name),
            TargetRole::All,
        );
        Ok(())
    }

    /// Advances the countdown by one second. Called by an external
    /// scheduler roughly once per second; a no-op when nothing is
    /// running. Performs no token settlement.
    pub fn tick_auction(&self, state: &mut EconomyState) {
        let ended = match state.auction.as_mut().filter(|a| a.is_active) {
            Some(auction) if auction.time_left > 0 => {
                auction.time_left -= 1;
                if auction.time_left == 0 {
                    auction.is_active = false;
                    Some((auction.item_name.clone(), auction.highest_bidder.clone()))
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some((item_name, winner)) = ended {
            let message = match winner {
                Some(bidder) => format!("Auction for '{}' ended, won by {}", item_name, bidder),
                None => format!("Auction for '{}' ended with no bids", item_name),
            };
            log::debug!("{}", message);
            push_notification(state, NotificationKind::AuctionEnded, message, TargetRole::All);
        }
    }
}

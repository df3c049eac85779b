use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;

use hearthledger_core::engine::EconomyEngine;
use hearthledger_core::market::NewMarketItem;
use hearthledger_core::state::EconomyState;
use hearthledger_core::shop::{CatalogItem, ItemTier, ShopCategory};
use hearthledger_core::tasks::{NewTask, TaskStatus, TaskType};
use hearthledger_core::users::{NewUser, Role};
use hearthledger_core::vault::NewBill;

fn member(id: &str, name: &str) -> NewUser {
    NewUser {
        id: Some(id.to_string()),
        name: name.to_string(),
        role: Role::Member,
    }
}

/// One week in the life of a household, run through the full command
/// surface: chores earn tokens, the shop and market spend them, the
/// vault holds shared savings, and bills and transfers move them
/// around.
#[test]
fn test_household_week_end_to_end() {
    let mut seed_state = EconomyState::new();
    seed_state.catalog.push(CatalogItem {
        id: "sticker".to_string(),
        name: "Holo sticker".to_string(),
        category: ShopCategory::Merch,
        tier: ItemTier::Common,
        cost: 5,
        max_stock: 10,
    });
    let mut engine = EconomyEngine::with_state(seed_state);
    let mut rng = StdRng::seed_from_u64(7);

    engine
        .add_member(NewUser {
            id: Some("mom".to_string()),
            name: "Mom".to_string(),
            role: Role::Admin,
        })
        .unwrap();
    engine.add_member(member("ana", "Ana")).unwrap();
    engine.add_member(member("ben", "Ben")).unwrap();

    // --- Chores: assigned regular chore, approved, pays the reward. ---
    let dishes = engine
        .create_task(NewTask {
            title: "Do the dishes".to_string(),
            reward: Some(30),
            task_type: TaskType::Regular,
            frequency: Some("daily".to_string()),
            assigned_to: vec!["ana".to_string()],
        })
        .unwrap();
    engine.submit_proof(&dishes.id, "photo://dishes.jpg").unwrap();
    assert_eq!(engine.approval_queue().len(), 1);
    engine.approve_task(&dishes.id).unwrap();

    let ana = engine.user("ana").unwrap();
    assert_eq!(ana.tokens, 30);
    assert_eq!(ana.streak, 1);
    assert_eq!(ana.xp, 300);

    // --- Negotiation: spontaneous task countered and accepted. ---
    let lawn = engine
        .create_task(NewTask {
            title: "Mow the lawn".to_string(),
            reward: Some(40),
            task_type: TaskType::Spontaneous,
            frequency: None,
            assigned_to: Vec::new(),
        })
        .unwrap();
    engine
        .submit_counter_offer(&lawn.id, "ben", 55, "The grass is knee-high")
        .unwrap();
    engine.accept_counter_offer(&lawn.id).unwrap();
    engine.submit_proof(&lawn.id, "photo://lawn.jpg").unwrap();
    engine.approve_task(&lawn.id).unwrap();
    assert_eq!(engine.user("ben").unwrap().tokens, 55);

    // --- Market: admin lists a reward, a flash sale cuts its price. ---
    let movie = engine
        .add_market_item(NewMarketItem {
            id: Some("movie-night".to_string()),
            name: "Pick the movie on Friday".to_string(),
            cost: 25,
        })
        .unwrap();
    let sale_end = Utc::now() + chrono::Duration::hours(2);
    engine.start_flash_sale(&movie.id, 15, sale_end).unwrap();
    engine
        .redeem_market_item("ben", &movie.id, Utc::now())
        .unwrap();
    assert_eq!(engine.user("ben").unwrap().tokens, 40);

    // --- Shop: rotation always stocks commons, purchases debit. ---
    let now = Utc::now();
    assert!(engine.refresh_daily_shop(now, &mut rng).unwrap());
    assert!(!engine.shop_slots().is_empty());
    engine.buy_shop_item("ana", "sticker", now).unwrap();
    assert_eq!(engine.user("ana").unwrap().tokens, 25);

    // --- Vault: deposits, interest, and the two-phase withdrawal. ---
    engine.deposit_to_vault("ana", 20).unwrap();
    engine.deposit_to_vault("ben", 30).unwrap();
    assert_eq!(engine.vault_balance(), 50);

    engine.set_interest_rate(dec!(0.1)).unwrap();
    assert_eq!(engine.apply_interest().unwrap(), 5);
    assert_eq!(engine.vault_balance(), 55);

    let withdrawal = engine.withdraw_from_vault("ana", 10).unwrap();
    assert_eq!(engine.vault_balance(), 45);
    engine.approve_task(&withdrawal).unwrap();
    assert_eq!(engine.user("ana").unwrap().tokens, 15);
    assert!(engine.tasks().iter().all(|t| t.id != withdrawal));

    // --- Bills and transfers. ---
    engine
        .add_bill(NewBill {
            title: "Streaming".to_string(),
            amount: 5,
            frequency: "weekly".to_string(),
        })
        .unwrap();
    engine.process_bills().unwrap();
    assert_eq!(engine.user("ana").unwrap().tokens, 10);
    assert_eq!(engine.user("ben").unwrap().tokens, 5);

    engine
        .transfer_tokens("ana", "ben", 5, "movie snacks")
        .unwrap();
    assert_eq!(engine.user("ana").unwrap().tokens, 5);
    assert_eq!(engine.user("ben").unwrap().tokens, 10);

    // --- Auction: anti-snipe bump and natural expiry. ---
    engine.start_auction("Front seat for a week", 120, 1).unwrap();
    engine.place_bid("ben", 4).unwrap();
    for _ in 0..120 {
        engine.tick_auction();
    }
    let auction = engine.auction().unwrap();
    assert!(!auction.is_active);
    assert_eq!(auction.highest_bidder.as_deref(), Some("ben"));

    // Winning an auction never escrowed tokens.
    assert_eq!(engine.user("ben").unwrap().tokens, 10);

    // The ledger saw every movement, newest first.
    assert!(!engine.transactions().is_empty());
    let statuses: Vec<TaskStatus> = engine.tasks().iter().map(|t| t.status).collect();
    assert!(statuses.iter().all(|s| *s == TaskStatus::Completed));
}

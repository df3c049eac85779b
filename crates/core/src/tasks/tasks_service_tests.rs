use crate::ledger::LedgerService;
use crate::state::EconomyState;
use crate::tasks::{NewTask, TaskService, TaskStatus, TaskType};
use crate::users::{Role, User};

fn user(id: &str, role: Role, tokens: i64) -> User {
    User {
        id: id.to_string(),
        name: id.to_string(),
        role,
        tokens,
        streak: 0,
        xp: 0,
        level: 1,
        badges: Vec::new(),
        wishlist: Vec::new(),
        active_goal: None,
    }
}

fn setup() -> (EconomyState, TaskService) {
    let mut state = EconomyState::new();
    state.users.insert("mom".to_string(), user("mom", Role::Admin, 0));
    state.users.insert("ana".to_string(), user("ana", Role::Member, 0));
    state.users.insert("ben".to_string(), user("ben", Role::Member, 0));
    (state, TaskService::new(LedgerService::new()))
}

fn pool_task(title: &str, reward: Option<i64>) -> NewTask {
    NewTask {
        title: title.to_string(),
        reward,
        task_type: TaskType::Spontaneous,
        frequency: None,
        assigned_to: Vec::new(),
    }
}

#[test]
fn test_create_task_defaults() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Rake leaves", None)).unwrap();

    assert_eq!(task.reward, 10);
    assert_eq!(task.status, TaskStatus::Open);
    assert!(task.assigned_to.is_empty());
    assert!(!task.id.is_empty());
}

#[test]
fn test_create_task_validation() {
    let (mut state, service) = setup();
    assert!(service.create_task(&mut state, pool_task("  ", None)).is_err());
    assert!(service.create_task(&mut state, pool_task("Ok", Some(-5))).is_err());

    let mut assigned = pool_task("Ok", None);
    assigned.assigned_to = vec!["ghost".to_string()];
    assert!(service.create_task(&mut state, assigned).is_err());
    assert!(state.tasks.is_empty());
}

#[test]
fn test_claim_legal_only_for_open_spontaneous() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Rake leaves", None)).unwrap();

    service.claim_task(&mut state, &task.id, "ana").unwrap();
    {
        let stored = state.task(&task.id).unwrap();
        assert_eq!(stored.status, TaskStatus::Accepted);
        assert_eq!(stored.assigned_to, vec!["ana".to_string()]);
    }

    // Already claimed: no longer open.
    assert!(service.claim_task(&mut state, &task.id, "ben").is_err());

    let regular = service
        .create_task(
            &mut state,
            NewTask {
                title: "Dishes".to_string(),
                reward: None,
                task_type: TaskType::Regular,
                frequency: Some("daily".to_string()),
                assigned_to: vec!["ben".to_string()],
            },
        )
        .unwrap();
    assert!(service.claim_task(&mut state, &regular.id, "ana").is_err());
}

#[test]
fn test_submit_proof_always_legal() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Rake leaves", None)).unwrap();

    service.submit_proof(&mut state, &task.id, "photo://1").unwrap();
    assert_eq!(state.task(&task.id).unwrap().status, TaskStatus::Pending);

    // Resubmission over pending is the normal flow, not an error.
    service.submit_proof(&mut state, &task.id, "photo://2").unwrap();
    assert_eq!(
        state.task(&task.id).unwrap().proof_url.as_deref(),
        Some("photo://2")
    );
}

#[test]
fn test_approve_credits_and_completes() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Rake leaves", Some(30))).unwrap();
    service.claim_task(&mut state, &task.id, "ana").unwrap();
    service.submit_proof(&mut state, &task.id, "photo://1").unwrap();

    service.approve_task(&mut state, &task.id).unwrap();
    let stored = state.task(&task.id).unwrap();
    assert_eq!(stored.status, TaskStatus::Completed);
    let ana = &state.users["ana"];
    assert_eq!(ana.tokens, 30);
    assert_eq!(ana.streak, 1);
    assert_eq!(ana.xp, 300);
}

#[test]
fn test_split_reward_floor_conservation() {
    let (mut state, service) = setup();
    let task = service
        .create_task(
            &mut state,
            NewTask {
                title: "Clean garage".to_string(),
                reward: Some(25),
                task_type: TaskType::Regular,
                frequency: None,
                assigned_to: vec!["ana".to_string(), "ben".to_string()],
            },
        )
        .unwrap();
    service.submit_proof(&mut state, &task.id, "photo://1").unwrap();
    service.approve_task(&mut state, &task.id).unwrap();

    // floor(25 / 2) = 12 each; the remainder token is lost.
    assert_eq!(state.users["ana"].tokens, 12);
    assert_eq!(state.users["ben"].tokens, 12);
}

#[test]
fn test_completed_tasks_are_terminal() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Rake leaves", None)).unwrap();
    service.claim_task(&mut state, &task.id, "ana").unwrap();
    service.submit_proof(&mut state, &task.id, "p").unwrap();
    service.approve_task(&mut state, &task.id).unwrap();

    assert!(service.approve_task(&mut state, &task.id).is_err());
    assert!(service.reject_task(&mut state, &task.id, "nope").is_err());
    assert_eq!(state.users["ana"].tokens, 10);
}

#[test]
fn test_reject_claimed_task_reverts_to_accepted() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Rake leaves", None)).unwrap();
    service.claim_task(&mut state, &task.id, "ana").unwrap();
    service.submit_proof(&mut state, &task.id, "p").unwrap();

    service.reject_task(&mut state, &task.id, "Half the yard left").unwrap();
    let stored = state.task(&task.id).unwrap();
    assert_eq!(stored.status, TaskStatus::Accepted);
    assert_eq!(stored.rejection_reason.as_deref(), Some("Half the yard left"));
    assert_eq!(state.users["ana"].tokens, 0);
}

#[test]
fn test_reject_unassigned_task_reopens() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Rake leaves", None)).unwrap();
    // Proof on an unclaimed pool task still lands in the queue.
    service.submit_proof(&mut state, &task.id, "p").unwrap();

    service.reject_task(&mut state, &task.id, "Who did this?").unwrap();
    assert_eq!(state.task(&task.id).unwrap().status, TaskStatus::Open);
}

#[test]
fn test_rejection_reason_cleared_on_reclaim_and_approval() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Rake leaves", None)).unwrap();
    service.submit_proof(&mut state, &task.id, "p").unwrap();
    service.reject_task(&mut state, &task.id, "redo").unwrap();

    service.claim_task(&mut state, &task.id, "ana").unwrap();
    assert!(state.task(&task.id).unwrap().rejection_reason.is_none());

    service.submit_proof(&mut state, &task.id, "p2").unwrap();
    service.approve_task(&mut state, &task.id).unwrap();
    assert!(state.task(&task.id).unwrap().rejection_reason.is_none());
}

#[test]
fn test_negotiation_accept_round_trip() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Shovel snow", Some(20))).unwrap();

    service
        .submit_counter_offer(&mut state, &task.id, "ben", 35, "It's a long driveway")
        .unwrap();
    {
        let stored = state.task(&task.id).unwrap();
        assert_eq!(stored.status, TaskStatus::Negotiating);
        assert_eq!(stored.proposed_by.as_deref(), Some("ben"));
        assert_eq!(stored.counter_offer_amount, Some(35));
    }

    service.accept_counter_offer(&mut state, &task.id).unwrap();
    let stored = state.task(&task.id).unwrap();
    assert_eq!(stored.status, TaskStatus::Accepted);
    assert_eq!(stored.assigned_to, vec!["ben".to_string()]);
    assert_eq!(stored.reward, 35);
    assert!(stored.proposed_by.is_none());
    assert!(stored.counter_offer_amount.is_none());
    assert!(stored.counter_offer_reason.is_none());
}

#[test]
fn test_negotiation_reject_round_trip() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Shovel snow", Some(20))).unwrap();
    service
        .submit_counter_offer(&mut state, &task.id, "ben", 35, "Too cheap")
        .unwrap();

    service.reject_counter_offer(&mut state, &task.id, "20 is fair").unwrap();
    let stored = state.task(&task.id).unwrap();
    assert_eq!(stored.status, TaskStatus::Open);
    assert!(stored.proposed_by.is_none());
    assert!(stored.counter_offer_amount.is_none());
    assert!(stored.counter_offer_reason.is_none());
    assert_eq!(stored.reward, 20);
}

#[test]
fn test_counter_offer_requires_unclaimed_pool_task() {
    let (mut state, service) = setup();
    let task = service.create_task(&mut state, pool_task("Shovel snow", None)).unwrap();
    service.claim_task(&mut state, &task.id, "ana").unwrap();

    assert!(service
        .submit_counter_offer(&mut state, &task.id, "ben", 35, "mine now")
        .is_err());
    assert!(service.accept_counter_offer(&mut state, &task.id).is_err());
}

#[test]
fn test_streak_multiplier_applies_on_approval() {
    let (mut state, service) = setup();
    state.users.get_mut("ana").unwrap().streak = 7;
    let task = service.create_task(&mut state, pool_task("Rake leaves", Some(10))).unwrap();
    service.claim_task(&mut state, &task.id, "ana").unwrap();
    service.submit_proof(&mut state, &task.id, "p").unwrap();
    service.approve_task(&mut state, &task.id).unwrap();

    let ana = &state.users["ana"];
    assert_eq!(ana.tokens, 12);
    assert_eq!(ana.streak, 8);
}

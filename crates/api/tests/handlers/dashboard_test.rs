use axum::http::StatusCode;
use gym_api::{
    notify::{DataChanged, EntityKind},
    reminder::{refresh, ReminderTracker},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{date, TestContext};

async fn seed(ctx: &TestContext) {
    for (name, end) in [("soon", "2024-06-15"), ("gone", "2024-06-01"), ("fine", "2024-12-31")] {
        ctx.server
            .post("/api/annual-card-members")
            .json(&json!({ "name": name, "phone": "139", "start_date": "2024-01-01", "end_date": end }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    for (name, total) in [("low", 2), ("plenty", 30)] {
        ctx.server
            .post("/api/private-training-members")
            .json(&json!({ "name": name, "phone": "138", "total_sessions": total }))
            .await
            .assert_status(StatusCode::CREATED);
    }
}

#[test_log::test(tokio::test)]
async fn test_dashboard_snapshot() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    seed(&ctx).await;

    let response = ctx.server.get("/api/dashboard").await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["today"], "2024-06-14");
    assert_eq!(body["expiring_days"], 3);
    assert_eq!(body["annual_card_member_count"], 3);
    assert_eq!(body["private_training_member_count"], 2);
    assert_eq!(body["coach_count"], 0);
    assert_eq!(body["annual_card_expiring_count"], 1);
    assert_eq!(body["annual_card_expired_count"], 1);
    assert_eq!(body["low_remaining_sessions_count"], 1);
    assert_eq!(body["expiring_annual_cards"][0]["name"], "soon");
    assert_eq!(body["low_remaining_sessions_members"][0]["name"], "low");
}

#[test_log::test(tokio::test)]
async fn test_mutations_publish_change_events() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let mut changes = ctx.state.notifier.subscribe();

    ctx.server
        .post("/api/coaches")
        .json(&json!({ "employee_no": "C001", "name": "Alice" }))
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(changes.try_recv().unwrap(), DataChanged { entity: EntityKind::Coach });

    // Failed mutations publish nothing
    ctx.server
        .post("/api/coaches")
        .json(&json!({ "employee_no": "C001", "name": "Alice" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(changes.try_recv().is_err());

    // Reads publish nothing
    ctx.server.get("/api/dashboard").await.assert_status_ok();
    assert!(changes.try_recv().is_err());
}

#[test_log::test(tokio::test)]
async fn test_reminder_fires_once_per_day() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    seed(&ctx).await;

    let mut tracker = ReminderTracker::default();
    let snapshot = refresh(&ctx.state, &mut tracker).await.unwrap();
    assert_eq!(snapshot.annual_card_expiring_count, 1);

    // Already reminded today
    assert!(!tracker.should_remind(date(2024, 6, 14), &snapshot));
    assert!(tracker.should_remind(date(2024, 6, 15), &snapshot));
}

#[test]
fn test_no_reminder_without_expiring_cards() {
    let mut tracker = ReminderTracker::default();
    let snapshot = gym_core::models::dashboard::DashboardSnapshot {
        coach_count: 0,
        private_training_member_count: 0,
        annual_card_member_count: 0,
        annual_card_expiring_count: 0,
        annual_card_expired_count: 0,
        low_remaining_sessions_count: 0,
        expiring_annual_cards: vec![],
        low_remaining_sessions_members: vec![],
    };
    assert!(!tracker.should_remind(date(2024, 6, 14), &snapshot));
    assert_eq!(tracker, ReminderTracker::default());
}

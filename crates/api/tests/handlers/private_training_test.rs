use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{date, TestContext};

async fn create_member(ctx: &TestContext, total_sessions: i64, initial_paid_amount: f64) -> i64 {
    let response = ctx
        .server
        .post("/api/private-training-members")
        .json(&json!({
            "name": "Dana",
            "gender": "female",
            "phone": "13800000000",
            "initial_paid_amount": initial_paid_amount,
            "total_sessions": total_sessions,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

#[test_log::test(tokio::test)]
async fn test_create_with_initial_payment() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let id = create_member(&ctx, 10, 3000.0).await;

    let member: Value = ctx
        .server
        .get(&format!("/api/private-training-members/{id}"))
        .await
        .json();
    assert_eq!(member["paid_amount"].as_f64(), Some(3000.0));
    assert_eq!(member["remaining_sessions"], 10);
    assert_eq!(member["gender"], "female");

    let fees: Vec<Value> = ctx
        .server
        .get(&format!("/api/private-training-members/{id}/fees"))
        .await
        .json();
    assert_eq!(fees.len(), 1);
    assert_eq!(fees[0]["note"], "initial payment");
}

#[test_log::test(tokio::test)]
async fn test_ledger_operations() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let id = create_member(&ctx, 10, 0.0).await;

    let response = ctx
        .server
        .post(&format!("/api/private-training-members/{id}/fees"))
        .json(&json!({ "amount": 1200.5, "note": "package" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["member"]["paid_amount"].as_f64(), Some(1200.5));
    assert_eq!(body["record"]["note"], "package");
    assert_eq!(body["record"]["paid_at"], "2024-06-14T09:00:00Z");

    // Default consumption is one session
    let response = ctx
        .server
        .post(&format!("/api/private-training-members/{id}/sessions"))
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["member"]["remaining_sessions"], 9);

    let response = ctx
        .server
        .post(&format!("/api/private-training-members/{id}/sessions"))
        .json(&json!({ "sessions_used": 10 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let sessions: Vec<Value> = ctx
        .server
        .get(&format!("/api/private-training-members/{id}/sessions"))
        .await
        .json();
    assert_eq!(sessions.len(), 1);

    ctx.server
        .post(&format!("/api/private-training-members/{id}/fees"))
        .json(&json!({ "amount": 0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_amounts_beyond_storable_range_are_rejected() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let id = create_member(&ctx, 10, 100.0).await;

    ctx.server
        .post(&format!("/api/private-training-members/{id}/fees"))
        .json(&json!({ "amount": 7.9e28 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .post("/api/private-training-members")
        .json(&json!({
            "name": "Eli",
            "gender": "male",
            "phone": "13800000001",
            "initial_paid_amount": 7.9e28,
            "total_sessions": 1,
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let member: Value = ctx
        .server
        .get(&format!("/api/private-training-members/{id}"))
        .await
        .json();
    assert_eq!(member["paid_amount"].as_f64(), Some(100.0));
    let members: Vec<Value> = ctx.server.get("/api/private-training-members").await.json();
    assert_eq!(members.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_update_below_used_sessions_rejected() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let id = create_member(&ctx, 10, 0.0).await;

    ctx.server
        .post(&format!("/api/private-training-members/{id}/sessions"))
        .json(&json!({ "sessions_used": 4 }))
        .await
        .assert_status(StatusCode::CREATED);

    let payload = |total: i64| json!({ "name": "Dana", "phone": "13800000000", "total_sessions": total });

    ctx.server
        .put(&format!("/api/private-training-members/{id}"))
        .json(&payload(3))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .put(&format!("/api/private-training-members/{id}"))
        .json(&payload(4))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["remaining_sessions"], 0);
}

#[test_log::test(tokio::test)]
async fn test_unknown_member_returns_not_found() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;

    ctx.server
        .get("/api/private-training-members/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .get("/api/private-training-members/99/fees")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .post("/api/private-training-members/99/sessions")
        .json(&json!({ "sessions_used": 1 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_delete_unknown_member_is_a_no_op() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let mut changes = ctx.state.notifier.subscribe();

    ctx.server
        .delete("/api/private-training-members/99")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(changes.try_recv().is_err());
}

#[test_log::test(tokio::test)]
async fn test_delete_removes_records() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let id = create_member(&ctx, 10, 500.0).await;

    ctx.server
        .delete(&format!("/api/private-training-members/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .get(&format!("/api/private-training-members/{id}/fees"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

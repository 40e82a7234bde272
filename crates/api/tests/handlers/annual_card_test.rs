use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{date, TestContext};

async fn create_card(ctx: &TestContext, name: &str, start: &str, end: &str) -> Value {
    let response = ctx
        .server
        .post("/api/annual-card-members")
        .json(&json!({ "name": name, "phone": "13900000000", "start_date": start, "end_date": end }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[test_log::test(tokio::test)]
async fn test_status_is_derived_from_clock() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;

    let card = create_card(&ctx, "Kim", "2023-06-18", "2024-06-17").await;
    assert_eq!(card["status"], "expiring_soon");
    assert_eq!(card["days_to_expire"], 3);
    assert_eq!(card["end_date"], "2024-06-17");

    let card = create_card(&ctx, "Lee", "2023-06-13", "2024-06-13").await;
    assert_eq!(card["status"], "expired");
    assert_eq!(card["days_to_expire"], -1);

    let card = create_card(&ctx, "Max", "2024-01-01", "2024-12-31").await;
    assert_eq!(card["status"], "normal");
}

#[test_log::test(tokio::test)]
async fn test_list_filter() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    create_card(&ctx, "expired", "2023-01-01", "2024-01-01").await;
    create_card(&ctx, "expiring", "2023-06-15", "2024-06-15").await;
    create_card(&ctx, "normal", "2024-01-01", "2024-12-31").await;

    let all: Vec<Value> = ctx.server.get("/api/annual-card-members").await.json();
    assert_eq!(all.len(), 3);
    // Soonest end date first
    assert_eq!(all[0]["name"], "expired");

    for (filter, expected) in [("expired", "expired"), ("expiring_soon", "expiring"), ("normal", "normal")] {
        let filtered: Vec<Value> = ctx
            .server
            .get("/api/annual-card-members")
            .add_query_param("filter", filter)
            .await
            .json();
        assert_eq!(filtered.len(), 1, "filter {filter}");
        assert_eq!(filtered[0]["name"], expected);
    }

    ctx.server
        .get("/api/annual-card-members")
        .add_query_param("filter", "bogus")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_invalid_range_rejected() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;

    ctx.server
        .post("/api/annual-card-members")
        .json(&json!({ "name": "Kim", "phone": "1", "start_date": "2024-06-02", "end_date": "2024-06-01" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_renew() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let active = create_card(&ctx, "active", "2024-01-01", "2024-06-20").await;
    let lapsed = create_card(&ctx, "lapsed", "2023-01-01", "2023-12-31").await;

    let renewed: Value = ctx
        .server
        .post(&format!("/api/annual-card-members/{}/renew", active["id"]))
        .await
        .json();
    assert_eq!(renewed["start_date"], "2024-01-01");
    assert_eq!(renewed["end_date"], "2025-06-20");
    assert_eq!(renewed["status"], "normal");

    let renewed: Value = ctx
        .server
        .post(&format!("/api/annual-card-members/{}/renew", lapsed["id"]))
        .await
        .json();
    assert_eq!(renewed["start_date"], "2024-06-14");
    assert_eq!(renewed["end_date"], "2025-06-14");

    ctx.server
        .post("/api/annual-card-members/404/renew")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_reminder_lists() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    create_card(&ctx, "long-gone", "2023-01-01", "2024-01-01").await;
    create_card(&ctx, "yesterday", "2023-06-13", "2024-06-13").await;
    create_card(&ctx, "in-two", "2023-06-16", "2024-06-16").await;
    create_card(&ctx, "today", "2023-06-14", "2024-06-14").await;
    create_card(&ctx, "in-five", "2023-06-19", "2024-06-19").await;

    let expiring: Vec<Value> = ctx.server.get("/api/annual-card-members/expiring").await.json();
    let names: Vec<&str> = expiring.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["today", "in-two"]);

    let wider: Vec<Value> = ctx
        .server
        .get("/api/annual-card-members/expiring")
        .add_query_param("days", 5)
        .await
        .json();
    assert_eq!(wider.len(), 3);
    assert!(wider.iter().all(|m| m["status"] == "expiring_soon"));

    let widest: Vec<Value> = ctx
        .server
        .get("/api/annual-card-members/expiring")
        .add_query_param("days", 100_000_000)
        .await
        .json();
    let names: Vec<&str> = widest.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["today", "in-two", "in-five"]);

    let expired: Vec<Value> = ctx.server.get("/api/annual-card-members/expired").await.json();
    let names: Vec<&str> = expired.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["yesterday", "long-gone"]);
}

#[test_log::test(tokio::test)]
async fn test_update_and_delete() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let card = create_card(&ctx, "Ned", "2024-01-01", "2024-12-31").await;
    let path = format!("/api/annual-card-members/{}", card["id"]);

    let response = ctx
        .server
        .put(&path)
        .json(&json!({ "name": "Ned", "gender": "male", "phone": "139", "start_date": "2024-01-01", "end_date": "2024-06-15" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "expiring_soon");

    ctx.server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    ctx.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    // Deleting again is a no-op
    let mut changes = ctx.state.notifier.subscribe();
    ctx.server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    assert!(changes.try_recv().is_err());
}

use axum::http::StatusCode;
use gym_core::models::coach::Coach;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{date, TestContext};

#[test_log::test(tokio::test)]
async fn test_coach_lifecycle() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;

    let response = ctx
        .server
        .post("/api/coaches")
        .json(&json!({ "employee_no": "C001", "name": "Alice" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Coach = response.json();
    assert_eq!(created.employee_no, "C001");

    let fetched: Coach = ctx.server.get("/api/coaches/C001").await.json();
    assert_eq!(fetched, created);

    let response = ctx
        .server
        .put("/api/coaches/C001")
        .json(&json!({ "name": "Alicia" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Coach>().name, "Alicia");

    ctx.server
        .delete("/api/coaches/C001")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .get("/api/coaches/C001")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_duplicate_and_invalid_coach_rejected() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    let payload = json!({ "employee_no": "C001", "name": "Alice" });

    ctx.server.post("/api/coaches").json(&payload).await.assert_status(StatusCode::CREATED);

    let response = ctx.server.post("/api/coaches").json(&payload).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("C001"));

    ctx.server
        .post("/api/coaches")
        .json(&json!({ "employee_no": "  ", "name": "Bob" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .put("/api/coaches/C404")
        .json(&json!({ "name": "Nobody" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_list_coaches_with_keyword() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    for (no, name) in [("C002", "Bob"), ("C001", "Alice")] {
        ctx.server
            .post("/api/coaches")
            .json(&json!({ "employee_no": no, "name": name }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all: Vec<Coach> = ctx.server.get("/api/coaches").await.json();
    let numbers: Vec<&str> = all.iter().map(|c| c.employee_no.as_str()).collect();
    assert_eq!(numbers, vec!["C001", "C002"]);

    let filtered: Vec<Coach> = ctx
        .server
        .get("/api/coaches")
        .add_query_param("keyword", "Bob")
        .await
        .json();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].employee_no, "C002");
}

#[test_log::test(tokio::test)]
async fn test_delete_unknown_coach_is_noop() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;
    ctx.server
        .delete("/api/coaches/C999")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::{date, TestContext};

#[tokio::test]
async fn test_health_reports_database() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;

    let response = ctx.server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_version() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;

    let body: Value = ctx.server.get("/version").await.json();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

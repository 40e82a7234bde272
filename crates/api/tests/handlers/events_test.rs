use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tokio_stream::StreamExt;
use tower::ServiceExt;

use crate::test_utils::{date, TestContext};

#[test_log::test(tokio::test)]
async fn test_event_stream_delivers_data_changed() {
    let ctx = TestContext::new(date(2024, 6, 14)).await;

    // The stream never ends, so drive the router directly and read frames
    let response = gym_api::app(ctx.state.clone())
        .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/event-stream"
    );
    let mut frames = response.into_body().into_data_stream();

    ctx.server
        .post("/api/coaches")
        .json(&json!({ "employee_no": "C001", "name": "Alice" }))
        .await
        .assert_status(StatusCode::CREATED);

    let mut received = String::new();
    while !received.ends_with("\n\n") {
        let frame = tokio::time::timeout(Duration::from_secs(5), frames.next())
            .await
            .expect("no event within 5 seconds")
            .expect("stream ended")
            .unwrap();
        received.push_str(std::str::from_utf8(&frame).unwrap());
    }

    assert!(received.contains("event: data_changed"), "{received}");
    assert!(received.contains(r#"data: {"entity":"coach"}"#), "{received}");
}

use axum::{body::to_bytes, http::StatusCode};
use gym_api::middleware::error_handling::{map_error, AppError};
use gym_core::errors::GymError;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::not_found(GymError::NotFound("Resource not found".to_string()), StatusCode::NOT_FOUND)]
#[case::validation(GymError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case::database(GymError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::internal(
    GymError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: GymError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(GymError::validation("name must not be empty"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body, serde_json::json!({ "error": "Validation error: name must not be empty" }));
}

#[test]
fn test_from_conversions() {
    let AppError(inner) = AppError::from(eyre::eyre!("disk full"));
    assert!(matches!(inner, GymError::Database(_)));

    let AppError(inner) = AppError::from(GymError::not_found("coach"));
    assert!(matches!(inner, GymError::NotFound(_)));
}

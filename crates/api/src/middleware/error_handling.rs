//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a uniform JSON body of the
//! form `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gym_core::errors::GymError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use gym_api::middleware::error_handling::AppError;
/// use gym_core::errors::GymError;
///
/// async fn handler(id: i64) -> Result<Json<i64>, AppError> {
///     if id < 0 {
///         return Err(GymError::validation("id must not be negative").into());
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub GymError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GymError::NotFound(_) => StatusCode::NOT_FOUND,
            GymError::Validation(_) => StatusCode::BAD_REQUEST,
            GymError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GymError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Lets handlers use `?` on functions returning `GymResult`.
impl From<GymError> for AppError {
    fn from(err: GymError) -> Self {
        AppError(err)
    }
}

/// Store-level failures surface as `GymError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(GymError::Database(err))
    }
}

/// Maps a GymError to an HTTP response
pub fn map_error(err: GymError) -> Response {
    AppError(err).into_response()
}

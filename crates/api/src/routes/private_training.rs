use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::private_training as handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/private-training-members",
            get(handlers::list_members).post(handlers::create_member),
        )
        .route(
            "/api/private-training-members/:id",
            get(handlers::get_member)
                .put(handlers::update_member)
                .delete(handlers::delete_member),
        )
        .route(
            "/api/private-training-members/:id/fees",
            get(handlers::list_fee_records).post(handlers::add_fee),
        )
        .route(
            "/api/private-training-members/:id/sessions",
            get(handlers::list_session_records).post(handlers::consume_sessions),
        )
}

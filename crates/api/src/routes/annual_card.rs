use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers::annual_card as handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/annual-card-members",
            get(handlers::list_members).post(handlers::create_member),
        )
        .route("/api/annual-card-members/expiring", get(handlers::list_expiring))
        .route("/api/annual-card-members/expired", get(handlers::list_expired))
        .route(
            "/api/annual-card-members/:id",
            get(handlers::get_member)
                .put(handlers::update_member)
                .delete(handlers::delete_member),
        )
        .route("/api/annual-card-members/:id/renew", post(handlers::renew_member))
}

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/coaches",
            get(handlers::coach::list_coaches).post(handlers::coach::create_coach),
        )
        .route(
            "/api/coaches/:employee_no",
            get(handlers::coach::get_coach)
                .put(handlers::coach::update_coach)
                .delete(handlers::coach::delete_coach),
        )
}

use axum::{extract::State, Json};
use chrono::NaiveDate;
use gym_core::models::dashboard::DashboardSnapshot;
use gym_db::repositories::dashboard;
use serde::Serialize;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, reminder::dashboard_query, ApiState};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub expiring_days: i64,
    pub low_remaining_threshold: i64,
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
}

pub async fn get_dashboard(State(state): State<Arc<ApiState>>) -> Result<Json<DashboardResponse>, AppError> {
    let query = dashboard_query(&state);
    let snapshot = dashboard::get_snapshot(&state.db_pool, &query).await?;

    Ok(Json(DashboardResponse {
        today: query.today,
        expiring_days: query.expiring_days,
        low_remaining_threshold: query.low_remaining_threshold,
        snapshot,
    }))
}

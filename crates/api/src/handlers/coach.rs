use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use gym_core::{
    errors::GymError,
    models::coach::{Coach, CreateCoachRequest, UpdateCoachRequest},
};
use gym_db::repositories::coach;
use std::sync::Arc;

use super::KeywordQuery;
use crate::{middleware::error_handling::AppError, notify::EntityKind, ApiState};

pub async fn list_coaches(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<Vec<Coach>>, AppError> {
    let coaches = coach::list_coaches(&state.db_pool, query.keyword.as_deref()).await?;
    Ok(Json(coaches))
}

pub async fn get_coach(
    State(state): State<Arc<ApiState>>,
    Path(employee_no): Path<String>,
) -> Result<Json<Coach>, AppError> {
    coach::get_coach(&state.db_pool, &employee_no)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError(GymError::not_found(format!(
                "Coach with employee number {employee_no} not found"
            )))
        })
}

pub async fn create_coach(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateCoachRequest>,
) -> Result<(StatusCode, Json<Coach>), AppError> {
    let created = coach::create_coach(&state.db_pool, &payload, state.clock.now()).await?;
    state.notifier.publish(EntityKind::Coach);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_coach(
    State(state): State<Arc<ApiState>>,
    Path(employee_no): Path<String>,
    Json(payload): Json<UpdateCoachRequest>,
) -> Result<Json<Coach>, AppError> {
    let updated = coach::update_coach(&state.db_pool, &employee_no, &payload, state.clock.now()).await?;
    state.notifier.publish(EntityKind::Coach);
    Ok(Json(updated))
}

/// Deleting an unknown employee number is a no-op and still answers 204.
pub async fn delete_coach(
    State(state): State<Arc<ApiState>>,
    Path(employee_no): Path<String>,
) -> Result<StatusCode, AppError> {
    if coach::delete_coach(&state.db_pool, &employee_no).await? {
        state.notifier.publish(EntityKind::Coach);
    }
    Ok(StatusCode::NO_CONTENT)
}

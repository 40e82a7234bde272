use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use gym_core::{
    errors::GymError,
    models::annual_card::{AnnualCardMember, AnnualCardMemberRequest, AnnualCardMemberResponse},
    status::AnnualCardFilter,
};
use gym_db::repositories::annual_card;
use serde::Deserialize;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, notify::EntityKind, ApiState};

#[derive(Debug, Default, Deserialize)]
pub struct AnnualCardListQuery {
    pub keyword: Option<String>,
    /// `all`, `normal`, `expiring_soon` or `expired`
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExpiringQuery {
    /// Overrides the configured expiring-soon window.
    pub days: Option<i64>,
}

fn not_found(id: i64) -> AppError {
    AppError(GymError::not_found(format!("Annual card member with ID {id} not found")))
}

fn respond(state: &ApiState, member: AnnualCardMember) -> AnnualCardMemberResponse {
    member.into_response(state.clock.today(), state.reminders.expiring_days)
}

pub async fn list_members(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AnnualCardListQuery>,
) -> Result<Json<Vec<AnnualCardMemberResponse>>, AppError> {
    let filter: AnnualCardFilter = query.filter.as_deref().unwrap_or_default().parse()?;
    let members = annual_card::list_members(&state.db_pool, query.keyword.as_deref()).await?;

    let today = state.clock.today();
    let expiring_days = state.reminders.expiring_days;
    let members = members
        .into_iter()
        .map(|member| member.into_response(today, expiring_days))
        .filter(|member| filter.matches(member.status))
        .collect();

    Ok(Json(members))
}

pub async fn get_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<AnnualCardMemberResponse>, AppError> {
    let member = annual_card::get_member(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(respond(&state, member)))
}

pub async fn create_member(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AnnualCardMemberRequest>,
) -> Result<(StatusCode, Json<AnnualCardMemberResponse>), AppError> {
    let member = annual_card::create_member(&state.db_pool, &payload, state.clock.now()).await?;
    state.notifier.publish(EntityKind::AnnualCardMember);
    Ok((StatusCode::CREATED, Json(respond(&state, member))))
}

pub async fn update_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<AnnualCardMemberRequest>,
) -> Result<Json<AnnualCardMemberResponse>, AppError> {
    let member = annual_card::update_member(&state.db_pool, id, &payload, state.clock.now()).await?;
    state.notifier.publish(EntityKind::AnnualCardMember);
    Ok(Json(respond(&state, member)))
}

pub async fn delete_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    // Unknown ids are a no-op
    if annual_card::delete_member(&state.db_pool, id).await? {
        state.notifier.publish(EntityKind::AnnualCardMember);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn renew_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<AnnualCardMemberResponse>, AppError> {
    let member = annual_card::renew_member(&state.db_pool, id, state.clock.today(), state.clock.now()).await?;
    state.notifier.publish(EntityKind::AnnualCardMember);
    Ok(Json(respond(&state, member)))
}

pub async fn list_expiring(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ExpiringQuery>,
) -> Result<Json<Vec<AnnualCardMemberResponse>>, AppError> {
    let days = query.days.unwrap_or(state.reminders.expiring_days).max(0);
    let today = state.clock.today();
    let members = annual_card::list_expiring(&state.db_pool, today, days).await?;

    Ok(Json(
        members
            .into_iter()
            .map(|member| member.into_response(today, days))
            .collect(),
    ))
}

pub async fn list_expired(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<AnnualCardMemberResponse>>, AppError> {
    let members = annual_card::list_expired(&state.db_pool, state.clock.today()).await?;
    Ok(Json(members.into_iter().map(|member| respond(&state, member)).collect()))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use gym_core::{
    errors::GymError,
    models::private_training::{
        AddFeeRequest, ConsumeSessionsRequest, CreatePrivateTrainingMemberRequest, FeeRecord,
        PrivateTrainingMemberResponse, SessionRecord, UpdatePrivateTrainingMemberRequest,
    },
};
use gym_db::repositories::private_training;
use serde::Serialize;
use std::sync::Arc;

use super::KeywordQuery;
use crate::{middleware::error_handling::AppError, notify::EntityKind, ApiState};

/// Member totals after a ledger operation, with the record that was appended.
#[derive(Debug, Serialize)]
pub struct LedgerResponse<R> {
    pub member: PrivateTrainingMemberResponse,
    pub record: R,
}

fn not_found(id: i64) -> AppError {
    AppError(GymError::not_found(format!("Private training member with ID {id} not found")))
}

pub async fn list_members(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<Vec<PrivateTrainingMemberResponse>>, AppError> {
    let members = private_training::list_members(&state.db_pool, query.keyword.as_deref()).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

pub async fn get_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<PrivateTrainingMemberResponse>, AppError> {
    let member = private_training::get_member(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(member.into()))
}

pub async fn create_member(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePrivateTrainingMemberRequest>,
) -> Result<(StatusCode, Json<PrivateTrainingMemberResponse>), AppError> {
    let member = private_training::create_member(&state.db_pool, &payload, state.clock.now()).await?;
    state.notifier.publish(EntityKind::PrivateTrainingMember);
    Ok((StatusCode::CREATED, Json(member.into())))
}

pub async fn update_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePrivateTrainingMemberRequest>,
) -> Result<Json<PrivateTrainingMemberResponse>, AppError> {
    let member = private_training::update_member(&state.db_pool, id, &payload, state.clock.now()).await?;
    state.notifier.publish(EntityKind::PrivateTrainingMember);
    Ok(Json(member.into()))
}

pub async fn delete_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    // Unknown ids are a no-op
    if private_training::delete_member(&state.db_pool, id).await? {
        state.notifier.publish(EntityKind::PrivateTrainingMember);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_fee_records(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<FeeRecord>>, AppError> {
    if private_training::get_member(&state.db_pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    Ok(Json(private_training::list_fee_records(&state.db_pool, id).await?))
}

pub async fn add_fee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<AddFeeRequest>,
) -> Result<(StatusCode, Json<LedgerResponse<FeeRecord>>), AppError> {
    let now = state.clock.now();
    let (member, record) = private_training::add_fee(
        &state.db_pool,
        id,
        payload.amount,
        payload.paid_at.unwrap_or(now),
        payload.note.as_deref(),
        now,
    )
    .await?;

    state.notifier.publish(EntityKind::PrivateTrainingMember);
    Ok((
        StatusCode::CREATED,
        Json(LedgerResponse {
            member: member.into(),
            record,
        }),
    ))
}

pub async fn list_session_records(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<SessionRecord>>, AppError> {
    if private_training::get_member(&state.db_pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    Ok(Json(private_training::list_session_records(&state.db_pool, id).await?))
}

pub async fn consume_sessions(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<ConsumeSessionsRequest>,
) -> Result<(StatusCode, Json<LedgerResponse<SessionRecord>>), AppError> {
    let now = state.clock.now();
    let (member, record) = private_training::consume_sessions(
        &state.db_pool,
        id,
        payload.sessions_used,
        payload.used_at.unwrap_or(now),
        payload.note.as_deref(),
        now,
    )
    .await?;

    state.notifier.publish(EntityKind::PrivateTrainingMember);
    Ok((
        StatusCode::CREATED,
        Json(LedgerResponse {
            member: member.into(),
            record,
        }),
    ))
}

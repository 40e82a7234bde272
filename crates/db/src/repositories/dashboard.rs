//! Dashboard aggregation. Every figure is read inside one transaction so the
//! counts and lists describe the same state of the store.

use eyre::WrapErr;
use gym_core::{
    errors::GymResult,
    models::{
        annual_card::AnnualCardMember,
        dashboard::{DashboardQuery, DashboardSnapshot, DASHBOARD_DISPLAY_LIMIT},
        private_training::PrivateTrainingMember,
    },
};
use sqlx::SqliteConnection;

use crate::{
    models::{DbAnnualCardMember, DbPrivateTrainingMember},
    DbPool,
};

async fn count(conn: &mut SqliteConnection, sql: &str, context: &'static str) -> GymResult<i64> {
    let count: i64 = sqlx::query_scalar(sql)
        .fetch_one(conn)
        .await
        .wrap_err(context)?;
    Ok(count)
}

pub async fn get_snapshot(pool: &DbPool, query: &DashboardQuery) -> GymResult<DashboardSnapshot> {
    let today = query.today;
    let until = query.expiring_until();

    let mut tx = pool.begin().await.wrap_err("starting transaction")?;

    let coach_count = count(&mut tx, "SELECT COUNT(*) FROM coaches", "counting coaches").await?;
    let private_training_member_count = count(
        &mut tx,
        "SELECT COUNT(*) FROM private_training_members",
        "counting private training members",
    )
    .await?;
    let annual_card_member_count = count(
        &mut tx,
        "SELECT COUNT(*) FROM annual_card_members",
        "counting annual card members",
    )
    .await?;

    let annual_card_expiring_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM annual_card_members WHERE end_date >= ?1 AND end_date <= ?2",
    )
    .bind(today)
    .bind(until)
    .fetch_one(&mut *tx)
    .await
    .wrap_err("counting expiring annual cards")?;

    let annual_card_expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM annual_card_members WHERE end_date < ?1")
            .bind(today)
            .fetch_one(&mut *tx)
            .await
            .wrap_err("counting expired annual cards")?;

    let expiring_annual_cards = sqlx::query_as::<_, DbAnnualCardMember>(
        r#"
        SELECT id, name, gender, phone, start_date, end_date, created_at, updated_at
        FROM annual_card_members
        WHERE end_date >= ?1 AND end_date <= ?2
        ORDER BY end_date ASC, id ASC
        LIMIT ?3
        "#,
    )
    .bind(today)
    .bind(until)
    .bind(DASHBOARD_DISPLAY_LIMIT)
    .fetch_all(&mut *tx)
    .await
    .wrap_err("listing expiring annual cards")?
    .into_iter()
    .map(AnnualCardMember::from)
    .collect();

    let low_remaining_sessions_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM private_training_members WHERE total_sessions - used_sessions <= ?1",
    )
    .bind(query.low_remaining_threshold)
    .fetch_one(&mut *tx)
    .await
    .wrap_err("counting members low on sessions")?;

    let low_remaining_sessions_members = sqlx::query_as::<_, DbPrivateTrainingMember>(
        r#"
        SELECT id, name, gender, phone, paid_amount_cents, total_sessions, used_sessions, created_at, updated_at
        FROM private_training_members
        WHERE total_sessions - used_sessions <= ?1
        ORDER BY total_sessions - used_sessions ASC, updated_at DESC, id ASC
        LIMIT ?2
        "#,
    )
    .bind(query.low_remaining_threshold)
    .bind(DASHBOARD_DISPLAY_LIMIT)
    .fetch_all(&mut *tx)
    .await
    .wrap_err("listing members low on sessions")?
    .into_iter()
    .map(PrivateTrainingMember::from)
    .collect();

    tx.commit().await.wrap_err("closing dashboard transaction")?;

    tracing::debug!(
        "Dashboard snapshot for {}: expiring={}, expired={}, low_remaining={}",
        today, annual_card_expiring_count, annual_card_expired_count, low_remaining_sessions_count
    );

    Ok(DashboardSnapshot {
        coach_count,
        private_training_member_count,
        annual_card_member_count,
        annual_card_expiring_count,
        annual_card_expired_count,
        low_remaining_sessions_count,
        expiring_annual_cards,
        low_remaining_sessions_members,
    })
}

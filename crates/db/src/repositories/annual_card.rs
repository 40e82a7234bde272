use chrono::{DateTime, NaiveDate, Utc};
use eyre::WrapErr;
use gym_core::{
    errors::{GymError, GymResult},
    models::annual_card::{AnnualCardMember, AnnualCardMemberRequest},
    status, validation,
};

use crate::{models::DbAnnualCardMember, DbPool};

const MEMBER_COLUMNS: &str = "id, name, gender, phone, start_date, end_date, created_at, updated_at";

fn member_not_found(id: i64) -> GymError {
    GymError::not_found(format!("Annual card member with ID {id} not found"))
}

/// Members whose name or phone contains `keyword`, soonest end date first.
pub async fn list_members(pool: &DbPool, keyword: Option<&str>) -> GymResult<Vec<AnnualCardMember>> {
    let keyword = validation::keyword(keyword);
    let sql = format!(
        r#"
        SELECT {MEMBER_COLUMNS}
        FROM annual_card_members
        WHERE ?1 IS NULL OR instr(name, ?1) > 0 OR instr(phone, ?1) > 0
        ORDER BY end_date ASC, id ASC
        "#
    );

    let rows = sqlx::query_as::<_, DbAnnualCardMember>(&sql)
        .bind(keyword)
        .fetch_all(pool)
        .await
        .wrap_err("listing annual card members")?;

    Ok(rows.into_iter().map(AnnualCardMember::from).collect())
}

pub async fn get_member(pool: &DbPool, id: i64) -> GymResult<Option<AnnualCardMember>> {
    let sql = format!("SELECT {MEMBER_COLUMNS} FROM annual_card_members WHERE id = ?1");
    let row = sqlx::query_as::<_, DbAnnualCardMember>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .wrap_err("loading annual card member")?;

    Ok(row.map(AnnualCardMember::from))
}

pub async fn create_member(
    pool: &DbPool,
    request: &AnnualCardMemberRequest,
    now: DateTime<Utc>,
) -> GymResult<AnnualCardMember> {
    let request = request.normalized()?;

    tracing::debug!(
        "Creating annual card member: name={}, start_date={}, end_date={}",
        request.name, request.start_date, request.end_date
    );

    let result = sqlx::query(
        r#"
        INSERT INTO annual_card_members (name, gender, phone, start_date, end_date, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        "#,
    )
    .bind(&request.name)
    .bind(request.gender.code())
    .bind(&request.phone)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(now)
    .execute(pool)
    .await
    .wrap_err("inserting annual card member")?;

    Ok(AnnualCardMember {
        id: result.last_insert_rowid(),
        name: request.name,
        gender: request.gender,
        phone: request.phone,
        start_date: request.start_date,
        end_date: request.end_date,
        created_at: now,
        updated_at: now,
    })
}

pub async fn update_member(
    pool: &DbPool,
    id: i64,
    request: &AnnualCardMemberRequest,
    now: DateTime<Utc>,
) -> GymResult<AnnualCardMember> {
    let request = request.normalized()?;

    let sql = format!(
        r#"
        UPDATE annual_card_members
        SET name = ?2, gender = ?3, phone = ?4, start_date = ?5, end_date = ?6, updated_at = ?7
        WHERE id = ?1
        RETURNING {MEMBER_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, DbAnnualCardMember>(&sql)
        .bind(id)
        .bind(&request.name)
        .bind(request.gender.code())
        .bind(&request.phone)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(now)
        .fetch_optional(pool)
        .await
        .wrap_err("updating annual card member")?;

    row.map(AnnualCardMember::from).ok_or_else(|| member_not_found(id))
}

pub async fn delete_member(pool: &DbPool, id: i64) -> GymResult<bool> {
    let result = sqlx::query("DELETE FROM annual_card_members WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await
        .wrap_err("deleting annual card member")?;

    Ok(result.rows_affected() > 0)
}

/// Extends a card by one year, or restarts it today if it has lapsed.
pub async fn renew_member(
    pool: &DbPool,
    id: i64,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> GymResult<AnnualCardMember> {
    let mut tx = pool.begin().await.wrap_err("starting transaction")?;

    let sql = format!("SELECT {MEMBER_COLUMNS} FROM annual_card_members WHERE id = ?1");
    let mut member = sqlx::query_as::<_, DbAnnualCardMember>(&sql)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .wrap_err("loading annual card member")?
        .map(AnnualCardMember::from)
        .ok_or_else(|| member_not_found(id))?;

    let term = member.renewed(today);

    sqlx::query(
        r#"
        UPDATE annual_card_members
        SET start_date = ?2, end_date = ?3, updated_at = ?4
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(term.start_date)
    .bind(term.end_date)
    .bind(now)
    .execute(&mut *tx)
    .await
    .wrap_err("renewing annual card member")?;

    tx.commit().await.wrap_err("committing renewal")?;

    tracing::debug!(
        "Annual card renewed: id={}, {}..{} -> {}..{}",
        id, member.start_date, member.end_date, term.start_date, term.end_date
    );

    member.start_date = term.start_date;
    member.end_date = term.end_date;
    member.updated_at = now;
    Ok(member)
}

/// Cards ending within `today ..= today + days`, soonest first.
pub async fn list_expiring(pool: &DbPool, today: NaiveDate, days: i64) -> GymResult<Vec<AnnualCardMember>> {
    let until = status::expiring_until(today, days);
    let sql = format!(
        r#"
        SELECT {MEMBER_COLUMNS}
        FROM annual_card_members
        WHERE end_date >= ?1 AND end_date <= ?2
        ORDER BY end_date ASC, id ASC
        "#
    );

    let rows = sqlx::query_as::<_, DbAnnualCardMember>(&sql)
        .bind(today)
        .bind(until)
        .fetch_all(pool)
        .await
        .wrap_err("listing expiring annual cards")?;

    Ok(rows.into_iter().map(AnnualCardMember::from).collect())
}

/// Cards that ended before `today`, most recently lapsed first.
pub async fn list_expired(pool: &DbPool, today: NaiveDate) -> GymResult<Vec<AnnualCardMember>> {
    let sql = format!(
        r#"
        SELECT {MEMBER_COLUMNS}
        FROM annual_card_members
        WHERE end_date < ?1
        ORDER BY end_date DESC, id DESC
        "#
    );

    let rows = sqlx::query_as::<_, DbAnnualCardMember>(&sql)
        .bind(today)
        .fetch_all(pool)
        .await
        .wrap_err("listing expired annual cards")?;

    Ok(rows.into_iter().map(AnnualCardMember::from).collect())
}

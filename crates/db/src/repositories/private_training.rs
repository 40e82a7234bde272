use chrono::{DateTime, Utc};
use eyre::WrapErr;
use gym_core::{
    errors::{GymError, GymResult},
    models::private_training::{
        CreatePrivateTrainingMemberRequest, FeeRecord, NewFeeRecord, NewSessionRecord,
        PrivateTrainingMember, SessionRecord, UpdatePrivateTrainingMemberRequest,
        INITIAL_PAYMENT_NOTE,
    },
    validation,
};
use rust_decimal::Decimal;
use sqlx::{Sqlite, SqliteConnection};

use crate::{
    models::{decimal_to_cents, DbFeeRecord, DbPrivateTrainingMember, DbSessionRecord},
    DbPool,
};

const MEMBER_COLUMNS: &str = "id, name, gender, phone, paid_amount_cents, total_sessions, used_sessions, created_at, updated_at";

async fn fetch_member<'e, E>(executor: E, id: i64) -> GymResult<Option<PrivateTrainingMember>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {MEMBER_COLUMNS} FROM private_training_members WHERE id = ?1");
    let row = sqlx::query_as::<_, DbPrivateTrainingMember>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .wrap_err("loading private training member")?;

    Ok(row.map(PrivateTrainingMember::from))
}

fn member_not_found(id: i64) -> GymError {
    GymError::not_found(format!("Private training member with ID {id} not found"))
}

/// Writes the member's running totals back after a ledger rule has run.
async fn store_totals(
    conn: &mut SqliteConnection,
    member: &PrivateTrainingMember,
    now: DateTime<Utc>,
) -> GymResult<()> {
    sqlx::query(
        r#"
        UPDATE private_training_members
        SET paid_amount_cents = ?2, used_sessions = ?3, updated_at = ?4
        WHERE id = ?1
        "#,
    )
    .bind(member.id)
    .bind(decimal_to_cents(member.paid_amount)?)
    .bind(member.used_sessions)
    .bind(now)
    .execute(conn)
    .await
    .wrap_err("updating member totals")?;

    Ok(())
}

async fn insert_fee_record(
    conn: &mut SqliteConnection,
    record: &NewFeeRecord,
    now: DateTime<Utc>,
) -> GymResult<FeeRecord> {
    let result = sqlx::query(
        r#"
        INSERT INTO private_training_fee_records (member_id, amount_cents, paid_at, note, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(record.member_id)
    .bind(decimal_to_cents(record.amount)?)
    .bind(record.paid_at)
    .bind(&record.note)
    .bind(now)
    .execute(conn)
    .await
    .wrap_err("inserting fee record")?;

    Ok(FeeRecord {
        id: result.last_insert_rowid(),
        member_id: record.member_id,
        amount: record.amount,
        paid_at: record.paid_at,
        note: record.note.clone(),
        created_at: now,
    })
}

async fn insert_session_record(
    conn: &mut SqliteConnection,
    record: &NewSessionRecord,
    now: DateTime<Utc>,
) -> GymResult<SessionRecord> {
    let result = sqlx::query(
        r#"
        INSERT INTO private_training_session_records (member_id, sessions_used, used_at, note, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(record.member_id)
    .bind(record.sessions_used)
    .bind(record.used_at)
    .bind(&record.note)
    .bind(now)
    .execute(conn)
    .await
    .wrap_err("inserting session record")?;

    Ok(SessionRecord {
        id: result.last_insert_rowid(),
        member_id: record.member_id,
        sessions_used: record.sessions_used,
        used_at: record.used_at,
        note: record.note.clone(),
        created_at: now,
    })
}

/// Members whose name or phone contains `keyword`, most recently updated first.
pub async fn list_members(
    pool: &DbPool,
    keyword: Option<&str>,
) -> GymResult<Vec<PrivateTrainingMember>> {
    let keyword = validation::keyword(keyword);
    let sql = format!(
        r#"
        SELECT {MEMBER_COLUMNS}
        FROM private_training_members
        WHERE ?1 IS NULL OR instr(name, ?1) > 0 OR instr(phone, ?1) > 0
        ORDER BY updated_at DESC, id DESC
        "#
    );

    let rows = sqlx::query_as::<_, DbPrivateTrainingMember>(&sql)
        .bind(keyword)
        .fetch_all(pool)
        .await
        .wrap_err("listing private training members")?;

    Ok(rows.into_iter().map(PrivateTrainingMember::from).collect())
}

pub async fn get_member(pool: &DbPool, id: i64) -> GymResult<Option<PrivateTrainingMember>> {
    fetch_member(pool, id).await
}

/// Creates a member with no usage. A positive initial payment is booked as
/// a regular fee record in the same transaction, so the paid amount is
/// always the sum of the member's fee records.
pub async fn create_member(
    pool: &DbPool,
    request: &CreatePrivateTrainingMemberRequest,
    now: DateTime<Utc>,
) -> GymResult<PrivateTrainingMember> {
    let request = request.normalized()?;

    tracing::debug!(
        "Creating private training member: name={}, total_sessions={}, initial_paid_amount={}",
        request.name, request.total_sessions, request.initial_paid_amount
    );

    let mut tx = pool.begin().await.wrap_err("starting transaction")?;

    let result = sqlx::query(
        r#"
        INSERT INTO private_training_members
            (name, gender, phone, paid_amount_cents, total_sessions, used_sessions, created_at, updated_at)
        VALUES (?1, ?2, ?3, 0, ?4, 0, ?5, ?5)
        "#,
    )
    .bind(&request.name)
    .bind(request.gender.code())
    .bind(&request.phone)
    .bind(request.total_sessions)
    .bind(now)
    .execute(&mut *tx)
    .await
    .wrap_err("inserting private training member")?;

    let mut member = PrivateTrainingMember {
        id: result.last_insert_rowid(),
        name: request.name,
        gender: request.gender,
        phone: request.phone,
        paid_amount: Decimal::ZERO,
        total_sessions: request.total_sessions,
        used_sessions: 0,
        created_at: now,
        updated_at: now,
    };

    if request.initial_paid_amount > Decimal::ZERO {
        let record = member.add_fee(request.initial_paid_amount, now, Some(INITIAL_PAYMENT_NOTE))?;
        insert_fee_record(&mut tx, &record, now).await?;
        store_totals(&mut tx, &member, now).await?;
    }

    tx.commit().await.wrap_err("committing private training member")?;

    tracing::debug!("Private training member created: id={}", member.id);
    Ok(member)
}

pub async fn update_member(
    pool: &DbPool,
    id: i64,
    request: &UpdatePrivateTrainingMemberRequest,
    now: DateTime<Utc>,
) -> GymResult<PrivateTrainingMember> {
    let request = request.normalized()?;

    let mut tx = pool.begin().await.wrap_err("starting transaction")?;

    let mut member = fetch_member(&mut *tx, id).await?.ok_or_else(|| member_not_found(id))?;
    member.set_total_sessions(request.total_sessions)?;
    member.name = request.name;
    member.gender = request.gender;
    member.phone = request.phone;
    member.updated_at = now;

    sqlx::query(
        r#"
        UPDATE private_training_members
        SET name = ?2, gender = ?3, phone = ?4, total_sessions = ?5, updated_at = ?6
        WHERE id = ?1
        "#,
    )
    .bind(member.id)
    .bind(&member.name)
    .bind(member.gender.code())
    .bind(&member.phone)
    .bind(member.total_sessions)
    .bind(now)
    .execute(&mut *tx)
    .await
    .wrap_err("updating private training member")?;

    tx.commit().await.wrap_err("committing private training member update")?;

    Ok(member)
}

/// Removes the member and, through the foreign keys, all of its records.
pub async fn delete_member(pool: &DbPool, id: i64) -> GymResult<bool> {
    let result = sqlx::query("DELETE FROM private_training_members WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await
        .wrap_err("deleting private training member")?;

    Ok(result.rows_affected() > 0)
}

/// Appends a fee record and raises the member's paid amount, atomically.
pub async fn add_fee(
    pool: &DbPool,
    member_id: i64,
    amount: Decimal,
    paid_at: DateTime<Utc>,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> GymResult<(PrivateTrainingMember, FeeRecord)> {
    // Reject bad input before touching the store.
    gym_core::ledger::validate_fee_amount(amount)?;

    let mut tx = pool.begin().await.wrap_err("starting transaction")?;

    let mut member = fetch_member(&mut *tx, member_id)
        .await?
        .ok_or_else(|| member_not_found(member_id))?;

    let new_record = member.add_fee(amount, paid_at, note)?;
    member.updated_at = now;

    let record = insert_fee_record(&mut tx, &new_record, now).await?;
    store_totals(&mut tx, &member, now).await?;

    tx.commit().await.wrap_err("committing fee record")?;

    tracing::debug!(
        "Fee recorded: member_id={}, amount={}, paid_amount={}",
        member.id, record.amount, member.paid_amount
    );
    Ok((member, record))
}

/// Appends a consumption record and raises the member's used sessions,
/// atomically. Fails without writing anything when the member does not have
/// enough sessions left.
pub async fn consume_sessions(
    pool: &DbPool,
    member_id: i64,
    sessions_used: i64,
    used_at: DateTime<Utc>,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> GymResult<(PrivateTrainingMember, SessionRecord)> {
    if sessions_used < 1 {
        return Err(GymError::validation("sessions used must be at least 1"));
    }

    let mut tx = pool.begin().await.wrap_err("starting transaction")?;

    let mut member = fetch_member(&mut *tx, member_id)
        .await?
        .ok_or_else(|| member_not_found(member_id))?;

    let new_record = member.consume_sessions(sessions_used, used_at, note)?;
    member.updated_at = now;

    let record = insert_session_record(&mut tx, &new_record, now).await?;
    store_totals(&mut tx, &member, now).await?;

    tx.commit().await.wrap_err("committing session record")?;

    tracing::debug!(
        "Sessions consumed: member_id={}, sessions_used={}, remaining={}",
        member.id, record.sessions_used, member.remaining_sessions()
    );
    Ok((member, record))
}

pub async fn list_fee_records(pool: &DbPool, member_id: i64) -> GymResult<Vec<FeeRecord>> {
    let rows = sqlx::query_as::<_, DbFeeRecord>(
        r#"
        SELECT id, member_id, amount_cents, paid_at, note, created_at
        FROM private_training_fee_records
        WHERE member_id = ?1
        ORDER BY paid_at DESC, id DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await
    .wrap_err("listing fee records")?;

    Ok(rows.into_iter().map(FeeRecord::from).collect())
}

pub async fn list_session_records(pool: &DbPool, member_id: i64) -> GymResult<Vec<SessionRecord>> {
    let rows = sqlx::query_as::<_, DbSessionRecord>(
        r#"
        SELECT id, member_id, sessions_used, used_at, note, created_at
        FROM private_training_session_records
        WHERE member_id = ?1
        ORDER BY used_at DESC, id DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await
    .wrap_err("listing session records")?;

    Ok(rows.into_iter().map(SessionRecord::from).collect())
}

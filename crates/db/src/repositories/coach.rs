use chrono::{DateTime, Utc};
use eyre::WrapErr;
use gym_core::{
    errors::{GymError, GymResult},
    models::coach::{Coach, CreateCoachRequest, UpdateCoachRequest},
    validation,
};

use super::is_unique_violation;
use crate::{models::DbCoach, DbPool};

pub async fn list_coaches(pool: &DbPool, keyword: Option<&str>) -> GymResult<Vec<Coach>> {
    let keyword = validation::keyword(keyword);

    let rows = sqlx::query_as::<_, DbCoach>(
        r#"
        SELECT employee_no, name, created_at, updated_at
        FROM coaches
        WHERE ?1 IS NULL OR instr(employee_no, ?1) > 0 OR instr(name, ?1) > 0
        ORDER BY employee_no ASC
        "#,
    )
    .bind(keyword)
    .fetch_all(pool)
    .await
    .wrap_err("listing coaches")?;

    Ok(rows.into_iter().map(Coach::from).collect())
}

pub async fn get_coach(pool: &DbPool, employee_no: &str) -> GymResult<Option<Coach>> {
    let row = sqlx::query_as::<_, DbCoach>(
        r#"
        SELECT employee_no, name, created_at, updated_at
        FROM coaches
        WHERE employee_no = ?1
        "#,
    )
    .bind(employee_no.trim())
    .fetch_optional(pool)
    .await
    .wrap_err("loading coach")?;

    Ok(row.map(Coach::from))
}

pub async fn create_coach(
    pool: &DbPool,
    request: &CreateCoachRequest,
    now: DateTime<Utc>,
) -> GymResult<Coach> {
    let request = request.normalized()?;

    tracing::debug!("Creating coach: employee_no={}", request.employee_no);

    if get_coach(pool, &request.employee_no).await?.is_some() {
        return Err(duplicate(&request.employee_no));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO coaches (employee_no, name, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?3)
        "#,
    )
    .bind(&request.employee_no)
    .bind(&request.name)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(Coach {
            employee_no: request.employee_no,
            name: request.name,
            created_at: now,
            updated_at: now,
        }),
        // Lost a race with another insert of the same employee number.
        Err(e) if is_unique_violation(&e) => Err(duplicate(&request.employee_no)),
        Err(e) => Err(GymError::Database(eyre::Report::new(e).wrap_err("inserting coach"))),
    }
}

pub async fn update_coach(
    pool: &DbPool,
    employee_no: &str,
    request: &UpdateCoachRequest,
    now: DateTime<Utc>,
) -> GymResult<Coach> {
    let employee_no = employee_no.trim();
    let request = request.normalized()?;

    let row = sqlx::query_as::<_, DbCoach>(
        r#"
        UPDATE coaches
        SET name = ?2, updated_at = ?3
        WHERE employee_no = ?1
        RETURNING employee_no, name, created_at, updated_at
        "#,
    )
    .bind(employee_no)
    .bind(&request.name)
    .bind(now)
    .fetch_optional(pool)
    .await
    .wrap_err("updating coach")?;

    row.map(Coach::from)
        .ok_or_else(|| GymError::not_found(format!("Coach with employee number {employee_no} not found")))
}

/// Returns whether a coach was removed. Blank or unknown numbers are a no-op.
pub async fn delete_coach(pool: &DbPool, employee_no: &str) -> GymResult<bool> {
    let employee_no = employee_no.trim();
    if employee_no.is_empty() {
        return Ok(false);
    }

    let result = sqlx::query("DELETE FROM coaches WHERE employee_no = ?1")
        .bind(employee_no)
        .execute(pool)
        .await
        .wrap_err("deleting coach")?;

    Ok(result.rows_affected() > 0)
}

fn duplicate(employee_no: &str) -> GymError {
    GymError::validation(format!("employee number {employee_no} already exists"))
}

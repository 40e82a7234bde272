use eyre::{Result, WrapErr};
use tracing::info;

use crate::DbPool;

// Check constraints mirror the domain invariants; the rules in gym-core
// reject bad input before it ever reaches these.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS coaches (
        employee_no TEXT PRIMARY KEY NOT NULL CHECK (length(employee_no) BETWEEN 1 AND 32),
        name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 50),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS private_training_members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 50),
        gender INTEGER NOT NULL DEFAULT 0,
        phone TEXT NOT NULL CHECK (length(phone) BETWEEN 1 AND 20),
        paid_amount_cents INTEGER NOT NULL DEFAULT 0,
        total_sessions INTEGER NOT NULL DEFAULT 0,
        used_sessions INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CONSTRAINT ck_private_training_members_sessions
            CHECK (total_sessions >= 0 AND used_sessions >= 0 AND used_sessions <= total_sessions),
        CONSTRAINT ck_private_training_members_paid_amount
            CHECK (paid_amount_cents >= 0)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS private_training_fee_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id INTEGER NOT NULL REFERENCES private_training_members(id) ON DELETE CASCADE,
        amount_cents INTEGER NOT NULL,
        paid_at TEXT NOT NULL,
        note TEXT NULL CHECK (note IS NULL OR length(note) <= 200),
        created_at TEXT NOT NULL,
        CONSTRAINT ck_private_training_fee_records_amount CHECK (amount_cents > 0)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS private_training_session_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id INTEGER NOT NULL REFERENCES private_training_members(id) ON DELETE CASCADE,
        sessions_used INTEGER NOT NULL,
        used_at TEXT NOT NULL,
        note TEXT NULL CHECK (note IS NULL OR length(note) <= 200),
        created_at TEXT NOT NULL,
        CONSTRAINT ck_private_training_session_records_sessions_used CHECK (sessions_used >= 1)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS annual_card_members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 50),
        gender INTEGER NOT NULL DEFAULT 0,
        phone TEXT NOT NULL CHECK (length(phone) BETWEEN 1 AND 20),
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CONSTRAINT ck_annual_card_members_date_range CHECK (end_date >= start_date)
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_coaches_name ON coaches(name);",
    "CREATE INDEX IF NOT EXISTS idx_private_training_members_name ON private_training_members(name);",
    "CREATE INDEX IF NOT EXISTS idx_private_training_members_phone ON private_training_members(phone);",
    "CREATE INDEX IF NOT EXISTS idx_fee_records_member_paid_at ON private_training_fee_records(member_id, paid_at);",
    "CREATE INDEX IF NOT EXISTS idx_session_records_member_used_at ON private_training_session_records(member_id, used_at);",
    "CREATE INDEX IF NOT EXISTS idx_annual_card_members_end_date ON annual_card_members(end_date);",
    "CREATE INDEX IF NOT EXISTS idx_annual_card_members_name ON annual_card_members(name);",
    "CREATE INDEX IF NOT EXISTS idx_annual_card_members_phone ON annual_card_members(phone);",
];

pub async fn initialize_database(pool: &DbPool) -> Result<()> {
    info!("Initializing database schema...");

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .wrap_err("applying schema statement")?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

use chrono::{DateTime, NaiveDate, Utc};
use gym_core::{
    errors::{GymError, GymResult},
    models::{
        annual_card::AnnualCardMember,
        coach::Coach,
        private_training::{FeeRecord, PrivateTrainingMember, SessionRecord},
        Gender,
    },
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCoach {
    pub employee_no: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPrivateTrainingMember {
    pub id: i64,
    pub name: String,
    pub gender: i64,
    pub phone: String,
    pub paid_amount_cents: i64,
    pub total_sessions: i64,
    pub used_sessions: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFeeRecord {
    pub id: i64,
    pub member_id: i64,
    pub amount_cents: i64,
    pub paid_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSessionRecord {
    pub id: i64,
    pub member_id: i64,
    pub sessions_used: i64,
    pub used_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAnnualCardMember {
    pub id: i64,
    pub name: String,
    pub gender: i64,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Money is stored as integer cents.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn decimal_to_cents(amount: Decimal) -> GymResult<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.round_dp(0).to_i64())
        .ok_or_else(|| GymError::validation(format!("amount {amount} is out of range")))
}

impl From<DbCoach> for Coach {
    fn from(row: DbCoach) -> Self {
        Coach {
            employee_no: row.employee_no,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbPrivateTrainingMember> for PrivateTrainingMember {
    fn from(row: DbPrivateTrainingMember) -> Self {
        PrivateTrainingMember {
            id: row.id,
            name: row.name,
            gender: Gender::from_code(row.gender),
            phone: row.phone,
            paid_amount: cents_to_decimal(row.paid_amount_cents),
            total_sessions: row.total_sessions,
            used_sessions: row.used_sessions,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbFeeRecord> for FeeRecord {
    fn from(row: DbFeeRecord) -> Self {
        FeeRecord {
            id: row.id,
            member_id: row.member_id,
            amount: cents_to_decimal(row.amount_cents),
            paid_at: row.paid_at,
            note: row.note,
            created_at: row.created_at,
        }
    }
}

impl From<DbSessionRecord> for SessionRecord {
    fn from(row: DbSessionRecord) -> Self {
        SessionRecord {
            id: row.id,
            member_id: row.member_id,
            sessions_used: row.sessions_used,
            used_at: row.used_at,
            note: row.note,
            created_at: row.created_at,
        }
    }
}

impl From<DbAnnualCardMember> for AnnualCardMember {
    fn from(row: DbAnnualCardMember) -> Self {
        AnnualCardMember {
            id: row.id,
            name: row.name,
            gender: Gender::from_code(row.gender),
            phone: row.phone,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Gender;
use crate::errors::{GymError, GymResult};
use crate::validation::{self, NAME_MAX_LEN, PHONE_MAX_LEN};

/// Note attached to the fee record generated from an initial payment.
pub const INITIAL_PAYMENT_NOTE: &str = "initial payment";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateTrainingMember {
    pub id: i64,
    pub name: String,
    pub gender: Gender,
    pub phone: String,
    /// Running total of every fee record for this member.
    pub paid_amount: Decimal,
    pub total_sessions: i64,
    /// Running total of every consumption record for this member.
    pub used_sessions: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrivateTrainingMember {
    pub fn remaining_sessions(&self) -> i64 {
        crate::ledger::remaining_sessions(self.total_sessions, self.used_sessions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub id: i64,
    pub member_id: i64,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub member_id: i64,
    pub sessions_used: i64,
    pub used_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated fee entry, ready to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeeRecord {
    pub member_id: i64,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// A validated consumption entry, ready to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSessionRecord {
    pub member_id: i64,
    pub sessions_used: i64,
    pub used_at: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrivateTrainingMemberRequest {
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub phone: String,
    #[serde(default)]
    pub initial_paid_amount: Decimal,
    pub total_sessions: i64,
}

impl CreatePrivateTrainingMemberRequest {
    pub fn normalized(&self) -> GymResult<Self> {
        let name = validation::required("name", &self.name, NAME_MAX_LEN)?;
        let phone = validation::required("phone", &self.phone, PHONE_MAX_LEN)?;

        if self.initial_paid_amount < Decimal::ZERO {
            return Err(GymError::validation("initial_paid_amount must not be negative"));
        }
        validation::money("initial_paid_amount", self.initial_paid_amount)?;
        validation::non_negative("total_sessions", self.total_sessions)?;

        Ok(Self {
            name,
            gender: self.gender,
            phone,
            initial_paid_amount: self.initial_paid_amount,
            total_sessions: self.total_sessions,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePrivateTrainingMemberRequest {
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub phone: String,
    pub total_sessions: i64,
}

impl UpdatePrivateTrainingMemberRequest {
    /// Field checks only; the comparison against the stored used-session
    /// count happens once the member is loaded.
    pub fn normalized(&self) -> GymResult<Self> {
        let name = validation::required("name", &self.name, NAME_MAX_LEN)?;
        let phone = validation::required("phone", &self.phone, PHONE_MAX_LEN)?;
        validation::non_negative("total_sessions", self.total_sessions)?;

        Ok(Self {
            name,
            gender: self.gender,
            phone,
            total_sessions: self.total_sessions,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFeeRequest {
    pub amount: Decimal,
    /// Defaults to the current instant.
    pub paid_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

fn default_sessions_used() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumeSessionsRequest {
    #[serde(default = "default_sessions_used")]
    pub sessions_used: i64,
    /// Defaults to the current instant.
    pub used_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

/// Member as returned to clients, with the derived remaining-session count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateTrainingMemberResponse {
    #[serde(flatten)]
    pub member: PrivateTrainingMember,
    pub remaining_sessions: i64,
}

impl From<PrivateTrainingMember> for PrivateTrainingMemberResponse {
    fn from(member: PrivateTrainingMember) -> Self {
        let remaining_sessions = member.remaining_sessions();
        Self {
            member,
            remaining_sessions,
        }
    }
}

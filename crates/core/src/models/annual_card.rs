use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Gender;
use crate::errors::{GymError, GymResult};
use crate::status::{self, AnnualCardStatus, RenewedTerm};
use crate::validation::{self, NAME_MAX_LEN, PHONE_MAX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualCardMember {
    pub id: i64,
    pub name: String,
    pub gender: Gender,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AnnualCardMember {
    pub fn status(&self, today: NaiveDate, expiring_days: i64) -> AnnualCardStatus {
        status::compute_status(self.end_date, today, expiring_days)
    }

    pub fn days_to_expire(&self, today: NaiveDate) -> i64 {
        status::days_to_expire(self.end_date, today)
    }

    pub fn renewed(&self, today: NaiveDate) -> RenewedTerm {
        status::renew(self.start_date, self.end_date, today)
    }

    pub fn into_response(self, today: NaiveDate, expiring_days: i64) -> AnnualCardMemberResponse {
        let status = self.status(today, expiring_days);
        let days_to_expire = self.days_to_expire(today);
        AnnualCardMemberResponse {
            member: self,
            status,
            days_to_expire,
        }
    }
}

/// Create and update share the same payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualCardMemberRequest {
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AnnualCardMemberRequest {
    pub fn normalized(&self) -> GymResult<Self> {
        let name = validation::required("name", &self.name, NAME_MAX_LEN)?;
        let phone = validation::required("phone", &self.phone, PHONE_MAX_LEN)?;

        if self.end_date < self.start_date {
            return Err(GymError::validation("end_date must not be earlier than start_date"));
        }
        if self.end_date > status::latest_date() {
            return Err(GymError::validation(format!(
                "end_date must not be later than {}",
                status::latest_date()
            )));
        }

        Ok(Self {
            name,
            gender: self.gender,
            phone,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Member as returned to clients, with status derived for the request's "today".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualCardMemberResponse {
    #[serde(flatten)]
    pub member: AnnualCardMember,
    pub status: AnnualCardStatus,
    pub days_to_expire: i64,
}

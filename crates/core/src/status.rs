//! # Membership Status Engine
//!
//! Annual-card status is derived from the card's end date and an explicit
//! "today"; it is never stored, so it cannot drift as calendar days pass.
//! Renewal is plain date arithmetic on the same two dates.

use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::GymError;

/// Days before the end date at which a card counts as expiring soon.
pub const DEFAULT_EXPIRING_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualCardStatus {
    Normal,
    ExpiringSoon,
    Expired,
}

/// Classifies a card by comparing calendar dates only.
///
/// `Expired` when `end_date < today`, `ExpiringSoon` when `end_date` falls
/// within `today ..= today + expiring_days`, otherwise `Normal`. A negative
/// threshold behaves like zero.
pub fn compute_status(end_date: NaiveDate, today: NaiveDate, expiring_days: i64) -> AnnualCardStatus {
    if end_date < today {
        return AnnualCardStatus::Expired;
    }

    if days_to_expire(end_date, today) <= expiring_days.max(0) {
        return AnnualCardStatus::ExpiringSoon;
    }

    AnnualCardStatus::Normal
}

/// Whole days from `today` to `end_date`; negative once the card has expired.
pub fn days_to_expire(end_date: NaiveDate, today: NaiveDate) -> i64 {
    (end_date - today).num_days()
}

/// Date range produced by a renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewedTerm {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Renews a card for one year.
///
/// A card that is still valid today keeps its start date and has its end
/// date pushed out by one year. A lapsed card restarts today and runs for one
/// year from today. Each call extends again; renewal is not idempotent.
pub fn renew(start_date: NaiveDate, end_date: NaiveDate, today: NaiveDate) -> RenewedTerm {
    if end_date >= today {
        RenewedTerm {
            start_date,
            end_date: add_one_year(end_date),
        }
    } else {
        RenewedTerm {
            start_date: today,
            end_date: add_one_year(today),
        }
    }
}

/// Same calendar day next year. Feb 29 lands on Feb 28 in a non-leap year.
/// Never goes past [`latest_date`].
pub fn add_one_year(date: NaiveDate) -> NaiveDate {
    let latest = latest_date();
    date.checked_add_months(Months::new(12))
        .map_or(latest, |next| next.min(latest))
}

/// Latest storable date. Dates are kept as ISO text, which only sorts
/// chronologically for four-digit years.
pub fn latest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Last end date (inclusive) that counts as expiring soon, capped at
/// [`latest_date`]. A negative window behaves like zero.
pub fn expiring_until(today: NaiveDate, expiring_days: i64) -> NaiveDate {
    let latest = latest_date();
    today
        .checked_add_days(Days::new(expiring_days.max(0) as u64))
        .map_or(latest, |until| until.min(latest))
}

/// List filter for annual-card members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualCardFilter {
    #[default]
    All,
    Normal,
    ExpiringSoon,
    Expired,
}

impl AnnualCardFilter {
    pub fn matches(self, status: AnnualCardStatus) -> bool {
        match self {
            AnnualCardFilter::All => true,
            AnnualCardFilter::Normal => status == AnnualCardStatus::Normal,
            AnnualCardFilter::ExpiringSoon => status == AnnualCardStatus::ExpiringSoon,
            AnnualCardFilter::Expired => status == AnnualCardStatus::Expired,
        }
    }
}

impl FromStr for AnnualCardFilter {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(AnnualCardFilter::All),
            "normal" => Ok(AnnualCardFilter::Normal),
            "expiring_soon" | "expiring" => Ok(AnnualCardFilter::ExpiringSoon),
            "expired" => Ok(AnnualCardFilter::Expired),
            other => Err(GymError::validation(format!("unknown annual card filter '{other}'"))),
        }
    }
}

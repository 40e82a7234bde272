use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::annual_card::AnnualCardMember;
use super::private_training::PrivateTrainingMember;
use crate::status::{self, DEFAULT_EXPIRING_DAYS};

/// Longest list the dashboard returns for either attention list.
pub const DASHBOARD_DISPLAY_LIMIT: i64 = 20;

pub const DEFAULT_LOW_REMAINING_THRESHOLD: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardQuery {
    pub today: NaiveDate,
    pub expiring_days: i64,
    pub low_remaining_threshold: i64,
}

impl DashboardQuery {
    /// Negative thresholds are clamped to zero.
    pub fn new(today: NaiveDate, expiring_days: i64, low_remaining_threshold: i64) -> Self {
        Self {
            today,
            expiring_days: expiring_days.max(0),
            low_remaining_threshold: low_remaining_threshold.max(0),
        }
    }

    pub fn with_defaults(today: NaiveDate) -> Self {
        Self::new(today, DEFAULT_EXPIRING_DAYS, DEFAULT_LOW_REMAINING_THRESHOLD)
    }

    /// Last end date (inclusive) that still counts as expiring soon.
    pub fn expiring_until(&self) -> NaiveDate {
        status::expiring_until(self.today, self.expiring_days)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub coach_count: i64,
    pub private_training_member_count: i64,
    pub annual_card_member_count: i64,

    pub annual_card_expiring_count: i64,
    pub annual_card_expired_count: i64,
    pub low_remaining_sessions_count: i64,

    /// Ordered by end date ascending, capped at [`DASHBOARD_DISPLAY_LIMIT`].
    pub expiring_annual_cards: Vec<AnnualCardMember>,
    /// Ordered by remaining sessions ascending, capped at [`DASHBOARD_DISPLAY_LIMIT`].
    pub low_remaining_sessions_members: Vec<PrivateTrainingMember>,
}

//! # Session/Fee Ledger
//!
//! Mutation rules for a private-training member's running totals. Every
//! rule validates first and only then touches the member, so a rejected call
//! leaves the member exactly as it was.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::{GymError, GymResult};
use crate::models::private_training::{NewFeeRecord, NewSessionRecord, PrivateTrainingMember};
use crate::validation;

/// `max(0, total - used)`.
pub fn remaining_sessions(total_sessions: i64, used_sessions: i64) -> i64 {
    total_sessions.saturating_sub(used_sessions).max(0)
}

/// Fee amounts must be strictly positive and representable in cents.
pub fn validate_fee_amount(amount: Decimal) -> GymResult<()> {
    if amount <= Decimal::ZERO {
        return Err(GymError::validation("fee amount must be greater than 0"));
    }
    validation::money("amount", amount)
}

impl PrivateTrainingMember {
    /// Appends a payment: returns the record to persist and raises
    /// `paid_amount` by `amount`.
    pub fn add_fee(
        &mut self,
        amount: Decimal,
        paid_at: DateTime<Utc>,
        note: Option<&str>,
    ) -> GymResult<NewFeeRecord> {
        validate_fee_amount(amount)?;
        let note = validation::optional_note(note)?;
        let paid_amount = self
            .paid_amount
            .checked_add(amount)
            .filter(|total| *total <= validation::money_max())
            .ok_or_else(|| GymError::validation("paid amount would exceed the storable maximum"))?;

        self.paid_amount = paid_amount;

        Ok(NewFeeRecord {
            member_id: self.id,
            amount,
            paid_at,
            note,
        })
    }

    /// Consumes sessions: returns the record to persist and raises
    /// `used_sessions`. Refuses to push usage past the purchased total.
    pub fn consume_sessions(
        &mut self,
        sessions_used: i64,
        used_at: DateTime<Utc>,
        note: Option<&str>,
    ) -> GymResult<NewSessionRecord> {
        if sessions_used < 1 {
            return Err(GymError::validation("sessions used must be at least 1"));
        }
        let note = validation::optional_note(note)?;

        let used_sessions = self
            .used_sessions
            .checked_add(sessions_used)
            .filter(|used| *used <= self.total_sessions)
            .ok_or_else(|| {
                GymError::validation(format!(
                    "consuming {sessions_used} session(s) exceeds the remaining {} session(s)",
                    self.remaining_sessions()
                ))
            })?;

        self.used_sessions = used_sessions;

        Ok(NewSessionRecord {
            member_id: self.id,
            sessions_used,
            used_at,
            note,
        })
    }

    /// Changes the purchased package size. It may not fall below what has
    /// already been used.
    pub fn set_total_sessions(&mut self, total_sessions: i64) -> GymResult<()> {
        validation::non_negative("total_sessions", total_sessions)?;

        if total_sessions < self.used_sessions {
            return Err(GymError::validation(format!(
                "total sessions ({total_sessions}) cannot be less than used sessions ({})",
                self.used_sessions
            )));
        }

        self.total_sessions = total_sessions;
        Ok(())
    }
}

//! Background dashboard reminder.
//!
//! Recomputes the dashboard on a fixed interval and whenever data changes.
//! When annual cards are expiring soon it logs a reminder, at most once per
//! calendar day.

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use gym_core::{
    errors::GymResult,
    models::dashboard::{DashboardQuery, DashboardSnapshot},
};
use gym_db::repositories::dashboard;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::ApiState;

/// Remembers the last date a reminder was emitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTracker {
    last_reminded: Option<NaiveDate>,
}

impl ReminderTracker {
    /// True when a reminder should be logged for `snapshot` on `today`; records
    /// the date when it returns true.
    pub fn should_remind(&mut self, today: NaiveDate, snapshot: &DashboardSnapshot) -> bool {
        if snapshot.annual_card_expiring_count == 0 || self.last_reminded == Some(today) {
            return false;
        }
        self.last_reminded = Some(today);
        true
    }
}

pub fn dashboard_query(state: &ApiState) -> DashboardQuery {
    DashboardQuery::new(
        state.clock.today(),
        state.reminders.expiring_days,
        state.reminders.low_remaining_threshold,
    )
}

/// One recompute pass.
pub async fn refresh(state: &ApiState, tracker: &mut ReminderTracker) -> GymResult<DashboardSnapshot> {
    let query = dashboard_query(state);
    let snapshot = dashboard::get_snapshot(&state.db_pool, &query).await?;

    debug!(
        "Dashboard refreshed: coaches={}, private_training={}, annual_cards={}",
        snapshot.coach_count, snapshot.private_training_member_count, snapshot.annual_card_member_count
    );

    if tracker.should_remind(query.today, &snapshot) {
        let names: Vec<&str> = snapshot
            .expiring_annual_cards
            .iter()
            .map(|member| member.name.as_str())
            .collect();
        warn!(
            "{} annual card(s) expire within {} day(s): {}",
            snapshot.annual_card_expiring_count,
            query.expiring_days,
            names.join(", ")
        );
    }

    Ok(snapshot)
}

/// Runs until the notification channel closes.
pub async fn run(state: Arc<ApiState>) {
    let period = Duration::from_secs(state.reminders.refresh_minutes.max(1) * 60);
    let mut interval = tokio::time::interval(period);
    let mut changes = state.notifier.subscribe();
    let mut tracker = ReminderTracker::default();

    info!("Dashboard reminder started (every {} minute(s))", state.reminders.refresh_minutes);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            received = changes.recv() => match received {
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
        }

        if let Err(err) = refresh(&state, &mut tracker).await {
            warn!("Dashboard refresh failed: {}", err);
        }
    }

    info!("Dashboard reminder stopped");
}

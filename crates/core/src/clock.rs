use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current calendar date and instant.
///
/// Business rules never read the wall clock themselves; handlers ask a
/// `Clock` and pass the values down, which keeps every rule deterministic
/// under test.
pub trait Clock: Send + Sync {
    /// The local calendar date used for expiry and renewal decisions.
    fn today(&self) -> NaiveDate;

    /// The current instant, used as the default fee/consumption timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the host clock. "Today" follows the machine's local time zone,
/// since membership dates are local calendar days.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

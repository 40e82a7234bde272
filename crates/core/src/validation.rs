//! Field-level validation shared by every request type.
//!
//! Strings are trimmed before they are checked; lengths are counted in
//! characters, not bytes, so CJK names get the same limits as Latin ones.

use rust_decimal::Decimal;

use crate::errors::{GymError, GymResult};

pub const EMPLOYEE_NO_MAX_LEN: usize = 32;
pub const NAME_MAX_LEN: usize = 50;
pub const PHONE_MAX_LEN: usize = 20;
pub const NOTE_MAX_LEN: usize = 200;

/// Fractional digits allowed on money amounts.
pub const MONEY_SCALE: u32 = 2;

/// Largest storable amount in cents (a DECIMAL(18,2) column).
pub const MONEY_MAX_CENTS: i64 = 999_999_999_999_999_999;

pub fn money_max() -> Decimal {
    Decimal::new(MONEY_MAX_CENTS, MONEY_SCALE)
}

/// Trims `value` and rejects it when blank or longer than `max_len`.
pub fn required(field: &str, value: &str, max_len: usize) -> GymResult<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(GymError::validation(format!("{field} must not be empty")));
    }

    if trimmed.chars().count() > max_len {
        return Err(GymError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }

    Ok(trimmed.to_string())
}

/// Trims an optional note. Blank notes collapse to `None`.
pub fn optional_note(note: Option<&str>) -> GymResult<Option<String>> {
    let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    if note.chars().count() > NOTE_MAX_LEN {
        return Err(GymError::validation(format!(
            "note must be at most {NOTE_MAX_LEN} characters"
        )));
    }

    Ok(Some(note.to_string()))
}

/// Rejects amounts with more fractional digits than the store keeps.
pub fn money_precision(field: &str, amount: Decimal) -> GymResult<()> {
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(GymError::validation(format!(
            "{field} must have at most {MONEY_SCALE} decimal places"
        )));
    }
    Ok(())
}

/// Precision check plus an upper bound on the magnitude.
pub fn money(field: &str, amount: Decimal) -> GymResult<()> {
    money_precision(field, amount)?;
    if amount.abs() > money_max() {
        return Err(GymError::validation(format!("{field} must not exceed {}", money_max())));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: i64) -> GymResult<()> {
    if value < 0 {
        return Err(GymError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Trimmed search keyword; `None` when there is nothing to match.
pub fn keyword(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

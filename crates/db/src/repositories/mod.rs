//! Repository functions, one module per aggregate.
//!
//! Every function takes the pool explicitly and returns a `GymResult`: rule
//! violations come back as `GymError::Validation`, missing rows as
//! `GymError::NotFound`, and anything the store reports is wrapped
//! unmodified in `GymError::Database`.

pub mod annual_card;
pub mod coach;
pub mod dashboard;
pub mod private_training;

/// True when the error is a UNIQUE or PRIMARY KEY constraint failure.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

//! # Gym Manager Core
//!
//! Domain types and business rules shared by the persistence and HTTP layers.
//! Nothing in this crate performs I/O: "today" and "now" always arrive from
//! the caller, usually through a [`clock::Clock`].

pub mod clock;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod status;
pub mod validation;

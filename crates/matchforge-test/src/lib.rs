//! Shared test fixtures for MatchForge crates.
//!
//! This crate provides rosters, ban lists and raw assignments for tests.
//! It depends only on `matchforge-core` so every other crate can use it as
//! a dev-dependency.
//!
//! - [`roster`] - canonical and deliberately defective rosters
//! - [`assignment`] - a hand-built valid assignment of the canonical roster
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! matchforge-test = { workspace = true }
//! ```

pub mod assignment;
pub mod roster;

pub use assignment::{canonical_assignment, RawAssignment};
pub use roster::{
    ban_everyone, canonical_roster, canonical_roster_input, empty_position_roster_input,
    indivisible_roster_input, POSITION_CODES,
};

//! Score types for representing schedule quality
//!
//! A schedule is scored on two levels: the hard level counts violations of
//! the posted fairness rules, the soft level counts zero-matchup pairs.
//! Both are penalties, so every level is zero or negative.

#[macro_use]
mod macros;
mod hard_soft;
mod traits;


pub use hard_soft::HardSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};

/// Score level representing different constraint priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoreLevel {
    /// Hard constraints - must be satisfied for a valid schedule
    Hard,
    /// Soft constraints - the zero-matchup objective
    Soft,
}

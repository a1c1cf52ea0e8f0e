//! Score traits shared by the scoring and search crates.

use std::fmt::{self, Debug, Display};
use std::ops::{Add, Neg, Sub};

use super::ScoreLevel;

/// A schedule's quality. Higher is better; the hard level dominates.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// No hard rule is violated.
    fn is_feasible(&self) -> bool;

    fn level(&self, level: ScoreLevel) -> i64;

    /// One number ordered like the score, for temperature-based acceptors.
    fn to_scalar(&self) -> f64;
}

/// Scores with a text form such as `"0hard/-120soft"`.
pub trait ParseableScore: Score {
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    fn to_string_repr(&self) -> String;
}

/// A score string that does not match its type's format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl Display for ScoreParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse score: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}

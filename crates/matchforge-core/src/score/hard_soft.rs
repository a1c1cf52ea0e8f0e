//! HardSoftScore - Two-level score with hard rules and the soft objective

use std::cmp::Ordering;
use std::fmt;

use super::traits::Score;
use super::ScoreLevel;

/// Weight of one hard point when both levels are collapsed into a scalar.
const HARD_SCALAR_WEIGHT: f64 = 1_000.0;

/// A score with separate hard and soft levels.
///
/// The hard level is the negated number of rule violations, the soft level
/// the negated number of zero-matchup pairs. Hard scores are compared first;
/// soft scores only break ties.
///
/// # Examples
///
/// ```
/// use matchforge_core::HardSoftScore;
///
/// let broken = HardSoftScore::of(-1, -80);  // one rule violated
/// let valid = HardSoftScore::of(0, -140);   // valid but many zero-matchups
///
/// // Valid schedules are always better than invalid ones
/// assert!(valid > broken);
///
/// let better = HardSoftScore::of(0, -120);
/// assert!(better > valid);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    /// One hard constraint penalty.
    pub const ONE_HARD: HardSoftScore = HardSoftScore { hard: 1, soft: 0 };

    /// One soft constraint penalty.
    pub const ONE_SOFT: HardSoftScore = HardSoftScore { hard: 0, soft: 1 };

    /// Creates a new HardSoftScore.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore { hard, soft: 0 }
    }

    /// Creates a score with only a soft component.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore { hard: 0, soft }
    }

    /// Creates the (negative) score of `count` matches at the given level.
    #[inline]
    pub const fn penalty(level: ScoreLevel, count: i64) -> Self {
        match level {
            ScoreLevel::Hard => HardSoftScore::of_hard(-count),
            ScoreLevel::Soft => HardSoftScore::of_soft(-count),
        }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Returns the component for a level.
    #[inline]
    pub const fn level(&self, level: ScoreLevel) -> i64 {
        match level {
            ScoreLevel::Hard => self.hard,
            ScoreLevel::Soft => self.soft,
        }
    }
}

impl Score for HardSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    fn level(&self, level: ScoreLevel) -> i64 {
        HardSoftScore::level(self, level)
    }

    #[inline]
    fn to_scalar(&self) -> f64 {
        self.hard as f64 * HARD_SCALAR_WEIGHT + self.soft as f64
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl_score_ops!(HardSoftScore { hard, soft } => of);
impl_score_parse!(HardSoftScore { hard => "hard", soft => "soft" } => of);

impl std::iter::Sum for HardSoftScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(HardSoftScore::ZERO, |acc, s| acc + s)
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

//! Names and levels of the posted rules and objective terms.

use matchforge_core::ConstraintRef;

/// The hard rules of a tournament schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HardRule {
    /// Each slot holds a player of the slot's position.
    Domain,
    /// All players of one game are pairwise distinct.
    IntraGameUniqueness,
    /// Exactly `tier1_per_team` Tier-1 players on every team.
    TeamTierBalance,
    /// Every Tier-1 pair faces each other in exactly one game.
    Tier1RoundRobin,
    /// Same-position pairs face each other a minimum number of times.
    SamePositionRivalry,
    /// Non-Tier-1 players play the same number of games.
    PlayCountEqualization,
    /// Games per day stay within the configured band.
    DayLoadBalancing,
    /// Banned players sit out every game on their banned day.
    DayBans,
    /// No player plays index-adjacent games on the same day.
    NoSameDayBackToBack,
}

impl HardRule {
    pub const COUNT: usize = 9;

    pub const ALL: [HardRule; HardRule::COUNT] = [
        HardRule::Domain,
        HardRule::IntraGameUniqueness,
        HardRule::TeamTierBalance,
        HardRule::Tier1RoundRobin,
        HardRule::SamePositionRivalry,
        HardRule::PlayCountEqualization,
        HardRule::DayLoadBalancing,
        HardRule::DayBans,
        HardRule::NoSameDayBackToBack,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            HardRule::Domain => "Slot domain",
            HardRule::IntraGameUniqueness => "Intra-game uniqueness",
            HardRule::TeamTierBalance => "Team tier balance",
            HardRule::Tier1RoundRobin => "Tier-1 round robin",
            HardRule::SamePositionRivalry => "Same-position minimum rivalry",
            HardRule::PlayCountEqualization => "Non-Tier-1 play-count equalization",
            HardRule::DayLoadBalancing => "Day load balancing",
            HardRule::DayBans => "Per-day bans",
            HardRule::NoSameDayBackToBack => "No same-day back-to-back",
        }
    }

    pub fn constraint_ref(self) -> ConstraintRef {
        ConstraintRef::tournament(self.name())
    }
}

/// The two indicator families of the zero-matchup objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoftTerm {
    NeverEnemies,
    NeverAllies,
}

impl SoftTerm {
    pub const ALL: [SoftTerm; 2] = [SoftTerm::NeverEnemies, SoftTerm::NeverAllies];

    pub fn name(self) -> &'static str {
        match self {
            SoftTerm::NeverEnemies => "Never enemies",
            SoftTerm::NeverAllies => "Never allies",
        }
    }

    pub fn constraint_ref(self) -> ConstraintRef {
        ConstraintRef::tournament(self.name())
    }
}

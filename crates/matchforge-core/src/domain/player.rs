//! Player records.

use std::fmt;

/// Dense player identifier, assigned in roster order starting at 0.
pub type PlayerId = usize;

/// Index into the roster's ordered position list.
pub type PositionIdx = usize;

/// A roster player. Immutable once the roster is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    /// Canonical name, used for ban entry and lookups.
    pub name: String,
    pub alias: String,
    pub position: PositionIdx,
    /// 1-based rank within the position; rank 1 is Tier-1.
    pub rank: u32,
}

impl Player {
    #[inline]
    pub fn is_tier1(&self) -> bool {
        self.rank == 1
    }

    /// Returns `"alias(name)"`.
    pub fn display_name(&self) -> String {
        format!("{}({})", self.alias, self.name)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.alias, self.name)
    }
}

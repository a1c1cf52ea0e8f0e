//! Position-partitioned roster with id and name lookups.

use std::collections::{HashMap, HashSet};

use super::player::{Player, PlayerId, PositionIdx};
use crate::error::{MatchForgeError, Result};

/// One `(rank, alias, name)` roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub rank: u32,
    pub alias: String,
    pub name: String,
}

impl RosterEntry {
    pub fn new(rank: u32, alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            rank,
            alias: alias.into(),
            name: name.into(),
        }
    }
}

/// The players of one position, in rank order as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionInput {
    pub code: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entries: Vec<RosterEntry>,
}

/// Raw roster as supplied by the caller.
///
/// # Example
///
/// ```
/// use matchforge_core::{Roster, RosterInput};
///
/// let input = RosterInput::new()
///     .with_position("T", [(1, "Ace", "T1"), (2, "Bolt", "T2")])
///     .with_position("S", [(1, "Cove", "S1"), (2, "Dune", "S2")]);
///
/// let roster = Roster::from_input(&input).unwrap();
/// assert_eq!(roster.player_count(), 4);
/// assert_eq!(roster.tier1_players().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterInput {
    #[cfg_attr(feature = "serde", serde(default))]
    pub positions: Vec<PositionInput>,
}

impl RosterInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a position with `(rank, alias, name)` rows.
    pub fn with_position<'a, I>(mut self, code: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, &'a str, &'a str)>,
    {
        self.positions.push(PositionInput {
            code: code.into(),
            entries: entries
                .into_iter()
                .map(|(rank, alias, name)| RosterEntry::new(rank, alias, name))
                .collect(),
        });
        self
    }
}

/// Validated roster.
///
/// Player ids are dense and follow input order: all players of the first
/// position, then the second, and so on.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
    position_codes: Vec<String>,
    by_position: Vec<Vec<PlayerId>>,
    tier1_by_position: Vec<PlayerId>,
    by_name: HashMap<String, PlayerId>,
}

impl Roster {
    /// Loads and validates a roster.
    ///
    /// Fails with [`MatchForgeError::InvalidRoster`] when there are no
    /// positions, a position is empty, a position lacks exactly one rank-1
    /// player, a rank is 0 or repeated, or a name or position code is
    /// repeated.
    pub fn from_input(input: &RosterInput) -> Result<Self> {
        if input.positions.is_empty() {
            return Err(MatchForgeError::InvalidRoster(
                "roster has no positions".to_string(),
            ));
        }

        let mut players = Vec::new();
        let mut position_codes = Vec::with_capacity(input.positions.len());
        let mut by_position = Vec::with_capacity(input.positions.len());
        let mut tier1_by_position = Vec::with_capacity(input.positions.len());
        let mut by_name = HashMap::new();
        let mut seen_codes = HashSet::new();

        for (position, pos_input) in input.positions.iter().enumerate() {
            let code = pos_input.code.trim();
            if code.is_empty() {
                return Err(MatchForgeError::InvalidRoster(format!(
                    "position {} has an empty code",
                    position + 1
                )));
            }
            if !seen_codes.insert(code.to_string()) {
                return Err(MatchForgeError::InvalidRoster(format!(
                    "position code '{}' is repeated",
                    code
                )));
            }
            if pos_input.entries.is_empty() {
                return Err(MatchForgeError::InvalidRoster(format!(
                    "position '{}' has no eligible players",
                    code
                )));
            }

            let mut ranks = HashSet::new();
            let mut ids = Vec::with_capacity(pos_input.entries.len());
            let mut tier1 = Vec::new();

            for entry in &pos_input.entries {
                if entry.rank == 0 {
                    return Err(MatchForgeError::InvalidRoster(format!(
                        "player '{}' in position '{}' has rank 0",
                        entry.name, code
                    )));
                }
                if !ranks.insert(entry.rank) {
                    return Err(MatchForgeError::InvalidRoster(format!(
                        "rank {} is repeated in position '{}'",
                        entry.rank, code
                    )));
                }
                let name = entry.name.trim();
                if name.is_empty() {
                    return Err(MatchForgeError::InvalidRoster(format!(
                        "position '{}' has a player with an empty name",
                        code
                    )));
                }

                let id = players.len();
                if by_name.insert(name.to_string(), id).is_some() {
                    return Err(MatchForgeError::InvalidRoster(format!(
                        "player name '{}' is repeated",
                        name
                    )));
                }
                if entry.rank == 1 {
                    tier1.push(id);
                }
                ids.push(id);
                players.push(Player {
                    id,
                    name: name.to_string(),
                    alias: entry.alias.trim().to_string(),
                    position,
                    rank: entry.rank,
                });
            }

            match tier1.as_slice() {
                [single] => tier1_by_position.push(*single),
                _ => {
                    return Err(MatchForgeError::InvalidRoster(format!(
                        "position '{}' must have exactly one rank-1 player, found {}",
                        code,
                        tier1.len()
                    )))
                }
            }

            position_codes.push(code.to_string());
            by_position.push(ids);
        }

        tracing::debug!(
            players = players.len(),
            positions = position_codes.len(),
            "Roster loaded"
        );

        Ok(Self {
            players,
            position_codes,
            by_position,
            tier1_by_position,
            by_name,
        })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn position_count(&self) -> usize {
        self.position_codes.len()
    }

    /// Returns the player with the given id.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up a player by canonical name.
    pub fn id_of(&self, name: &str) -> Option<PlayerId> {
        self.by_name.get(name.trim()).copied()
    }

    #[inline]
    pub fn players_at(&self, position: PositionIdx) -> &[PlayerId] {
        &self.by_position[position]
    }

    #[inline]
    pub fn tier1_of(&self, position: PositionIdx) -> PlayerId {
        self.tier1_by_position[position]
    }

    /// Tier-1 players, one per position, in position order.
    pub fn tier1_players(&self) -> &[PlayerId] {
        &self.tier1_by_position
    }

    pub fn non_tier1_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| !p.is_tier1())
            .map(|p| p.id)
            .collect()
    }

    pub fn position_code(&self, position: PositionIdx) -> &str {
        &self.position_codes[position]
    }

    pub fn position_codes(&self) -> &[String] {
        &self.position_codes
    }

    /// Returns `"alias(name)"` for a player.
    pub fn display_name(&self, id: PlayerId) -> String {
        self.players[id].display_name()
    }

    #[inline]
    pub fn is_tier1(&self, id: PlayerId) -> bool {
        self.players[id].is_tier1()
    }

    #[inline]
    pub fn position_of(&self, id: PlayerId) -> PositionIdx {
        self.players[id].position
    }

    /// Size of the smallest position pool.
    pub fn smallest_pool(&self) -> usize {
        self.by_position.iter().map(Vec::len).min().unwrap_or(0)
    }
}

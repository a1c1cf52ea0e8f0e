//! Derived pair relations: who plays, who teams up, who faces whom.
//!
//! Relations are never decision state; they are recomputed from a
//! [`TournamentSolution`]. Every unordered pair of distinct players gets a
//! dense id from [`PairIndex`], and each game lists the pairs it relates
//! in a [`GameRelations`]. Lists are deduplicated, so a relation is boolean
//! per `(pair, game)` even in schedules that repeat a player.

use matchforge_core::PlayerId;
use smallvec::SmallVec;

use crate::solution::TournamentSolution;

/// Dense id of an unordered player pair.
pub type PairId = usize;

/// Bijection between unordered pairs `{a, b}` (`a != b`) and `0..len()`.
#[derive(Debug, Clone)]
pub struct PairIndex {
    player_count: usize,
    pairs: Vec<(PlayerId, PlayerId)>,
}

impl PairIndex {
    pub fn new(player_count: usize) -> Self {
        let mut pairs = Vec::with_capacity(player_count * player_count.saturating_sub(1) / 2);
        for a in 0..player_count {
            for b in (a + 1)..player_count {
                pairs.push((a, b));
            }
        }
        Self {
            player_count,
            pairs,
        }
    }

    /// Returns the id of `{a, b}`.
    ///
    /// # Panics
    /// Debug-asserts `a != b`.
    #[inline]
    pub fn id(&self, a: PlayerId, b: PlayerId) -> PairId {
        debug_assert_ne!(a, b, "a pair needs two distinct players");
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        i * self.player_count - i * (i + 1) / 2 + (j - i - 1)
    }

    /// Returns the players of a pair, lower id first.
    #[inline]
    pub fn players(&self, pair: PairId) -> (PlayerId, PlayerId) {
        self.pairs[pair]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (PairId, (PlayerId, PlayerId))> + '_ {
        self.pairs.iter().copied().enumerate()
    }
}

/// The relations of one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRelations {
    /// Players present in the game, sorted and distinct.
    pub presence: SmallVec<[PlayerId; 16]>,
    /// Pairs on the same team, distinct.
    pub allies: SmallVec<[PairId; 32]>,
    /// Pairs on different teams, distinct.
    pub enemies: SmallVec<[PairId; 32]>,
}

impl GameRelations {
    /// Derives the relations of `game`.
    ///
    /// Ally pairs come from two different positions of one team; enemy
    /// pairs from two slots on different teams. A player occupying two
    /// slots never forms a pair with themself.
    pub fn build(solution: &TournamentSolution, pairs: &PairIndex, game: usize) -> Self {
        let mut rel = GameRelations::default();
        let teams = solution.teams();

        for team in 0..teams {
            let lineup = solution.team(game, team);
            rel.presence.extend_from_slice(lineup);
            for (p, &a) in lineup.iter().enumerate() {
                for &b in &lineup[p + 1..] {
                    if a != b {
                        rel.allies.push(pairs.id(a, b));
                    }
                }
            }
            for other in (team + 1)..teams {
                for &a in lineup {
                    for &b in solution.team(game, other) {
                        if a != b {
                            rel.enemies.push(pairs.id(a, b));
                        }
                    }
                }
            }
        }

        rel.presence.sort_unstable();
        rel.presence.dedup();
        rel.allies.sort_unstable();
        rel.allies.dedup();
        rel.enemies.sort_unstable();
        rel.enemies.dedup();
        rel
    }

    #[inline]
    pub fn plays(&self, player: PlayerId) -> bool {
        self.presence.binary_search(&player).is_ok()
    }

    /// Number of players present in both games.
    pub fn shared_players(&self, other: &GameRelations) -> usize {
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < self.presence.len() && j < other.presence.len() {
            match self.presence[i].cmp(&other.presence[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }
}

const BOTH_PLAY: u8 = 0b001;
const ALLY: u8 = 0b010;
const ENEMY: u8 = 0b100;

/// Dense `(pair, game)` matrix of `BothPlay`, `Ally` and `Enemy`.
#[derive(Debug, Clone)]
pub struct RelationMatrix {
    game_count: usize,
    flags: Vec<u8>,
}

impl RelationMatrix {
    pub fn build(solution: &TournamentSolution, pairs: &PairIndex) -> Self {
        let game_count = solution.game_count();
        let mut flags = vec![0u8; pairs.len() * game_count];

        for game in 0..game_count {
            let rel = GameRelations::build(solution, pairs, game);
            for (i, &a) in rel.presence.iter().enumerate() {
                for &b in &rel.presence[i + 1..] {
                    flags[pairs.id(a, b) * game_count + game] |= BOTH_PLAY;
                }
            }
            for &pair in &rel.allies {
                flags[pair * game_count + game] |= ALLY;
            }
            for &pair in &rel.enemies {
                flags[pair * game_count + game] |= ENEMY;
            }
        }

        Self { game_count, flags }
    }

    #[inline]
    fn get(&self, pair: PairId, game: usize, flag: u8) -> bool {
        self.flags[pair * self.game_count + game] & flag != 0
    }

    pub fn both_play(&self, pair: PairId, game: usize) -> bool {
        self.get(pair, game, BOTH_PLAY)
    }

    pub fn ally(&self, pair: PairId, game: usize) -> bool {
        self.get(pair, game, ALLY)
    }

    pub fn enemy(&self, pair: PairId, game: usize) -> bool {
        self.get(pair, game, ENEMY)
    }

    /// Number of games in which the pair are enemies.
    pub fn enemy_count(&self, pair: PairId) -> usize {
        (0..self.game_count).filter(|&g| self.enemy(pair, g)).count()
    }

    /// Number of games in which the pair are allies.
    pub fn ally_count(&self, pair: PairId) -> usize {
        (0..self.game_count).filter(|&g| self.ally(pair, g)).count()
    }

    pub fn game_count(&self) -> usize {
        self.game_count
    }
}

#[cfg(test)]
#[path = "relations_tests.rs"]
mod tests;

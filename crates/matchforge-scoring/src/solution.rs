//! Working assignment of players to game slots and games to days.

use matchforge_core::{HardSoftScore, MatchForgeError, PlayerId, PositionIdx, Result};

/// Flat assignment of one tournament.
///
/// Slot `(game * teams + team) * positions + position` holds the player at
/// that position of that team; `days[game]` is the 0-based day of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSolution {
    game_count: usize,
    teams: usize,
    positions: usize,
    slots: Vec<PlayerId>,
    days: Vec<usize>,
    score: Option<HardSoftScore>,
}

impl TournamentSolution {
    /// Builds a solution from raw slot and day vectors.
    pub fn new(
        game_count: usize,
        teams: usize,
        positions: usize,
        slots: Vec<PlayerId>,
        days: Vec<usize>,
    ) -> Result<Self> {
        if slots.len() != game_count * teams * positions {
            return Err(MatchForgeError::Internal(format!(
                "expected {} slots, got {}",
                game_count * teams * positions,
                slots.len()
            )));
        }
        if days.len() != game_count {
            return Err(MatchForgeError::Internal(format!(
                "expected {} day assignments, got {}",
                game_count,
                days.len()
            )));
        }
        Ok(Self {
            game_count,
            teams,
            positions,
            slots,
            days,
            score: None,
        })
    }

    #[inline]
    pub fn game_count(&self) -> usize {
        self.game_count
    }

    #[inline]
    pub fn teams(&self) -> usize {
        self.teams
    }

    #[inline]
    pub fn positions(&self) -> usize {
        self.positions
    }

    #[inline]
    pub fn slots_per_game(&self) -> usize {
        self.teams * self.positions
    }

    #[inline]
    pub fn slot_index(&self, game: usize, team: usize, position: PositionIdx) -> usize {
        (game * self.teams + team) * self.positions + position
    }

    #[inline]
    pub fn slot(&self, game: usize, team: usize, position: PositionIdx) -> PlayerId {
        self.slots[self.slot_index(game, team, position)]
    }

    #[inline]
    pub fn slot_at(&self, index: usize) -> PlayerId {
        self.slots[index]
    }

    #[inline]
    pub fn set_slot_at(&mut self, index: usize, player: PlayerId) {
        self.slots[index] = player;
    }

    pub fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    pub fn slots(&self) -> &[PlayerId] {
        &self.slots
    }

    /// Game that owns a slot index.
    #[inline]
    pub fn game_of_slot(&self, index: usize) -> usize {
        index / self.slots_per_game()
    }

    /// Position of a slot index.
    #[inline]
    pub fn position_of_slot(&self, index: usize) -> PositionIdx {
        index % self.positions
    }

    /// All players of one team, in position order.
    pub fn team(&self, game: usize, team: usize) -> &[PlayerId] {
        let start = self.slot_index(game, team, 0);
        &self.slots[start..start + self.positions]
    }

    /// All players of one game, team by team.
    pub fn game(&self, game: usize) -> &[PlayerId] {
        let start = game * self.slots_per_game();
        &self.slots[start..start + self.slots_per_game()]
    }

    #[inline]
    pub fn day(&self, game: usize) -> usize {
        self.days[game]
    }

    #[inline]
    pub fn set_day(&mut self, game: usize, day: usize) {
        self.days[game] = day;
    }

    pub fn days(&self) -> &[usize] {
        &self.days
    }

    /// Swaps the full lineups of two games; days stay with the game index.
    pub fn swap_lineups(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let per_game = self.slots_per_game();
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi * per_game);
        head[lo * per_game..(lo + 1) * per_game].swap_with_slice(&mut tail[..per_game]);
    }

    pub fn score(&self) -> Option<HardSoftScore> {
        self.score
    }

    pub fn set_score(&mut self, score: Option<HardSoftScore>) {
        self.score = score;
    }
}

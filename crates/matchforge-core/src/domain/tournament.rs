//! Tournament shape: game count, day band and team layout.

use crate::error::{MatchForgeError, Result};

/// Shape of the bracket to schedule.
///
/// The canonical tournament is 10 games over 3 days with 3 to 4 games per
/// day, two teams per game and one Tier-1 player per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tournament {
    pub game_count: usize,
    pub day_count: usize,
    pub teams_per_game: usize,
    pub min_games_per_day: usize,
    pub max_games_per_day: usize,
    /// Exact number of Tier-1 players on every team of every game.
    pub tier1_per_team: usize,
    /// Minimum number of games in which two same-position players are enemies.
    pub min_same_position_rivalry: usize,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            game_count: 10,
            day_count: 3,
            teams_per_game: 2,
            min_games_per_day: 3,
            max_games_per_day: 4,
            tier1_per_team: 1,
            min_same_position_rivalry: 1,
        }
    }
}

impl Tournament {
    pub fn canonical() -> Self {
        Self::default()
    }

    pub fn with_games(mut self, game_count: usize) -> Self {
        self.game_count = game_count;
        self
    }

    pub fn with_days(mut self, day_count: usize, min_per_day: usize, max_per_day: usize) -> Self {
        self.day_count = day_count;
        self.min_games_per_day = min_per_day;
        self.max_games_per_day = max_per_day;
        self
    }

    pub fn with_teams_per_game(mut self, teams: usize) -> Self {
        self.teams_per_game = teams;
        self
    }

    pub fn with_tier1_per_team(mut self, count: usize) -> Self {
        self.tier1_per_team = count;
        self
    }

    pub fn with_min_rivalry(mut self, min: usize) -> Self {
        self.min_same_position_rivalry = min;
        self
    }

    /// Slots per game for a roster with `positions` positions.
    #[inline]
    pub fn slots_per_game(&self, positions: usize) -> usize {
        self.teams_per_game * positions
    }

    /// True when the day band can add up to the game count.
    pub fn day_band_admits_total(&self) -> bool {
        self.day_count * self.min_games_per_day <= self.game_count
            && self.day_count * self.max_games_per_day >= self.game_count
    }

    /// Checks the structural shape against a roster's layout.
    ///
    /// Fails with [`MatchForgeError::InvalidModel`]; an arithmetic mismatch
    /// of the day band is not structural and is left to the feasibility
    /// screen.
    pub fn validate(&self, positions: usize, smallest_pool: usize) -> Result<()> {
        if self.teams_per_game != 2 {
            return Err(MatchForgeError::InvalidModel(format!(
                "enemy relations are defined for two teams per game, got {}",
                self.teams_per_game
            )));
        }
        if self.game_count == 0 {
            return Err(MatchForgeError::InvalidModel(
                "game count must be positive".to_string(),
            ));
        }
        if self.day_count == 0 {
            return Err(MatchForgeError::InvalidModel(
                "day count must be positive".to_string(),
            ));
        }
        if self.min_games_per_day > self.max_games_per_day {
            return Err(MatchForgeError::InvalidModel(format!(
                "games per day band is empty: min {} > max {}",
                self.min_games_per_day, self.max_games_per_day
            )));
        }
        if self.tier1_per_team == 0 || self.tier1_per_team > positions {
            return Err(MatchForgeError::InvalidModel(format!(
                "tier-1 players per team must be in 1..={}, got {}",
                positions, self.tier1_per_team
            )));
        }
        if smallest_pool < self.teams_per_game {
            return Err(MatchForgeError::InvalidModel(format!(
                "a position has {} players but {} teams need a slot each",
                smallest_pool, self.teams_per_game
            )));
        }
        Ok(())
    }
}

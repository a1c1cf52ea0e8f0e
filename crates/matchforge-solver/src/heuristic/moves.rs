//! Schedule moves.

use std::fmt;

use matchforge_core::{HardSoftScore, PlayerId};
use matchforge_scoring::{ScoreDirector, TournamentSolution};

/// One change to the working schedule.
///
/// Moves are plain values. Every mutation goes through the score director,
/// which returns the new score; a move is undone by applying its inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleMove {
    /// Puts `player` into `slot`.
    ChangeSlot { slot: usize, player: PlayerId },
    /// Exchanges the players of two slots of the same position.
    SwapSlots { a: usize, b: usize },
    /// Moves a game to another day.
    ChangeDay { game: usize, day: usize },
    /// Exchanges the days of two games.
    SwapDays { a: usize, b: usize },
    /// Exchanges the full lineups of two games, keeping their days.
    SwapLineups { a: usize, b: usize },
}

impl ScheduleMove {
    /// Returns false for moves that would leave the schedule unchanged.
    pub fn is_doable<D: ScoreDirector>(&self, score_director: &D) -> bool {
        let solution = score_director.working_solution();
        match *self {
            ScheduleMove::ChangeSlot { slot, player } => solution.slot_at(slot) != player,
            ScheduleMove::SwapSlots { a, b } => {
                a != b
                    && solution.slot_at(a) != solution.slot_at(b)
                    && solution.position_of_slot(a) == solution.position_of_slot(b)
            }
            ScheduleMove::ChangeDay { game, day } => solution.day(game) != day,
            ScheduleMove::SwapDays { a, b } => solution.day(a) != solution.day(b),
            ScheduleMove::SwapLineups { a, b } => a != b,
        }
    }

    /// Applies the move and returns the resulting score.
    pub fn do_move<D: ScoreDirector>(&self, score_director: &mut D) -> HardSoftScore {
        match *self {
            ScheduleMove::ChangeSlot { slot, player } => score_director.change_slot(slot, player),
            ScheduleMove::SwapSlots { a, b } => score_director.swap_slots(a, b),
            ScheduleMove::ChangeDay { game, day } => score_director.change_day(game, day),
            ScheduleMove::SwapDays { a, b } => score_director.swap_days(a, b),
            ScheduleMove::SwapLineups { a, b } => score_director.swap_lineups(a, b),
        }
    }

    /// The move that restores `solution` after this one is applied to it.
    pub fn inverse(&self, solution: &TournamentSolution) -> ScheduleMove {
        match *self {
            ScheduleMove::ChangeSlot { slot, .. } => ScheduleMove::ChangeSlot {
                slot,
                player: solution.slot_at(slot),
            },
            ScheduleMove::ChangeDay { game, .. } => ScheduleMove::ChangeDay {
                game,
                day: solution.day(game),
            },
            swap => swap,
        }
    }

    /// Scores the move without keeping it.
    pub fn evaluate<D: ScoreDirector>(&self, score_director: &mut D) -> HardSoftScore {
        let undo = self.inverse(score_director.working_solution());
        let score = self.do_move(score_director);
        undo.do_move(score_director);
        score
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScheduleMove::ChangeSlot { .. } => "ChangeSlot",
            ScheduleMove::SwapSlots { .. } => "SwapSlots",
            ScheduleMove::ChangeDay { .. } => "ChangeDay",
            ScheduleMove::SwapDays { .. } => "SwapDays",
            ScheduleMove::SwapLineups { .. } => "SwapLineups",
        }
    }
}

impl fmt::Display for ScheduleMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleMove::ChangeSlot { slot, player } => write!(f, "slot {} <- player {}", slot, player),
            ScheduleMove::SwapSlots { a, b } => write!(f, "slot {} <-> slot {}", a, b),
            ScheduleMove::ChangeDay { game, day } => write!(f, "game {} -> day {}", game, day),
            ScheduleMove::SwapDays { a, b } => write!(f, "days of games {} <-> {}", a, b),
            ScheduleMove::SwapLineups { a, b } => write!(f, "lineups of games {} <-> {}", a, b),
        }
    }
}

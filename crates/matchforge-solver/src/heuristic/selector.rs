//! Random move selection.

use rand::Rng;

use matchforge_scoring::{ScheduleModel, TournamentSolution};

use super::ScheduleMove;

/// Relative weights of the move kinds a selector draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveMix {
    pub change_slot: u32,
    pub swap_slots: u32,
    pub change_day: u32,
    pub swap_days: u32,
    pub swap_lineups: u32,
}

impl MoveMix {
    fn total(&self) -> u32 {
        self.change_slot + self.swap_slots + self.change_day + self.swap_days + self.swap_lineups
    }
}

impl Default for MoveMix {
    fn default() -> Self {
        Self {
            change_slot: 30,
            swap_slots: 40,
            change_day: 10,
            swap_days: 10,
            swap_lineups: 10,
        }
    }
}

/// Draws a batch of random moves per step.
///
/// Slot changes stay within the slot's position pool and slot swaps pair
/// slots of the same position, so every proposed move keeps the domain rule.
#[derive(Debug, Clone)]
pub struct RandomMoveSelector {
    batch_size: usize,
    mix: MoveMix,
}

impl RandomMoveSelector {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            mix: MoveMix::default(),
        }
    }

    pub fn with_mix(mut self, mix: MoveMix) -> Self {
        self.mix = mix;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Replaces the contents of `moves` with a fresh batch.
    pub fn select_moves<R: Rng>(
        &self,
        model: &ScheduleModel,
        solution: &TournamentSolution,
        rng: &mut R,
        moves: &mut Vec<ScheduleMove>,
    ) {
        moves.clear();
        for _ in 0..self.batch_size {
            moves.push(self.next_move(model, solution, rng));
        }
    }

    /// Draws one move.
    pub fn next_move<R: Rng>(
        &self,
        model: &ScheduleModel,
        solution: &TournamentSolution,
        rng: &mut R,
    ) -> ScheduleMove {
        let games = solution.game_count();
        let days = model.day_count();
        let slots = games * solution.slots_per_game();

        let total = self.mix.total().max(1);
        let mut pick = rng.random_range(0..total);

        if pick < self.mix.change_slot {
            let slot = rng.random_range(0..slots);
            let domain = model.domain(solution.position_of_slot(slot));
            let player = domain[rng.random_range(0..domain.len())];
            return ScheduleMove::ChangeSlot { slot, player };
        }
        pick -= self.mix.change_slot;

        if pick < self.mix.swap_slots {
            let a = rng.random_range(0..slots);
            let position = solution.position_of_slot(a);
            let game = rng.random_range(0..games);
            let team = rng.random_range(0..solution.teams());
            let b = solution.slot_index(game, team, position);
            return ScheduleMove::SwapSlots { a, b };
        }
        pick -= self.mix.swap_slots;

        if pick < self.mix.change_day {
            return ScheduleMove::ChangeDay {
                game: rng.random_range(0..games),
                day: rng.random_range(0..days),
            };
        }
        pick -= self.mix.change_day;

        let a = rng.random_range(0..games);
        let b = rng.random_range(0..games);
        if pick < self.mix.swap_days {
            ScheduleMove::SwapDays { a, b }
        } else {
            ScheduleMove::SwapLineups { a, b }
        }
    }
}

impl Default for RandomMoveSelector {
    fn default() -> Self {
        Self::new(64)
    }
}

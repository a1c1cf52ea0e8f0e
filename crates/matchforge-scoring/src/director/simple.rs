//! Simple score director with full recalculation.

use matchforge_core::{HardSoftScore, PlayerId};

use super::traits::ScoreDirector;
use crate::assembler::ScheduleModel;
use crate::evaluate::evaluate_full;
use crate::objective::Objective;
use crate::solution::TournamentSolution;

/// A score director that rescores the whole schedule after every change.
///
/// Inefficient but correct; the baseline the incremental director is
/// tested against.
pub struct SimpleScoreDirector<'m> {
    model: &'m ScheduleModel,
    objective: &'m Objective,
    working_solution: TournamentSolution,
    score: HardSoftScore,
    calculation_count: u64,
}

impl<'m> SimpleScoreDirector<'m> {
    pub fn new(model: &'m ScheduleModel, objective: &'m Objective, solution: TournamentSolution) -> Self {
        let mut director = Self {
            model,
            objective,
            working_solution: solution,
            score: HardSoftScore::ZERO,
            calculation_count: 0,
        };
        director.recalculate();
        director
    }

    fn recalculate(&mut self) -> HardSoftScore {
        self.score = evaluate_full(self.model, self.objective, &self.working_solution).score();
        self.calculation_count += 1;
        self.score
    }

    pub fn into_solution(mut self) -> TournamentSolution {
        self.working_solution.set_score(Some(self.score));
        self.working_solution
    }
}

impl ScoreDirector for SimpleScoreDirector<'_> {
    fn working_solution(&self) -> &TournamentSolution {
        &self.working_solution
    }

    fn score(&self) -> HardSoftScore {
        self.score
    }

    fn set_working_solution(&mut self, solution: TournamentSolution) -> HardSoftScore {
        self.working_solution = solution;
        self.recalculate()
    }

    fn change_slot(&mut self, slot: usize, player: PlayerId) -> HardSoftScore {
        self.working_solution.set_slot_at(slot, player);
        self.recalculate()
    }

    fn swap_slots(&mut self, a: usize, b: usize) -> HardSoftScore {
        self.working_solution.swap_slots(a, b);
        self.recalculate()
    }

    fn change_day(&mut self, game: usize, day: usize) -> HardSoftScore {
        self.working_solution.set_day(game, day);
        self.recalculate()
    }

    fn swap_days(&mut self, a: usize, b: usize) -> HardSoftScore {
        let (da, db) = (self.working_solution.day(a), self.working_solution.day(b));
        self.working_solution.set_day(a, db);
        self.working_solution.set_day(b, da);
        self.recalculate()
    }

    fn swap_lineups(&mut self, a: usize, b: usize) -> HardSoftScore {
        self.working_solution.swap_lineups(a, b);
        self.recalculate()
    }

    fn calculation_count(&self) -> u64 {
        self.calculation_count
    }
}

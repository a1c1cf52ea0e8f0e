//! Construction heuristic phase.
//!
//! Builds a complete schedule in one go and installs it in the score
//! director. Each placed game counts as a step.

mod random;
mod round_robin;

use tracing::debug;

use matchforge_config::ConstructionHeuristicType;
use matchforge_core::Result;
use matchforge_scoring::ScoreDirector;

use crate::phase::{Phase, PhaseReport};
use crate::scope::SolverScope;

pub use random::random_solution;
pub use round_robin::round_robin_solution;

/// Construction heuristic phase.
#[derive(Debug, Clone)]
pub struct ConstructionPhase {
    heuristic: ConstructionHeuristicType,
    diversify: bool,
}

impl ConstructionPhase {
    pub fn new(heuristic: ConstructionHeuristicType) -> Self {
        Self {
            heuristic,
            diversify: false,
        }
    }

    /// Shuffles matchup order, lineups and day labels with the worker's RNG.
    pub fn with_diversification(mut self, diversify: bool) -> Self {
        self.diversify = diversify;
        self
    }
}

impl<D: ScoreDirector> Phase<D> for ConstructionPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_, D>) -> Result<PhaseReport> {
        let mut report = PhaseReport::default();
        let model = solver_scope.model();

        let solution = match self.heuristic {
            ConstructionHeuristicType::RoundRobin => {
                match round_robin_solution(model, solver_scope.rng(), self.diversify)? {
                    Some(solution) => solution,
                    None => {
                        report.note = Some(
                            "round-robin layout does not fit this tournament; filled slots at random"
                                .to_string(),
                        );
                        random_solution(model, solver_scope.rng())?
                    }
                }
            }
            ConstructionHeuristicType::Random => random_solution(model, solver_scope.rng())?,
        };

        let games = solution.game_count() as u64;
        let score = solver_scope
            .score_director_mut()
            .set_working_solution(solution);
        for _ in 0..games {
            solver_scope.increment_step_count();
        }
        report.steps = games;

        solver_scope.assert_score()?;
        solver_scope.update_best_solution();
        debug!(
            worker = solver_scope.worker(),
            heuristic = ?self.heuristic,
            score = %score,
            "Construction phase ended"
        );
        Ok(report)
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}

#[cfg(test)]
mod tests;

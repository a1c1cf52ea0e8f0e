//! Best score termination.

use matchforge_core::HardSoftScore;
use matchforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates once the best score reaches a target.
#[derive(Debug, Clone)]
pub struct BestScoreTermination {
    target: HardSoftScore,
}

impl BestScoreTermination {
    pub fn new(target: HardSoftScore) -> Self {
        Self { target }
    }
}

impl<D: ScoreDirector> Termination<D> for BestScoreTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, D>) -> bool {
        solver_scope.best_score().is_some_and(|best| *best >= self.target)
    }
}

//! Step count termination.

use matchforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates after a fixed number of steps.
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<D: ScoreDirector> Termination<D> for StepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, D>) -> bool {
        solver_scope.total_step_count() >= self.limit
    }
}

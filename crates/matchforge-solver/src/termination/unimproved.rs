//! Termination conditions based on lack of improvement.
//!
//! The scope records the step and instant of the last new best, so these
//! conditions carry no state of their own.

use std::time::Duration;

use matchforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when the best score has not improved for `limit` steps.
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<D: ScoreDirector> Termination<D> for UnimprovedStepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, D>) -> bool {
        solver_scope.best_score().is_some() && solver_scope.steps_since_improvement() >= self.limit
    }
}

/// Terminates when the best score has not improved for `limit` time.
#[derive(Debug, Clone)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl<D: ScoreDirector> Termination<D> for UnimprovedTimeTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, D>) -> bool {
        solver_scope.best_score().is_some() && solver_scope.time_since_improvement() >= self.limit
    }
}

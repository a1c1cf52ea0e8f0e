//! Termination conditions for solver phases.
//!
//! The solve deadline and the shared stop flag are checked by the scope on
//! every step regardless of which terminations are configured.

mod best_score;
mod composite;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use matchforge_config::TerminationConfig;
use matchforge_core::Result;
use matchforge_scoring::ScoreDirector;

use crate::scope::SolverScope;

pub use best_score::BestScoreTermination;
pub use composite::OrTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::{UnimprovedStepCountTermination, UnimprovedTimeTermination};

/// Trait for determining when to stop solving.
pub trait Termination<D: ScoreDirector>: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope<'_, D>) -> bool;
}

/// Builds the union of every limit set in `config`.
pub fn build_termination<D: ScoreDirector>(
    config: &TerminationConfig,
) -> Result<OrTermination<D>> {
    let mut termination = OrTermination::new();
    if let Some(limit) = config.time_limit() {
        termination.push(TimeTermination::new(limit));
    }
    if let Some(limit) = config.step_count_limit {
        termination.push(StepCountTermination::new(limit));
    }
    if let Some(limit) = config.unimproved_step_count_limit {
        termination.push(UnimprovedStepCountTermination::new(limit));
    }
    if let Some(limit) = config.unimproved_time_limit() {
        termination.push(UnimprovedTimeTermination::new(limit));
    }
    if let Some(score) = config.best_score()? {
        termination.push(BestScoreTermination::new(score));
    }
    Ok(termination)
}

#[cfg(test)]
mod tests;

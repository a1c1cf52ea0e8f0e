//! Solver phases.
//!
//! A worker runs its phases in order over one score director: construction
//! builds a complete schedule, local search improves it.

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use matchforge_config::{LocalSearchConfig, PhaseConfig, TerminationConfig};
use matchforge_core::Result;
use matchforge_scoring::ScoreDirector;

use crate::heuristic::RandomMoveSelector;
use crate::scope::SolverScope;
use crate::termination::{build_termination, OrTermination};

pub use construction::ConstructionPhase;
pub use localsearch::LocalSearchPhase;

/// Accepted moves a local search step collects before picking one.
pub const DEFAULT_ACCEPTED_COUNT_LIMIT: usize = 1;

/// What a phase did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseReport {
    pub steps: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    /// Human-readable remark for the diagnostic log.
    pub note: Option<String>,
}

/// A phase of the solving process.
pub trait Phase<D: ScoreDirector>: Send + Debug {
    /// Runs the phase on the scope's working solution.
    fn solve(&mut self, solver_scope: &mut SolverScope<'_, D>) -> Result<PhaseReport>;

    fn phase_type_name(&self) -> &'static str;
}

/// Builds a worker's phase pipeline.
///
/// `solver_termination` applies to every local search phase on top of the
/// phase's own termination. `seed` feeds randomized acceptors and
/// `diversify` varies the construction between workers.
pub fn build_phases<'p, D: ScoreDirector + 'p>(
    phases: &[PhaseConfig],
    solver_termination: Option<&TerminationConfig>,
    seed: Option<u64>,
    diversify: bool,
) -> Result<Vec<Box<dyn Phase<D> + 'p>>> {
    let mut built: Vec<Box<dyn Phase<D> + 'p>> = Vec::with_capacity(phases.len());
    for phase in phases {
        match phase {
            PhaseConfig::ConstructionHeuristic(config) => {
                built.push(Box::new(
                    ConstructionPhase::new(config.construction_heuristic_type)
                        .with_diversification(diversify),
                ));
            }
            PhaseConfig::LocalSearch(config) => {
                built.push(Box::new(build_local_search(config, solver_termination, seed)?));
            }
        }
    }
    Ok(built)
}

fn build_local_search<D: ScoreDirector>(
    config: &LocalSearchConfig,
    solver_termination: Option<&TerminationConfig>,
    seed: Option<u64>,
) -> Result<LocalSearchPhase<D>> {
    let mut termination = OrTermination::new();
    for limits in solver_termination.into_iter().chain(config.termination.as_ref()) {
        termination.extend(build_termination(limits)?);
    }

    let accepted_count_limit = config
        .forager
        .as_ref()
        .and_then(|f| f.accepted_count_limit)
        .unwrap_or(DEFAULT_ACCEPTED_COUNT_LIMIT);

    Ok(LocalSearchPhase::new(
        RandomMoveSelector::default(),
        localsearch::build_acceptor(config.acceptor.as_ref(), seed),
        localsearch::AcceptedCountForager::new(accepted_count_limit),
        termination,
    ))
}

#[cfg(test)]
mod tests;

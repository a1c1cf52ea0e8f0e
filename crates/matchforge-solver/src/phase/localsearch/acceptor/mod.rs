//! Acceptors for local search move acceptance.
//!
//! Acceptors determine whether a move should be accepted based on
//! comparing the resulting score with the previous score.

mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;

use std::fmt::Debug;

use matchforge_config::{AcceptorConfig, DEFAULT_LATE_ACCEPTANCE_SIZE};
use matchforge_core::HardSoftScore;

pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted,
    /// given the previous step's score.
    fn is_accepted(&mut self, last_step_score: &HardSoftScore, move_score: &HardSoftScore) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &HardSoftScore) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called when a step ends with an accepted move.
    fn step_ended(&mut self, _step_score: &HardSoftScore) {}
}

/// Builds the configured acceptor; late acceptance when none is set.
///
/// `seed` feeds acceptors that draw random numbers.
pub fn build_acceptor(config: Option<&AcceptorConfig>, seed: Option<u64>) -> Box<dyn Acceptor> {
    match config {
        None => Box::new(LateAcceptanceAcceptor::new(DEFAULT_LATE_ACCEPTANCE_SIZE)),
        Some(AcceptorConfig::HillClimbing) => Box::new(HillClimbingAcceptor::new()),
        Some(AcceptorConfig::LateAcceptance(la)) => Box::new(LateAcceptanceAcceptor::new(
            la.late_acceptance_size.unwrap_or(DEFAULT_LATE_ACCEPTANCE_SIZE),
        )),
        Some(AcceptorConfig::SimulatedAnnealing(sa)) => {
            let defaults = SimulatedAnnealingAcceptor::default();
            let acceptor = SimulatedAnnealingAcceptor::new(
                sa.starting_temperature.unwrap_or(defaults.starting_temperature()),
                sa.decay_rate.unwrap_or(defaults.decay_rate()),
            );
            Box::new(match seed {
                Some(seed) => acceptor.with_seed(seed),
                None => acceptor,
            })
        }
    }
}

#[cfg(test)]
mod tests;

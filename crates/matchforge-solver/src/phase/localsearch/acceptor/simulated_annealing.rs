//! Simulated annealing acceptor.

use matchforge_core::{HardSoftScore, Score};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Acceptor;

/// Temperatures below this are treated as frozen.
const MIN_TEMPERATURE: f64 = 1e-9;

/// Simulated annealing acceptor.
///
/// Improving moves are always accepted. A worsening move is accepted with
/// probability `exp(-delta / T)`, where `delta` is the drop in the scalar
/// score (one hard point weighs as much as a thousand soft points) and `T`
/// decays multiplicatively after every step.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
    rng: ChaCha8Rng,
}

impl SimulatedAnnealingAcceptor {
    /// Creates a new simulated annealing acceptor.
    ///
    /// # Arguments
    /// * `starting_temperature` - Initial temperature in scalar score units
    /// * `decay_rate` - Multiplicative decay per step (e.g., 0.9995)
    pub fn new(starting_temperature: f64, decay_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Draws acceptance decisions from a seeded generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn starting_temperature(&self) -> f64 {
        self.starting_temperature
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(2.0, 0.9995)
    }
}

impl Acceptor for SimulatedAnnealingAcceptor {
    fn is_accepted(&mut self, last_step_score: &HardSoftScore, move_score: &HardSoftScore) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        if self.current_temperature <= MIN_TEMPERATURE {
            return false;
        }

        let delta = last_step_score.to_scalar() - move_score.to_scalar();
        let probability = (-delta / self.current_temperature).exp();
        self.rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &HardSoftScore) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_score: &HardSoftScore) {
        self.current_temperature *= self.decay_rate;
    }
}

//! Late acceptance acceptor.

use matchforge_core::HardSoftScore;

use super::Acceptor;

/// Late acceptance acceptor - accepts moves that improve on a historical score.
///
/// Maintains a circular buffer of recent step scores and accepts moves that
/// improve on the last step or are at least as good as the score from
/// `late_acceptance_size` steps ago.
///
/// # Example
///
/// ```
/// use matchforge_core::HardSoftScore;
/// use matchforge_solver::phase::localsearch::{Acceptor, LateAcceptanceAcceptor};
///
/// let mut acceptor = LateAcceptanceAcceptor::new(400);
/// acceptor.phase_started(&HardSoftScore::of(0, -120));
/// assert!(acceptor.is_accepted(&HardSoftScore::of(0, -110), &HardSoftScore::of(0, -115)));
/// assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -110), &HardSoftScore::of(-1, -90)));
/// ```
#[derive(Debug, Clone)]
pub struct LateAcceptanceAcceptor {
    late_acceptance_size: usize,
    score_history: Vec<Option<HardSoftScore>>,
    current_index: usize,
}

impl LateAcceptanceAcceptor {
    /// Creates a new late acceptance acceptor keeping
    /// `late_acceptance_size` historical scores.
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![None; late_acceptance_size],
            current_index: 0,
        }
    }

    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
    }
}

impl Default for LateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(400)
    }
}

impl Acceptor for LateAcceptanceAcceptor {
    fn is_accepted(&mut self, last_step_score: &HardSoftScore, move_score: &HardSoftScore) -> bool {
        if move_score > last_step_score {
            return true;
        }

        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &HardSoftScore) {
        for slot in &mut self.score_history {
            *slot = Some(*initial_score);
        }
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &HardSoftScore) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}

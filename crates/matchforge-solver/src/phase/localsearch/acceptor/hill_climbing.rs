//! Hill climbing acceptor.

use matchforge_core::HardSoftScore;

use super::Acceptor;

/// Accepts moves that do not worsen the score.
///
/// Equal-score moves are accepted so the search can drift across plateaus.
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(&mut self, last_step_score: &HardSoftScore, move_score: &HardSoftScore) -> bool {
        move_score >= last_step_score
    }
}

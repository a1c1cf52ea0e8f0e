//! Anytime improvement stream.

use std::time::Duration;

use matchforge_core::HardSoftScore;
use tokio::sync::mpsc;

/// Emitted whenever a worker finds a new personal best.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestSolutionEvent {
    pub worker: usize,
    pub score: HardSoftScore,
    /// Time since the solve started.
    pub elapsed: Duration,
}

pub type BestSolutionSender = mpsc::UnboundedSender<BestSolutionEvent>;
pub type BestSolutionReceiver = mpsc::UnboundedReceiver<BestSolutionEvent>;

/// Creates an unbounded best-solution channel.
pub fn best_solution_channel() -> (BestSolutionSender, BestSolutionReceiver) {
    mpsc::unbounded_channel()
}

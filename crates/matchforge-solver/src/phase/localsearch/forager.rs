//! Foragers for local search move selection.
//!
//! Foragers collect accepted moves during a step and select the
//! best one to apply.

use std::fmt::Debug;

use matchforge_core::HardSoftScore;

use crate::heuristic::ScheduleMove;

/// Trait for collecting and selecting moves in local search.
pub trait LocalSearchForager: Send + Debug {
    /// Called at the start of each step to reset state.
    fn step_started(&mut self);

    /// Adds an accepted move to the forager.
    fn add_move(&mut self, m: ScheduleMove, score: HardSoftScore);

    /// Returns true once enough moves are collected to stop evaluating.
    fn is_quit_early(&self) -> bool;

    /// Picks the best move from those collected, if any.
    fn pick_move(&mut self) -> Option<(ScheduleMove, HardSoftScore)>;
}

/// A forager that collects a limited number of accepted moves.
///
/// Once the limit is reached it quits early, then picks the best move
/// collected. Ties go to the earliest.
#[derive(Debug, Clone)]
pub struct AcceptedCountForager {
    accepted_count_limit: usize,
    accepted_moves: Vec<(ScheduleMove, HardSoftScore)>,
}

impl AcceptedCountForager {
    /// Creates a forager that stops after `accepted_count_limit` accepted moves.
    pub fn new(accepted_count_limit: usize) -> Self {
        Self {
            accepted_count_limit: accepted_count_limit.max(1),
            accepted_moves: Vec::new(),
        }
    }
}

impl Default for AcceptedCountForager {
    fn default() -> Self {
        Self::new(1)
    }
}

impl LocalSearchForager for AcceptedCountForager {
    fn step_started(&mut self) {
        self.accepted_moves.clear();
    }

    fn add_move(&mut self, m: ScheduleMove, score: HardSoftScore) {
        self.accepted_moves.push((m, score));
    }

    fn is_quit_early(&self) -> bool {
        self.accepted_moves.len() >= self.accepted_count_limit
    }

    fn pick_move(&mut self) -> Option<(ScheduleMove, HardSoftScore)> {
        let mut best: Option<(ScheduleMove, HardSoftScore)> = None;
        for &(m, score) in &self.accepted_moves {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((m, score)),
            }
        }
        self.accepted_moves.clear();
        best
    }
}

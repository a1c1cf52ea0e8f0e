//! Worker-level solver scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use matchforge_config::EnvironmentMode;
use matchforge_core::{HardSoftScore, MatchForgeError, Result};
use matchforge_scoring::{evaluate_full, Objective, ScheduleModel, ScoreDirector, TournamentSolution};

use crate::event::{BestSolutionEvent, BestSolutionSender};
use crate::statistics::StatisticsCollector;

/// Everything one worker owns while solving: the score director, the best
/// solution so far, its RNG and its links to the shared solve state.
pub struct SolverScope<'m, D: ScoreDirector> {
    worker: usize,
    model: &'m ScheduleModel,
    objective: &'m Objective,
    score_director: D,
    environment_mode: EnvironmentMode,
    best_solution: Option<TournamentSolution>,
    best_score: Option<HardSoftScore>,
    rng: StdRng,
    start_time: Option<Instant>,
    deadline: Option<Instant>,
    total_step_count: u64,
    last_improvement_step: u64,
    last_improvement_time: Option<Instant>,
    statistics: Option<Arc<StatisticsCollector>>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    listener: Option<BestSolutionSender>,
}

impl<'m, D: ScoreDirector> SolverScope<'m, D> {
    pub fn new(model: &'m ScheduleModel, objective: &'m Objective, score_director: D) -> Self {
        Self {
            worker: 0,
            model,
            objective,
            score_director,
            environment_mode: EnvironmentMode::default(),
            best_solution: None,
            best_score: None,
            rng: StdRng::from_os_rng(),
            start_time: None,
            deadline: None,
            total_step_count: 0,
            last_improvement_step: 0,
            last_improvement_time: None,
            statistics: None,
            terminate_early_flag: None,
            listener: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_worker(mut self, worker: usize) -> Self {
        self.worker = worker;
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Hard wall-clock bound checked before every step and move.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_statistics(mut self, collector: Arc<StatisticsCollector>) -> Self {
        self.statistics = Some(collector);
        self
    }

    /// Shares a stop flag with the other workers of the same solve.
    pub fn with_terminate_early_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = Some(flag);
        self
    }

    pub fn with_listener(mut self, listener: BestSolutionSender) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn worker(&self) -> usize {
        self.worker
    }

    pub fn model(&self) -> &'m ScheduleModel {
        self.model
    }

    pub fn objective(&self) -> &'m Objective {
        self.objective
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    pub fn statistics(&self) -> Option<&Arc<StatisticsCollector>> {
        self.statistics.as_ref()
    }

    pub fn record_move(&self, accepted: bool) {
        if let Some(stats) = &self.statistics {
            stats.record_move(accepted);
        }
    }

    /// Marks the start of solving; `start` is shared by all workers so
    /// elapsed times line up.
    pub fn start_solving(&mut self, start: Instant) {
        self.start_time = Some(start);
        self.last_improvement_time = Some(start);
        self.total_step_count = 0;
        self.last_improvement_step = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &TournamentSolution {
        self.score_director.working_solution()
    }

    pub fn score(&self) -> HardSoftScore {
        self.score_director.score()
    }

    pub fn best_solution(&self) -> Option<&TournamentSolution> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&HardSoftScore> {
        self.best_score.as_ref()
    }

    /// Keeps the working solution as the new best if it beats the current
    /// best. Returns whether it did.
    ///
    /// Reaching the objective's lower bound raises the shared stop flag:
    /// no worker can do better.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.score();
        let is_better = match &self.best_score {
            None => true,
            Some(best) => current_score > *best,
        };
        if !is_better {
            return false;
        }

        self.best_solution = Some(self.score_director.clone_working_solution());
        self.best_score = Some(current_score);
        self.last_improvement_step = self.total_step_count;
        self.last_improvement_time = Some(Instant::now());

        let elapsed = self.elapsed().unwrap_or_default();
        debug!(
            event = "new_best",
            worker = self.worker,
            step = self.total_step_count,
            score = %current_score,
            elapsed_ms = elapsed.as_millis() as u64,
        );

        if let Some(stats) = &self.statistics {
            stats.record_improvement(self.worker, current_score);
        }
        if let Some(listener) = &self.listener {
            // A dropped receiver only means nobody is listening any more.
            let _ = listener.send(BestSolutionEvent {
                worker: self.worker,
                score: current_score,
                elapsed,
            });
        }
        if current_score >= self.objective.lower_bound_score() {
            debug!(worker = self.worker, score = %current_score, "Lower bound reached");
            self.terminate_early();
        }
        true
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Borrows the working solution and the RNG together, for selectors.
    pub fn solution_and_rng(&mut self) -> (&TournamentSolution, &mut StdRng) {
        (self.score_director.working_solution(), &mut self.rng)
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        if let Some(stats) = &self.statistics {
            stats.record_step();
        }
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Steps taken since the best score last improved.
    pub fn steps_since_improvement(&self) -> u64 {
        self.total_step_count - self.last_improvement_step
    }

    /// Time since the best score last improved.
    pub fn time_since_improvement(&self) -> Duration {
        self.last_improvement_time
            .map(|t| t.elapsed())
            .unwrap_or_default()
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    pub fn terminate_early(&self) {
        if let Some(flag) = &self.terminate_early_flag {
            flag.store(true, Ordering::SeqCst);
        }
    }

    pub fn is_past_deadline(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// True when the shared flag is raised or the deadline has passed.
    pub fn should_terminate(&self) -> bool {
        self.is_terminate_early() || self.is_past_deadline()
    }

    /// In full-assert mode, checks the director's score against a full
    /// recalculation of the working solution.
    pub fn assert_score(&self) -> Result<()> {
        if !self.environment_mode.is_asserted() {
            return Ok(());
        }
        let full = evaluate_full(self.model, self.objective, self.working_solution()).score();
        let running = self.score_director.score();
        if full != running {
            return Err(MatchForgeError::Internal(format!(
                "worker {}: running score {} differs from full recalculation {} after step {}",
                self.worker, running, full, self.total_step_count
            )));
        }
        Ok(())
    }

    /// Flushes the director's calculation count into the shared statistics.
    pub fn flush_score_calculations(&self) {
        if let Some(stats) = &self.statistics {
            stats.record_score_calculations(self.score_director.calculation_count());
        }
    }

    pub fn take_best_solution(self) -> Option<TournamentSolution> {
        self.best_solution
    }
}

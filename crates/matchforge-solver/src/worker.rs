//! One solver worker: a seeded phase pipeline over its own score director.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use matchforge_config::SolverConfig;
use matchforge_core::{DiagnosticLog, HardSoftScore, Result, SolvePhase};
use matchforge_scoring::{IncrementalScoreDirector, Objective, ScheduleModel, TournamentSolution};

use crate::event::BestSolutionSender;
use crate::phase::build_phases;
use crate::phase::construction::random_solution;
use crate::scope::SolverScope;
use crate::statistics::StatisticsCollector;

/// What a worker hands back when it finishes.
#[derive(Debug)]
pub struct WorkerReport {
    pub worker: usize,
    pub best_solution: Option<TournamentSolution>,
    pub best_score: Option<HardSoftScore>,
    pub steps: u64,
    pub log: DiagnosticLog,
}

/// A worker borrows the shared, immutable solve state and owns everything
/// it mutates.
pub struct SolverWorker<'m> {
    index: usize,
    model: &'m ScheduleModel,
    objective: &'m Objective,
    config: &'m SolverConfig,
    seed: Option<u64>,
    start: Instant,
    deadline: Instant,
    statistics: Arc<StatisticsCollector>,
    terminate_early_flag: Arc<AtomicBool>,
    listener: Option<BestSolutionSender>,
}

impl<'m> SolverWorker<'m> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: usize,
        model: &'m ScheduleModel,
        objective: &'m Objective,
        config: &'m SolverConfig,
        seed: Option<u64>,
        start: Instant,
        deadline: Instant,
        statistics: Arc<StatisticsCollector>,
        terminate_early_flag: Arc<AtomicBool>,
    ) -> Self {
        Self {
            index,
            model,
            objective,
            config,
            seed,
            start,
            deadline,
            statistics,
            terminate_early_flag,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Option<BestSolutionSender>) -> Self {
        self.listener = listener;
        self
    }

    /// Runs the configured phases until they finish, the deadline passes or
    /// another worker reaches the lower bound.
    pub fn run(self) -> Result<WorkerReport> {
        let mut log = DiagnosticLog::new();
        let mut start_rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let initial = random_solution(self.model, &mut start_rng)?;
        let director = IncrementalScoreDirector::new(self.model, self.objective, initial);

        let mut scope = SolverScope::new(self.model, self.objective, director)
            .with_worker(self.index)
            .with_environment_mode(self.config.environment_mode)
            .with_deadline(self.deadline)
            .with_statistics(Arc::clone(&self.statistics))
            .with_terminate_early_flag(Arc::clone(&self.terminate_early_flag));
        if let Some(seed) = self.seed {
            scope = scope.with_seed(seed);
        }
        if let Some(listener) = self.listener {
            scope = scope.with_listener(listener);
        }
        scope.start_solving(self.start);

        let mut phases = build_phases::<IncrementalScoreDirector<'m>>(
            &self.config.effective_phases(),
            self.config.termination.as_ref(),
            self.seed,
            self.index > 0,
        )?;
        debug!(worker = self.index, phases = phases.len(), "Worker started");

        for (phase_index, phase) in phases.iter_mut().enumerate() {
            if scope.best_solution().is_some() && scope.should_terminate() {
                break;
            }

            let name = phase.phase_type_name();
            let record = self.statistics.start_phase(self.index, phase_index, name);
            let started = Instant::now();
            let starting_score = scope.score();

            let report = phase.solve(&mut scope)?;

            let best = scope.best_score().copied();
            self.statistics.end_phase(
                record,
                started.elapsed(),
                report.steps,
                report.moves_evaluated,
                report.moves_accepted,
                Some(starting_score),
                best,
            );
            if let Some(note) = &report.note {
                log.info(SolvePhase::Search, format!("worker {}: {}", self.index, note));
            }
            log.info(
                SolvePhase::Search,
                format!(
                    "worker {}: {} phase {} ended after {:?}: {} steps, {} moves evaluated, best {}",
                    self.index,
                    name,
                    phase_index,
                    started.elapsed(),
                    report.steps,
                    report.moves_evaluated,
                    best.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string()),
                ),
            );
        }

        scope.flush_score_calculations();
        let steps = scope.total_step_count();
        let best_score = scope.best_score().copied();
        let best_solution = scope.take_best_solution();
        Ok(WorkerReport {
            worker: self.index,
            best_solution,
            best_score,
            steps,
            log,
        })
    }
}

//! Solve orchestration.
//!
//! Runs independent workers on scoped threads against one immutable model,
//! keeps the best schedule any of them found and classifies the result.

use std::any::Any;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use matchforge_config::SolverConfig;
use matchforge_core::{DiagnosticLog, HardSoftScore, Score, SolvePhase};
use matchforge_scoring::{Objective, ScheduleModel, TournamentSolution};

use crate::event::BestSolutionSender;
use crate::statistics::{SolverStatistics, StatisticsCollector};
use crate::worker::{SolverWorker, WorkerReport};

/// Outcome class of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    /// Feasible, and the objective meets its lower bound.
    Optimal,
    /// Feasible, optimality not proven.
    Feasible,
    /// The feasibility screen proved that no schedule exists.
    Infeasible,
    /// The tournament shape is structurally invalid.
    InvalidModel,
    /// No feasible schedule was found before the deadline.
    Unknown,
}

impl SolverStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::InvalidModel => "INVALID_MODEL",
            SolverStatus::Unknown => "UNKNOWN",
        }
    }

    /// Only these statuses carry a schedule.
    pub fn has_schedule(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a backend returns.
///
/// `solution` is set exactly when `status.has_schedule()`.
#[derive(Debug)]
pub struct BackendOutcome {
    pub status: SolverStatus,
    pub solution: Option<TournamentSolution>,
    pub score: Option<HardSoftScore>,
    pub statistics: SolverStatistics,
    pub diagnostics: DiagnosticLog,
}

impl BackendOutcome {
    /// An outcome without a schedule.
    pub fn without_schedule(status: SolverStatus, diagnostics: DiagnosticLog) -> Self {
        Self {
            status,
            solution: None,
            score: None,
            statistics: SolverStatistics::default(),
            diagnostics,
        }
    }
}

/// A search backend for an assembled model.
pub trait ScheduleBackend: Send + Sync {
    /// Searches until `deadline` at the latest.
    fn solve(&self, model: &ScheduleModel, objective: &Objective, deadline: Instant) -> BackendOutcome;

    fn name(&self) -> &'static str;
}

/// Local search backend running `worker_count` workers in parallel.
#[derive(Debug, Clone)]
pub struct SolveOrchestrator {
    config: SolverConfig,
    listener: Option<BestSolutionSender>,
}

impl SolveOrchestrator {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            listener: None,
        }
    }

    /// Streams every worker's new bests to `listener`.
    pub fn with_listener(mut self, listener: BestSolutionSender) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn run_workers(
        &self,
        model: &ScheduleModel,
        objective: &Objective,
        start: Instant,
        deadline: Instant,
        statistics: &Arc<StatisticsCollector>,
        diagnostics: &mut DiagnosticLog,
    ) -> Vec<WorkerReport> {
        let worker_count = self.config.worker_count.resolve();
        let flag = Arc::new(AtomicBool::new(false));

        let joined = thread::scope(|s| {
            let mut handles = Vec::with_capacity(worker_count);
            for index in 0..worker_count {
                let worker = SolverWorker::new(
                    index,
                    model,
                    objective,
                    &self.config,
                    self.config.worker_seed(index),
                    start,
                    deadline,
                    Arc::clone(statistics),
                    Arc::clone(&flag),
                )
                .with_listener(self.listener.clone());

                let spawned = thread::Builder::new()
                    .name(format!("matchforge-worker-{}", index))
                    .spawn_scoped(s, move || worker.run());
                match spawned {
                    Ok(handle) => handles.push((index, handle)),
                    Err(e) => diagnostics.error(
                        SolvePhase::Search,
                        format!("worker {} could not be started: {}", index, e),
                    ),
                }
            }
            handles
                .into_iter()
                .map(|(index, handle)| (index, handle.join()))
                .collect::<Vec<_>>()
        });

        let mut reports = Vec::with_capacity(joined.len());
        for (index, result) in joined {
            match result {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(e)) => {
                    diagnostics.error(SolvePhase::Search, format!("worker {} failed: {}", index, e))
                }
                Err(payload) => diagnostics.error(
                    SolvePhase::Search,
                    format!("worker {} panicked: {}", index, panic_message(&*payload)),
                ),
            }
        }
        reports
    }
}

impl ScheduleBackend for SolveOrchestrator {
    fn solve(&self, model: &ScheduleModel, objective: &Objective, deadline: Instant) -> BackendOutcome {
        let mut diagnostics = DiagnosticLog::new();

        if model.is_proven_infeasible() {
            diagnostics.info(
                SolvePhase::Search,
                format!(
                    "search skipped: {} feasibility check(s) failed",
                    model.infeasibility().len()
                ),
            );
            return BackendOutcome::without_schedule(SolverStatus::Infeasible, diagnostics);
        }

        let start = Instant::now();
        let worker_count = self.config.worker_count.resolve();
        let time_limit = deadline.saturating_duration_since(start);
        info!(
            event = "solve_start",
            workers = worker_count,
            time_limit_ms = time_limit.as_millis() as u64,
            lower_bound = objective.lower_bound(),
            "Search started"
        );
        diagnostics.info(
            SolvePhase::Search,
            format!(
                "{} worker(s), time limit {:?}, objective lower bound {}",
                worker_count,
                time_limit,
                objective.lower_bound()
            ),
        );

        let statistics = Arc::new(StatisticsCollector::new());
        let reports = self.run_workers(model, objective, start, deadline, &statistics, &mut diagnostics);

        let mut best: Option<(HardSoftScore, TournamentSolution)> = None;
        for report in reports {
            diagnostics.extend(report.log);
            if let (Some(score), Some(solution)) = (report.best_score, report.best_solution) {
                if best.as_ref().map_or(true, |(b, _)| score > *b) {
                    best = Some((score, solution));
                }
            }
        }

        let statistics = match Arc::try_unwrap(statistics) {
            Ok(collector) => collector.into_statistics(),
            Err(shared) => shared.snapshot(),
        };
        let elapsed = start.elapsed();

        let outcome = match best {
            Some((score, solution)) if score.is_feasible() => {
                let status = if score >= objective.lower_bound_score() {
                    SolverStatus::Optimal
                } else {
                    SolverStatus::Feasible
                };
                diagnostics.info(
                    SolvePhase::Search,
                    format!("{} schedule with score {} after {:?}", status, score, elapsed),
                );
                BackendOutcome {
                    status,
                    solution: Some(solution),
                    score: Some(score),
                    statistics,
                    diagnostics,
                }
            }
            Some((score, _)) => {
                diagnostics.warning(
                    SolvePhase::Search,
                    format!(
                        "no feasible schedule found within {:?}; best score {}",
                        elapsed, score
                    ),
                );
                BackendOutcome {
                    score: Some(score),
                    statistics,
                    ..BackendOutcome::without_schedule(SolverStatus::Unknown, diagnostics)
                }
            }
            None => {
                warn!(event = "no_schedule", "No worker produced a schedule");
                diagnostics.error(SolvePhase::Search, "no worker produced a schedule");
                BackendOutcome {
                    statistics,
                    ..BackendOutcome::without_schedule(SolverStatus::Unknown, diagnostics)
                }
            }
        };

        info!(
            event = "solve_end",
            status = outcome.status.as_str(),
            score = ?outcome.score,
            elapsed_ms = elapsed.as_millis() as u64,
            steps = outcome.statistics.total_step_count,
            moves_evaluated = outcome.statistics.total_moves_evaluated,
            "Search ended"
        );
        outcome
    }

    fn name(&self) -> &'static str {
        "local-search"
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

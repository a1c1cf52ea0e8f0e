//! Solver entry point that hides all internal wiring.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use matchforge_config::SolverConfig;
use matchforge_core::{
    BanList, DiagnosticLog, HardSoftScore, MatchForgeError, Result, Roster, RosterInput, SolvePhase,
};
use matchforge_scoring::{ModelAssembler, Objective, ObjectiveBreakdown, ScoreAnalysis};
use matchforge_solver::{
    extract_schedule, BestSolutionSender, Schedule, ScheduleBackend, SolveOrchestrator,
    SolverStatistics, SolverStatus,
};

/// Everything one solve needs.
#[derive(Debug, Clone)]
pub struct SolveRequest {
    pub roster: RosterInput,
    pub bans: BanList,
    /// Wall-clock budget for the search.
    pub time_limit: Duration,
}

impl SolveRequest {
    pub fn new(roster: RosterInput, time_limit: Duration) -> Self {
        Self {
            roster,
            bans: BanList::new(),
            time_limit,
        }
    }

    pub fn with_bans(mut self, bans: BanList) -> Self {
        self.bans = bans;
        self
    }
}

/// Result of one solve.
///
/// `schedule`, `objective` and `constraints` are set exactly when the
/// status is `Optimal` or `Feasible`.
#[derive(Debug)]
pub struct SolveOutcome {
    pub status: SolverStatus,
    pub schedule: Option<Schedule>,
    /// Best score found; may be infeasible under `Unknown`.
    pub score: Option<HardSoftScore>,
    pub objective: Option<ObjectiveBreakdown>,
    pub constraints: Option<ScoreAnalysis>,
    pub statistics: SolverStatistics,
    pub diagnostics: DiagnosticLog,
}

impl SolveOutcome {
    fn without_schedule(status: SolverStatus, diagnostics: DiagnosticLog) -> Self {
        Self {
            status,
            schedule: None,
            score: None,
            objective: None,
            constraints: None,
            statistics: SolverStatistics::default(),
            diagnostics,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.status.has_schedule()
    }
}

/// Builds the model for a request and runs the search backend on it.
///
/// Each call is independent; one solver can serve many requests.
#[derive(Debug, Clone, Default)]
pub struct TournamentSolver {
    config: SolverConfig,
}

impl TournamentSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Uses `matchforge.toml` from the working directory when it loads.
    pub fn from_default_config() -> Self {
        Self::new(SolverConfig::load(matchforge_config::DEFAULT_CONFIG_FILE).unwrap_or_default())
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `request`.
    ///
    /// Roster and configuration defects are errors. A structurally invalid
    /// tournament, a proven-infeasible model or a fruitless search come back
    /// as a status.
    pub fn solve(&self, request: SolveRequest) -> Result<SolveOutcome> {
        self.run(request, SolveOrchestrator::new(self.config.clone()))
    }

    /// Like [`solve`](Self::solve), streaming every worker's new bests to
    /// `listener` while the search runs.
    pub fn solve_with_listener(
        &self,
        request: SolveRequest,
        listener: BestSolutionSender,
    ) -> Result<SolveOutcome> {
        self.run(
            request,
            SolveOrchestrator::new(self.config.clone()).with_listener(listener),
        )
    }

    fn run(&self, request: SolveRequest, backend: impl ScheduleBackend) -> Result<SolveOutcome> {
        self.config.validate()?;
        let started = Instant::now();
        let mut diagnostics = DiagnosticLog::new();

        let roster = Roster::from_input(&request.roster)?;
        diagnostics.info(
            SolvePhase::Roster,
            format!(
                "{} players over {} positions",
                roster.player_count(),
                roster.position_count()
            ),
        );

        let model = match ModelAssembler::assemble(
            &roster,
            &request.bans,
            &self.config.tournament,
            &mut diagnostics,
        ) {
            Ok(model) => model,
            Err(MatchForgeError::InvalidModel(reason)) => {
                warn!(event = "invalid_model", reason = %reason, "Model rejected");
                diagnostics.error(SolvePhase::Assembly, reason);
                return Ok(SolveOutcome::without_schedule(
                    SolverStatus::InvalidModel,
                    diagnostics,
                ));
            }
            Err(e) => return Err(e),
        };

        let objective = Objective::build(&model);
        diagnostics.info(
            SolvePhase::Objective,
            format!(
                "{} never-enemy and {} never-ally indicators, lower bound {}",
                objective.enemy_indicator_count(),
                objective.ally_indicator_count(),
                objective.lower_bound()
            ),
        );

        let time_limit = self.config.effective_time_limit(request.time_limit);
        info!(
            event = "solve_requested",
            backend = backend.name(),
            players = roster.player_count(),
            games = model.game_count(),
            time_limit_ms = time_limit.as_millis() as u64,
            "Solve requested"
        );
        let deadline = Instant::now() + time_limit;
        let outcome = backend.solve(&model, &objective, deadline);
        diagnostics.extend(outcome.diagnostics);

        let mut result = SolveOutcome {
            status: outcome.status,
            schedule: None,
            score: outcome.score,
            objective: None,
            constraints: None,
            statistics: outcome.statistics,
            diagnostics,
        };

        if outcome.status.has_schedule() {
            let solution = outcome.solution.ok_or_else(|| {
                MatchForgeError::Internal(format!("{} outcome without a schedule", outcome.status))
            })?;
            let schedule = extract_schedule(&model, &solution)?;
            let analysis = ScoreAnalysis::analyze(&model, &objective, &solution);
            result.diagnostics.info(
                SolvePhase::Extraction,
                format!("{} games extracted and re-validated", schedule.len()),
            );
            result.objective = Some(analysis.objective);
            result.schedule = Some(schedule);
            result.constraints = Some(analysis);
        }

        info!(
            event = "solve_finished",
            status = result.status.as_str(),
            score = ?result.score,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Solve finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchforge_test::canonical_roster_input;

    #[test]
    fn test_request_builder() {
        let bans = BanList::new().with_ban(1, "T1");
        let request =
            SolveRequest::new(canonical_roster_input(), Duration::from_secs(2)).with_bans(bans.clone());

        assert_eq!(request.bans, bans);
        assert_eq!(request.time_limit, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let solver = TournamentSolver::new(SolverConfig::new().with_worker_count(0));
        let request = SolveRequest::new(canonical_roster_input(), Duration::from_millis(100));

        assert!(matches!(solver.solve(request), Err(MatchForgeError::Config(_))));
    }
}

//! MatchForge search engine
//!
//! This crate provides the search side of a solve:
//! - Construction phases (round robin, random)
//! - Local search with pluggable acceptors and foragers
//! - Schedule moves and the random move selector
//! - Termination conditions
//! - Parallel workers and solve orchestration
//! - Best-solution events and statistics
//! - Schedule extraction

pub mod event;
pub mod extract;
pub mod heuristic;
pub mod orchestrator;
pub mod phase;
pub mod scope;
pub mod statistics;
pub mod termination;
pub mod worker;

#[cfg(test)]
mod test_utils;

pub use event::{
    best_solution_channel, BestSolutionEvent, BestSolutionReceiver, BestSolutionSender,
};
pub use extract::{extract_schedule, team_label, LineupEntry, Schedule, ScheduledGame, TeamLineup};
pub use heuristic::{MoveMix, RandomMoveSelector, ScheduleMove};
pub use orchestrator::{BackendOutcome, ScheduleBackend, SolveOrchestrator, SolverStatus};
pub use phase::localsearch::{
    AcceptedCountForager, Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    LocalSearchForager, SimulatedAnnealingAcceptor,
};
pub use phase::{build_phases, ConstructionPhase, LocalSearchPhase, Phase, PhaseReport};
pub use scope::SolverScope;
pub use statistics::{PhaseStatistics, ScoreImprovement, SolverStatistics, StatisticsCollector};
pub use termination::{
    BestScoreTermination, OrTermination, StepCountTermination, Termination, TimeTermination,
    UnimprovedStepCountTermination, UnimprovedTimeTermination,
};
pub use worker::{SolverWorker, WorkerReport};

//! MatchForge - tournament schedule solver
//!
//! Give it a ranked roster, per-day bans and a time budget; it returns a
//! schedule of games that honors every hard rule and keeps players from
//! being stuck always with, or always against, the same people.
//!
//! # Example
//!
//! ```rust
//! use matchforge::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! assert!(score.is_feasible());
//! ```

// Domain types
pub use matchforge_core::{
    BanList, DiagnosticEntry, DiagnosticLevel, DiagnosticLog, MatchForgeError, Player, PlayerId,
    PositionInput, Result, Roster, RosterEntry, RosterInput, SolvePhase, Tournament,
};

// Score types
pub use matchforge_core::{HardSoftScore, ParseableScore, Score};

pub use matchforge_config::{EnvironmentMode, SolverConfig, TerminationConfig};

// Score explanation
pub use matchforge_scoring::{ConstraintSummary, ObjectiveBreakdown, ScoreAnalysis};

pub use matchforge_solver::{
    best_solution_channel, BestSolutionEvent, BestSolutionReceiver, BestSolutionSender,
    LineupEntry, Schedule, ScheduledGame, SolverStatistics, SolverStatus, TeamLineup,
};

mod solver;
pub use solver::{SolveOutcome, SolveRequest, TournamentSolver};

pub mod prelude {
    pub use super::{BanList, RosterInput, SolverConfig, Tournament};
    pub use super::{HardSoftScore, Score};
    pub use super::{Schedule, SolveOutcome, SolveRequest, SolverStatus, TournamentSolver};
}

//! Constraint model, objective and incremental scoring for MatchForge.
//!
//! This crate turns a validated roster into everything a search needs:
//! - Derived pair relations (`PairIndex`, `GameRelations`, `RelationMatrix`)
//! - The assembled hard rules (`ModelAssembler` -> `ScheduleModel`)
//! - The zero-matchup objective and its lower bound (`Objective`)
//! - Score directors (`IncrementalScoreDirector`, `SimpleScoreDirector`)
//! - Score analysis and independent schedule validation

pub mod analysis;
pub mod assembler;
pub mod director;
pub mod evaluate;
pub mod objective;
pub mod relations;
pub mod rules;
pub mod solution;
pub mod validate;

pub use analysis::{ConstraintSummary, ScoreAnalysis};
pub use assembler::{FeasibilityScreen, ModelAssembler, PairKind, PostedConstraint, ScheduleModel};
pub use director::{IncrementalScoreDirector, ScoreDirector, SimpleScoreDirector};
pub use evaluate::{evaluate_full, Breakdown, RuleTally};
pub use objective::{Objective, ObjectiveBreakdown};
pub use relations::{GameRelations, PairId, PairIndex, RelationMatrix};
pub use rules::{HardRule, SoftTerm};
pub use solution::TournamentSolution;
pub use validate::ScheduleValidator;

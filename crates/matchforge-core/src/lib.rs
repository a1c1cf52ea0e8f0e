//! MatchForge Core - Core types for tournament roster scheduling
//!
//! This crate provides the fundamental abstractions for MatchForge:
//! - Score types for representing schedule quality
//! - The roster model (players, positions, tiers) and per-day bans
//! - The tournament shape (games, days, team layout)
//! - Constraint identification and the diagnostic log

pub mod constraint;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod score;


pub use constraint::ConstraintRef;
pub use diagnostics::{DiagnosticEntry, DiagnosticLevel, DiagnosticLog, SolvePhase};
pub use domain::{
    BanList, Player, PlayerId, PositionIdx, ResolvedBans, Roster, RosterEntry, RosterInput,
    PositionInput, Tournament,
};
pub use error::{MatchForgeError, Result};
pub use score::{HardSoftScore, ParseableScore, Score, ScoreLevel, ScoreParseError};

//! Roster model: players, positions, tiers, per-day bans and the
//! tournament shape.
//!
//! Everything here is configuration fixed before a solve starts:
//! - `Roster`: position-partitioned players with id and name lookups
//! - `BanList`: 1-based day number to banned canonical names
//! - `Tournament`: game count, day band and team layout

mod bans;
mod player;
mod roster;
mod tournament;


pub use bans::{BanList, ResolvedBans};
pub use player::{Player, PlayerId, PositionIdx};
pub use roster::{PositionInput, Roster, RosterEntry, RosterInput};
pub use tournament::Tournament;

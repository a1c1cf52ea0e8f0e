//! Score director implementations.
//!
//! The score director owns the working solution and keeps its score up to
//! date as moves change slots and days.
//!
//! # Score Director Types
//!
//! - [`SimpleScoreDirector`] - Full recalculation (baseline)
//! - [`IncrementalScoreDirector`] - Retract/insert of the touched games

mod incremental;
mod simple;
mod traits;


pub use incremental::IncrementalScoreDirector;
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;

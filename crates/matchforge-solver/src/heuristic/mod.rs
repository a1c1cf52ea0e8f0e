//! Moves over a schedule and the selector that proposes them.

mod moves;
mod selector;

pub use moves::ScheduleMove;
pub use selector::{MoveMix, RandomMoveSelector};

#[cfg(test)]
mod tests;

//! Local search phase.
//!
//! Each step draws a batch of random moves, scores them through the score
//! director, lets the acceptor filter them and applies the forager's pick.

mod acceptor;
mod forager;
mod phase;

pub use acceptor::{
    build_acceptor, Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    SimulatedAnnealingAcceptor,
};
pub use forager::{AcceptedCountForager, LocalSearchForager};
pub use phase::LocalSearchPhase;

//! Union of termination conditions.

use std::fmt;

use matchforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when any of its conditions does. Empty means never.
pub struct OrTermination<D: ScoreDirector> {
    terminations: Vec<Box<dyn Termination<D>>>,
}

impl<D: ScoreDirector> OrTermination<D> {
    pub fn new() -> Self {
        Self {
            terminations: Vec::new(),
        }
    }

    pub fn push(&mut self, termination: impl Termination<D> + 'static) {
        self.terminations.push(Box::new(termination));
    }

    pub fn with(mut self, termination: impl Termination<D> + 'static) -> Self {
        self.push(termination);
        self
    }

    /// Adds every condition of `other`.
    pub fn extend(&mut self, other: OrTermination<D>) {
        self.terminations.extend(other.terminations);
    }

    pub fn len(&self) -> usize {
        self.terminations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminations.is_empty()
    }
}

impl<D: ScoreDirector> Default for OrTermination<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ScoreDirector> fmt::Debug for OrTermination<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.terminations).finish()
    }
}

impl<D: ScoreDirector> Termination<D> for OrTermination<D> {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, D>) -> bool {
        self.terminations
            .iter()
            .any(|t| t.is_terminated(solver_scope))
    }
}

//! Shared fixtures for solver unit tests.

use matchforge_core::{BanList, DiagnosticLog, Tournament};
use matchforge_scoring::{IncrementalScoreDirector, ModelAssembler, Objective, ScheduleModel, TournamentSolution};
use matchforge_test::{canonical_assignment, canonical_roster};

use crate::scope::SolverScope;

pub const TEST_SEED: u64 = 42;

/// The canonical model and objective, owned so scopes can borrow them.
pub struct TestFixture {
    pub model: ScheduleModel,
    pub objective: Objective,
}

impl TestFixture {
    pub fn canonical() -> Self {
        Self::with_bans(&BanList::new())
    }

    pub fn with_bans(bans: &BanList) -> Self {
        let mut log = DiagnosticLog::new();
        let model =
            ModelAssembler::assemble(&canonical_roster(), bans, &Tournament::canonical(), &mut log)
                .unwrap();
        let objective = Objective::build(&model);
        Self { model, objective }
    }

    /// The hand-built feasible schedule.
    pub fn feasible_solution(&self) -> TournamentSolution {
        let raw = canonical_assignment();
        self.model.solution(raw.slots, raw.days).unwrap()
    }

    pub fn director(&self) -> IncrementalScoreDirector<'_> {
        IncrementalScoreDirector::new(&self.model, &self.objective, self.feasible_solution())
    }

    /// A seeded scope over the feasible schedule, started now.
    pub fn scope(&self) -> SolverScope<'_, IncrementalScoreDirector<'_>> {
        let mut scope = SolverScope::new(&self.model, &self.objective, self.director())
            .with_seed(TEST_SEED);
        scope.start_solving(std::time::Instant::now());
        scope
    }
}

//! Tests for phase building and local search.

use std::time::{Duration, Instant};

use super::*;
use crate::phase::localsearch::{AcceptedCountForager, HillClimbingAcceptor, LateAcceptanceAcceptor};
use crate::termination::StepCountTermination;
use crate::test_utils::TestFixture;
use matchforge_config::{
    AcceptorConfig, ConstructionHeuristicConfig, EnvironmentMode, ForagerConfig,
    LocalSearchConfig, SolverConfig,
};
use matchforge_core::Score;
use matchforge_scoring::{evaluate_full, IncrementalScoreDirector};

type Director<'a> = IncrementalScoreDirector<'a>;

fn local_search<'a>(steps: u64) -> LocalSearchPhase<Director<'a>> {
    LocalSearchPhase::new(
        RandomMoveSelector::new(32),
        Box::new(LateAcceptanceAcceptor::new(50)),
        AcceptedCountForager::new(1),
        OrTermination::new().with(StepCountTermination::new(steps)),
    )
}

#[test]
fn test_build_default_pipeline() {
    let config = SolverConfig::default();
    let phases = build_phases::<Director<'_>>(&config.effective_phases(), None, Some(1), false).unwrap();

    let names: Vec<_> = phases.iter().map(|p| p.phase_type_name()).collect();
    assert_eq!(names, vec!["ConstructionHeuristic", "LocalSearch"]);
}

#[test]
fn test_build_configured_pipeline() {
    let phases = vec![
        PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig::default()),
        PhaseConfig::LocalSearch(LocalSearchConfig {
            acceptor: Some(AcceptorConfig::HillClimbing),
            forager: Some(ForagerConfig {
                accepted_count_limit: Some(4),
            }),
            termination: None,
        }),
        PhaseConfig::LocalSearch(LocalSearchConfig::default()),
    ];
    let built = build_phases::<Director<'_>>(&phases, None, None, true).unwrap();
    assert_eq!(built.len(), 3);

    let debug = format!("{:?}", built[1]);
    assert!(debug.contains("HillClimbingAcceptor"));
    assert!(debug.contains("accepted_count_limit: 4"));
}

#[test]
fn test_local_search_keeps_score_consistent() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope().with_environment_mode(EnvironmentMode::FullAssert);
    scope.update_best_solution();
    let start = scope.score();

    let mut phase = local_search(300);
    let report = phase.solve(&mut scope).unwrap();

    assert_eq!(report.steps, 300);
    assert!(report.moves_evaluated >= report.moves_accepted);
    assert!(*scope.best_score().unwrap() >= start);
    let full = evaluate_full(&fixture.model, &fixture.objective, scope.working_solution());
    assert_eq!(scope.score(), full.score());
}

#[test]
fn test_hill_climbing_never_loses_feasibility() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope();
    scope.update_best_solution();

    let mut phase: LocalSearchPhase<Director> = LocalSearchPhase::new(
        RandomMoveSelector::default(),
        Box::new(HillClimbingAcceptor::new()),
        AcceptedCountForager::new(1),
        OrTermination::new().with(StepCountTermination::new(200)),
    );
    phase.solve(&mut scope).unwrap();

    assert!(scope.score().is_feasible());
    assert!(scope.best_score().unwrap().is_feasible());
}

#[test]
fn test_local_search_stops_at_deadline() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope().with_deadline(Instant::now() + Duration::from_millis(50));

    let mut phase: LocalSearchPhase<Director> = LocalSearchPhase::new(
        RandomMoveSelector::default(),
        Box::new(LateAcceptanceAcceptor::default()),
        AcceptedCountForager::new(1),
        OrTermination::new(),
    );
    let started = Instant::now();
    phase.solve(&mut scope).unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(scope.is_past_deadline());
}

#[test]
fn test_local_search_stops_on_shared_flag() {
    let fixture = TestFixture::canonical();
    let flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    let mut scope = fixture.scope().with_terminate_early_flag(flag);

    let report = local_search(1_000).solve(&mut scope).unwrap();
    assert_eq!(report.steps, 0);
}

#[test]
fn test_solver_termination_applies_to_local_search() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope();
    let limits = matchforge_config::TerminationConfig {
        step_count_limit: Some(25),
        ..Default::default()
    };
    let phases = vec![PhaseConfig::LocalSearch(LocalSearchConfig::default())];
    let mut built = build_phases::<Director<'_>>(&phases, Some(&limits), Some(9), false).unwrap();

    let report = built[0].solve(&mut scope).unwrap();
    assert_eq!(report.steps, 25);
}

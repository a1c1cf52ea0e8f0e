//! Tests for termination conditions.

use std::thread;
use std::time::{Duration, Instant};

use super::*;
use crate::test_utils::TestFixture;
use matchforge_config::TerminationConfig;
use matchforge_core::HardSoftScore;
use matchforge_scoring::{IncrementalScoreDirector, ScoreDirector};

type Director<'a> = IncrementalScoreDirector<'a>;

#[test]
fn test_step_count_termination() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope();
    let term = StepCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination() {
    let fixture = TestFixture::canonical();
    let scope = fixture.scope();

    assert!(TimeTermination::millis(0).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_time_termination_before_start() {
    let fixture = TestFixture::canonical();
    let scope = crate::scope::SolverScope::new(&fixture.model, &fixture.objective, fixture.director());

    assert!(!TimeTermination::millis(0).is_terminated(&scope));
}

#[test]
fn test_best_score_termination() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope();
    let feasible = BestScoreTermination::new(HardSoftScore::of(0, -1_000));
    let perfect = BestScoreTermination::new(HardSoftScore::ZERO);

    // No best solution yet.
    assert!(!feasible.is_terminated(&scope));

    assert!(scope.update_best_solution());
    assert!(feasible.is_terminated(&scope));
    assert!(!perfect.is_terminated(&scope));
}

#[test]
fn test_unimproved_step_count_termination() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope();
    let term = UnimprovedStepCountTermination::new(2);

    assert!(!term.is_terminated(&scope));
    scope.update_best_solution();
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));

    // Returning to the same score is not an improvement.
    let day0 = scope.working_solution().day(0);
    scope.score_director_mut().change_day(1, day0);
    scope.score_director_mut().change_day(1, 1);
    assert!(!scope.update_best_solution());
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_unimproved_time_termination() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope();
    scope.update_best_solution();

    assert!(!UnimprovedTimeTermination::new(Duration::from_secs(60)).is_terminated(&scope));
    thread::sleep(Duration::from_millis(5));
    assert!(UnimprovedTimeTermination::millis(1).is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope();

    let empty: OrTermination<Director> = OrTermination::new();
    assert!(empty.is_empty());
    assert!(!empty.is_terminated(&scope));

    let any = OrTermination::new()
        .with(StepCountTermination::new(1))
        .with(TimeTermination::seconds(3600));
    assert_eq!(any.len(), 2);
    assert!(!any.is_terminated(&scope));
    scope.increment_step_count();
    assert!(any.is_terminated(&scope));
}

#[test]
fn test_build_termination_from_config() {
    let config = TerminationConfig {
        seconds_spent_limit: Some(30),
        step_count_limit: Some(10),
        unimproved_step_count_limit: Some(5),
        best_score_limit: Some("0hard/-90soft".to_string()),
        ..TerminationConfig::default()
    };
    let fixture = TestFixture::canonical();
    let termination = build_termination::<Director<'_>>(&config).unwrap();
    assert_eq!(termination.len(), 4);

    let mut scope = fixture.scope();
    for _ in 0..10 {
        scope.increment_step_count();
    }
    assert!(termination.is_terminated(&scope));
}

#[test]
fn test_build_termination_rejects_bad_score() {
    let config = TerminationConfig {
        best_score_limit: Some("ninety".to_string()),
        ..TerminationConfig::default()
    };
    assert!(build_termination::<Director<'_>>(&config).is_err());
}

#[test]
fn test_deadline_and_shared_flag() {
    let fixture = TestFixture::canonical();
    let flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let scope = fixture
        .scope()
        .with_deadline(Instant::now() + Duration::from_secs(3600))
        .with_terminate_early_flag(flag.clone());

    assert!(!scope.should_terminate());
    scope.terminate_early();
    assert!(flag.load(std::sync::atomic::Ordering::SeqCst));
    assert!(scope.should_terminate());

    let late = fixture.scope().with_deadline(Instant::now());
    assert!(late.is_past_deadline());
    assert!(late.should_terminate());
}

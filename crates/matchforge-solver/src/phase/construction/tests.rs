//! Tests for the construction heuristics.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::test_utils::TestFixture;
use matchforge_core::{BanList, DiagnosticLog, Score, Tournament};
use matchforge_scoring::{evaluate_full, IncrementalScoreDirector, ModelAssembler, Objective};
use matchforge_test::{canonical_assignment, canonical_roster};

#[test]
fn test_round_robin_reproduces_canonical_layout() {
    let fixture = TestFixture::canonical();
    let mut rng = StdRng::seed_from_u64(1);

    let solution = round_robin_solution(&fixture.model, &mut rng, false)
        .unwrap()
        .unwrap();
    let raw = canonical_assignment();
    assert_eq!(solution.slots(), raw.slots.as_slice());
    assert_eq!(solution.days(), raw.days.as_slice());
}

#[test]
fn test_diversified_round_robin_stays_feasible() {
    let fixture = TestFixture::canonical();
    let canonical = fixture.feasible_solution();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let solution = round_robin_solution(&fixture.model, &mut rng, true)
            .unwrap()
            .unwrap();
        let breakdown = evaluate_full(&fixture.model, &fixture.objective, &solution);
        assert_eq!(breakdown.score().hard(), 0, "seed {} broke a hard rule", seed);
        if seed == 0 {
            assert_ne!(solution.slots(), canonical.slots());
        }
    }
}

#[test]
fn test_round_robin_declines_mismatched_shape() {
    let mut log = DiagnosticLog::new();
    let tournament = Tournament::canonical().with_games(9);
    let model =
        ModelAssembler::assemble(&canonical_roster(), &BanList::new(), &tournament, &mut log)
            .unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    assert!(round_robin_solution(&model, &mut rng, false).unwrap().is_none());
}

#[test]
fn test_random_solution_respects_pools_and_day_loads() {
    let fixture = TestFixture::canonical();
    let model = &fixture.model;
    let mut rng = StdRng::seed_from_u64(5);

    let solution = random_solution(model, &mut rng).unwrap();
    for game in 0..model.game_count() {
        for position in 0..model.positions() {
            let a = solution.slot(game, 0, position);
            let b = solution.slot(game, 1, position);
            assert_ne!(a, b);
            assert!(model.domain(position).contains(&a));
            assert!(model.domain(position).contains(&b));
        }
    }

    let mut loads = vec![0; model.day_count()];
    for &day in solution.days() {
        loads[day] += 1;
    }
    loads.sort_unstable();
    assert_eq!(loads, vec![3, 3, 4]);
}

#[test]
fn test_construction_phase_installs_schedule() {
    let fixture = TestFixture::canonical();
    let mut scope = fixture.scope();
    // Start from a scrambled schedule.
    let scrambled = random_solution(&fixture.model, &mut StdRng::seed_from_u64(2)).unwrap();
    scope.score_director_mut().set_working_solution(scrambled);

    let mut phase = ConstructionPhase::new(ConstructionHeuristicType::RoundRobin);
    let report = phase.solve(&mut scope).unwrap();

    assert_eq!(report.steps, 10);
    assert_eq!(report.note, None);
    assert_eq!(scope.total_step_count(), 10);
    assert!(scope.best_score().unwrap().is_feasible());
    let full = evaluate_full(&fixture.model, &fixture.objective, scope.working_solution());
    assert_eq!(scope.score(), full.score());
}

#[test]
fn test_construction_phase_falls_back_to_random_fill() {
    let mut log = DiagnosticLog::new();
    let tournament = Tournament::canonical().with_games(9);
    let model =
        ModelAssembler::assemble(&canonical_roster(), &BanList::new(), &tournament, &mut log)
            .unwrap();
    let objective = Objective::build(&model);
    let start = random_solution(&model, &mut StdRng::seed_from_u64(3)).unwrap();
    let director = IncrementalScoreDirector::new(&model, &objective, start);
    let mut scope = crate::scope::SolverScope::new(&model, &objective, director).with_seed(4);
    scope.start_solving(std::time::Instant::now());

    let mut phase = ConstructionPhase::new(ConstructionHeuristicType::RoundRobin);
    let report = phase.solve(&mut scope).unwrap();

    assert_eq!(report.steps, 9);
    assert!(report.note.unwrap().contains("at random"));
    assert!(scope.best_solution().is_some());
}

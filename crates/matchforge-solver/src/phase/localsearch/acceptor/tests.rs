//! Tests for acceptors.

use super::*;
use matchforge_config::{LateAcceptanceConfig, SimulatedAnnealingConfig};

fn soft(s: i64) -> HardSoftScore {
    HardSoftScore::of(0, s)
}

#[test]
fn test_hill_climbing_accepts_improving_and_equal() {
    let mut acceptor: Box<dyn Acceptor> = Box::new(HillClimbingAcceptor::new());

    assert!(acceptor.is_accepted(&soft(-10), &soft(-5)));
    assert!(acceptor.is_accepted(&soft(-5), &soft(-5)));
}

#[test]
fn test_hill_climbing_rejects_worsening() {
    let mut acceptor = HillClimbingAcceptor::new();

    assert!(!acceptor.is_accepted(&soft(-5), &soft(-10)));
    // Any hard loss outweighs soft gains.
    assert!(!acceptor.is_accepted(&soft(-100), &HardSoftScore::of(-1, 0)));
}

#[test]
fn test_late_acceptance_history() {
    let mut acceptor = LateAcceptanceAcceptor::new(5);
    acceptor.phase_started(&soft(-10));

    assert!(acceptor.is_accepted(&soft(-10), &soft(-5)));
    assert!(acceptor.is_accepted(&soft(-10), &soft(-10)));
    assert!(!acceptor.is_accepted(&soft(-10), &soft(-15)));
}

#[test]
fn test_late_acceptance_compares_against_late_score() {
    let mut acceptor = LateAcceptanceAcceptor::new(2);
    acceptor.phase_started(&soft(-20));

    acceptor.step_ended(&soft(-12));
    acceptor.step_ended(&soft(-8));

    // History is now [-12, -8] and the next late score is -12.
    assert!(acceptor.is_accepted(&soft(-8), &soft(-11)));
    assert!(!acceptor.is_accepted(&soft(-8), &soft(-13)));

    acceptor.step_ended(&soft(-9));
    // Late score is now -8.
    assert!(!acceptor.is_accepted(&soft(-9), &soft(-10)));
}

#[test]
fn test_late_acceptance_zero_size_is_clamped() {
    let acceptor = LateAcceptanceAcceptor::new(0);
    assert_eq!(acceptor.late_acceptance_size(), 1);
}

#[test]
fn test_simulated_annealing_accepts_improving() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(1.0, 0.99).with_seed(1);

    assert!(acceptor.is_accepted(&soft(-10), &soft(-5)));
    assert!(acceptor.is_accepted(&soft(-10), &soft(-10)));
}

#[test]
fn test_simulated_annealing_rejects_hard_losses_when_cool() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(1.0, 0.99).with_seed(1);
    acceptor.phase_started(&soft(-10));

    for _ in 0..100 {
        assert!(!acceptor.is_accepted(&soft(-10), &HardSoftScore::of(-1, -10)));
    }
}

#[test]
fn test_simulated_annealing_accepts_small_losses_when_hot() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(1_000.0, 0.99).with_seed(9);
    acceptor.phase_started(&soft(-10));

    let accepted = (0..200)
        .filter(|_| acceptor.is_accepted(&soft(-10), &soft(-11)))
        .count();
    // exp(-1/1000) is close to one.
    assert!(accepted > 190);
}

#[test]
fn test_simulated_annealing_cools_and_resets() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(10.0, 0.5);
    acceptor.step_ended(&soft(0));
    acceptor.step_ended(&soft(0));
    assert!((acceptor.current_temperature() - 2.5).abs() < 1e-12);

    acceptor.phase_started(&soft(0));
    assert!((acceptor.current_temperature() - 10.0).abs() < 1e-12);
}

#[test]
fn test_simulated_annealing_is_reproducible_for_a_seed() {
    let decisions = |seed| {
        let mut acceptor = SimulatedAnnealingAcceptor::new(1.0, 1.0).with_seed(seed);
        (0..64)
            .map(|_| acceptor.is_accepted(&soft(-10), &soft(-11)))
            .collect::<Vec<_>>()
    };
    assert_eq!(decisions(5), decisions(5));
}

#[test]
fn test_build_acceptor_from_config() {
    let default = build_acceptor(None, None);
    assert!(format!("{:?}", default).starts_with("LateAcceptanceAcceptor"));

    let late = build_acceptor(
        Some(&AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: Some(50),
        })),
        None,
    );
    assert!(format!("{:?}", late).contains("late_acceptance_size: 50"));

    let annealing = build_acceptor(
        Some(&AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
            starting_temperature: Some(4.0),
            decay_rate: None,
        })),
        Some(3),
    );
    let debug = format!("{:?}", annealing);
    assert!(debug.contains("starting_temperature: 4.0"));
    assert!(debug.contains("decay_rate: 0.9995"));

    let climbing = build_acceptor(Some(&AcceptorConfig::HillClimbing), None);
    assert_eq!(format!("{:?}", climbing), "HillClimbingAcceptor");
}

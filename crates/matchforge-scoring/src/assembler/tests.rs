//! Tests for constraint assembly and the feasibility screen.

use super::*;
use crate::objective::Objective;
use matchforge_core::{DiagnosticLevel, MatchForgeError, RosterInput};
use matchforge_test::{ban_everyone, canonical_roster, canonical_roster_input, indivisible_roster_input};

fn assemble(roster: &Roster, bans: &BanList, tournament: &Tournament) -> (Result<ScheduleModel>, DiagnosticLog) {
    let mut log = DiagnosticLog::new();
    let model = ModelAssembler::assemble(roster, bans, tournament, &mut log);
    (model, log)
}

#[test]
fn test_canonical_posted_counts() {
    let roster = canonical_roster();
    let (model, log) = assemble(&roster, &BanList::new(), &Tournament::canonical());
    let model = model.unwrap();

    assert_eq!(model.posted_instances(HardRule::Domain), 100);
    assert_eq!(model.posted_instances(HardRule::IntraGameUniqueness), 10);
    assert_eq!(model.posted_instances(HardRule::TeamTierBalance), 20);
    assert_eq!(model.posted_instances(HardRule::Tier1RoundRobin), 10);
    assert_eq!(model.posted_instances(HardRule::SamePositionRivalry), 50);
    assert_eq!(model.posted_instances(HardRule::PlayCountEqualization), 20);
    assert_eq!(model.posted_instances(HardRule::DayLoadBalancing), 13);
    assert_eq!(model.posted_instances(HardRule::DayBans), 0);
    assert_eq!(model.posted_instances(HardRule::NoSameDayBackToBack), 225);

    assert_eq!(model.play_count_target(), Some(4));
    assert!(!model.is_proven_infeasible());
    assert!(log.contains(DiagnosticLevel::Info, "Tier-1 round robin: posted 10"));
    assert_eq!(log.at_level(DiagnosticLevel::Warning).count(), 0);
}

#[test]
fn test_pair_index_is_logged() {
    let roster = canonical_roster();
    let (_, log) = assemble(&roster, &BanList::new(), &Tournament::canonical());

    let relations: Vec<_> = log
        .entries()
        .iter()
        .filter(|e| e.phase == SolvePhase::Relations)
        .collect();
    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0].level, DiagnosticLevel::Info);
    assert!(relations[0]
        .message
        .starts_with("300 player pairs indexed: 10 Tier-1, 40 same-position, 250 unconstrained"));
    assert!(relations[0].message.contains("20 ally and 25 enemy relations per game"));
}

#[test]
fn test_play_count_target_resolution() {
    assert_eq!(play_count_target(80, 20), Ok(4));
    assert_eq!(play_count_target(0, 0), Err("no non-Tier-1 players".to_string()));
    assert_eq!(play_count_target(80, 0), Err("no non-Tier-1 players".to_string()));

    let reason = play_count_target(80, 19).unwrap_err();
    assert!(reason.contains("do not divide evenly among 19 players"));
}

#[test]
fn test_pair_kinds() {
    let roster = canonical_roster();
    let (model, _) = assemble(&roster, &BanList::new(), &Tournament::canonical());
    let model = model.unwrap();
    let pairs = model.pairs();

    // T1 / J1
    assert_eq!(model.pair_kind(pairs.id(0, 5)), PairKind::Tier1);
    // T1 / T2
    assert_eq!(model.pair_kind(pairs.id(0, 1)), PairKind::SamePosition);
    // T2 / J2
    assert_eq!(model.pair_kind(pairs.id(1, 6)), PairKind::Unconstrained);
    assert_eq!(model.tier1_pairs().len(), 10);
    assert_eq!(model.same_position_pairs().len(), 50);
}

#[test]
fn test_indivisible_roster_skips_play_count() {
    let roster = Roster::from_input(&indivisible_roster_input()).unwrap();
    let (model, log) = assemble(&roster, &BanList::new(), &Tournament::canonical());
    let model = model.unwrap();

    assert_eq!(model.play_count_target(), None);
    assert_eq!(model.posted_instances(HardRule::PlayCountEqualization), 0);
    assert!(log.contains(DiagnosticLevel::Skipped, "do not divide evenly"));
    assert!(!model.is_proven_infeasible());
}

#[test]
fn test_three_teams_is_invalid_model() {
    let roster = canonical_roster();
    let tournament = Tournament::canonical().with_teams_per_game(3);
    let (model, _) = assemble(&roster, &BanList::new(), &tournament);

    assert!(matches!(model, Err(MatchForgeError::InvalidModel(_))));
}

#[test]
fn test_ban_everyone_is_proven_infeasible() {
    let input = canonical_roster_input();
    let roster = Roster::from_input(&input).unwrap();
    let bans = ban_everyone(&input, 3);
    let (model, log) = assemble(&roster, &bans, &Tournament::canonical());
    let model = model.unwrap();

    assert!(model.is_proven_infeasible());
    assert_eq!(model.posted_instances(HardRule::DayBans), 750);
    assert!(model
        .infeasibility()
        .iter()
        .any(|r| r.contains("banned on every day")));
    assert!(log.contains(DiagnosticLevel::Warning, "infeasible"));
}

#[test]
fn test_single_day_ban_is_not_proven_infeasible() {
    let roster = canonical_roster();
    let bans = BanList::new().with_ban(1, "T3").with_ban(2, "J4");
    let (model, _) = assemble(&roster, &bans, &Tournament::canonical());
    let model = model.unwrap();

    assert!(!model.is_proven_infeasible());
    assert!(model.bans().is_banned(0, 2));
    assert!(model.bans().is_banned(1, 8));
}

#[test]
fn test_too_few_tier1_matchups_on_a_day_is_infeasible() {
    let roster = canonical_roster();
    // A1 and S1 can meet only once, but day 1 hosts at least three games.
    let bans = BanList::new().with_ban(1, "T1").with_ban(1, "J1").with_ban(1, "M1");
    let (model, log) = assemble(&roster, &bans, &Tournament::canonical());
    let model = model.unwrap();

    assert!(model.is_proven_infeasible());
    assert!(model.infeasibility().iter().any(|r| r.contains("day 1: 2 unbanned Tier-1 players form 1")));
    assert!(log.contains(DiagnosticLevel::Warning, "distinct matchups"));
}

#[test]
fn test_three_tier1_players_cover_a_minimum_day() {
    let roster = canonical_roster();
    let bans = BanList::new().with_ban(2, "T1").with_ban(2, "J1");
    let (model, _) = assemble(&roster, &bans, &Tournament::canonical());

    assert!(!model.unwrap().is_proven_infeasible());
}

#[test]
fn test_tier1_count_mismatch_warns_and_screens() {
    let roster = canonical_roster();
    let tournament = Tournament::canonical().with_games(12).with_days(3, 4, 4);
    let (model, log) = assemble(&roster, &BanList::new(), &tournament);
    let model = model.unwrap();

    assert!(log.contains(DiagnosticLevel::Warning, "Tier-1 pairs"));
    assert!(model.is_proven_infeasible());
}

#[test]
fn test_day_band_that_cannot_sum_is_infeasible() {
    let roster = canonical_roster();
    let tournament = Tournament::canonical().with_days(3, 4, 5);
    let (model, _) = assemble(&roster, &BanList::new(), &tournament);
    let model = model.unwrap();

    assert!(model
        .infeasibility()
        .iter()
        .any(|r| r.contains("cannot hold 10 games")));
}

#[test]
fn test_rivalry_capacity_screen() {
    let roster = canonical_roster();
    let tournament = Tournament::canonical().with_min_rivalry(2);
    let (model, _) = assemble(&roster, &BanList::new(), &tournament);

    assert!(model.unwrap().is_proven_infeasible());
}

#[test]
fn test_small_pool_is_invalid_model() {
    let input = RosterInput::new()
        .with_position("T", [(1, "Ace", "T1")])
        .with_position("S", [(1, "Bolt", "S1"), (2, "Cove", "S2")]);
    let roster = Roster::from_input(&input).unwrap();
    let (model, _) = assemble(&roster, &BanList::new(), &Tournament::canonical());

    assert!(matches!(model, Err(MatchForgeError::InvalidModel(_))));
}

#[test]
fn test_canonical_objective_bound() {
    let roster = canonical_roster();
    let (model, _) = assemble(&roster, &BanList::new(), &Tournament::canonical());
    let objective = Objective::build(&model.unwrap());

    assert_eq!(objective.enemy_indicator_count(), 300);
    assert_eq!(objective.ally_indicator_count(), 240);
    // 300 - 10 * 25 never-enemy, 240 - 10 * 2 * 10 never-ally
    assert_eq!(objective.lower_bound(), 90);
    assert_eq!(objective.lower_bound_score(), matchforge_core::HardSoftScore::of(0, -90));
}

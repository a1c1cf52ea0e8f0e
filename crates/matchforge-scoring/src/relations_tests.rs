//! Tests for pair indexing and derived relations.

use super::*;
use crate::solution::TournamentSolution;
use matchforge_test::canonical_assignment;

fn canonical_solution() -> TournamentSolution {
    let raw = canonical_assignment();
    TournamentSolution::new(10, 2, 5, raw.slots, raw.days).unwrap()
}

#[test]
fn test_pair_index_is_a_bijection() {
    let index = PairIndex::new(25);
    assert_eq!(index.len(), 300);

    for (id, (a, b)) in index.iter() {
        assert!(a < b);
        assert_eq!(index.id(a, b), id);
        assert_eq!(index.id(b, a), id);
    }
}

#[test]
fn test_game_relations_counts() {
    let solution = canonical_solution();
    let pairs = PairIndex::new(25);
    let rel = GameRelations::build(&solution, &pairs, 0);

    assert_eq!(rel.presence.len(), 10);
    // C(5, 2) allies per team, 5 x 5 enemies across teams
    assert_eq!(rel.allies.len(), 20);
    assert_eq!(rel.enemies.len(), 25);
}

#[test]
fn test_ally_and_enemy_are_exclusive_and_imply_both_play() {
    let solution = canonical_solution();
    let pairs = PairIndex::new(25);
    let matrix = RelationMatrix::build(&solution, &pairs);

    for (pair, _) in pairs.iter() {
        for game in 0..10 {
            let ally = matrix.ally(pair, game);
            let enemy = matrix.enemy(pair, game);
            assert!(!(ally && enemy));
            if ally || enemy {
                assert!(matrix.both_play(pair, game));
            }
        }
    }
}

#[test]
fn test_same_position_players_are_never_allies() {
    let solution = canonical_solution();
    let pairs = PairIndex::new(25);
    let matrix = RelationMatrix::build(&solution, &pairs);

    // T1 and T2 share a position
    let pair = pairs.id(0, 1);
    assert_eq!(matrix.ally_count(pair), 0);
    assert_eq!(matrix.enemy_count(pair), 1);
}

#[test]
fn test_duplicate_player_does_not_pair_with_itself() {
    let raw = canonical_assignment();
    let mut solution = TournamentSolution::new(10, 2, 5, raw.slots, raw.days).unwrap();
    let pairs = PairIndex::new(25);

    // Put game 0's team A tier-1 player on team B at the same position too
    let a = solution.slot(0, 0, 0);
    let b_index = solution.slot_index(0, 1, 0);
    solution.set_slot_at(b_index, a);

    let rel = GameRelations::build(&solution, &pairs, 0);
    assert_eq!(rel.presence.len(), 9);
    assert!(rel.enemies.iter().all(|&p| {
        let (x, y) = pairs.players(p);
        x != y
    }));
}

#[test]
fn test_shared_players() {
    let solution = canonical_solution();
    let pairs = PairIndex::new(25);
    let g0 = GameRelations::build(&solution, &pairs, 0);

    assert_eq!(g0.shared_players(&g0), 10);
    assert!(g0.plays(solution.slot(0, 1, 3)));
}

#[test]
fn test_swap_lineups() {
    let mut solution = canonical_solution();
    let g2 = solution.game(2).to_vec();
    let g7 = solution.game(7).to_vec();

    solution.swap_lineups(7, 2);
    assert_eq!(solution.game(2), g7.as_slice());
    assert_eq!(solution.game(7), g2.as_slice());
    assert_eq!(solution.day(2), 2);
}

//! Tests for moves and move selection.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::test_utils::TestFixture;
use matchforge_scoring::ScoreDirector;

#[test]
fn test_evaluate_leaves_solution_untouched() {
    let fixture = TestFixture::canonical();
    let mut director = fixture.director();
    let before = director.working_solution().clone();
    let score = director.score();

    let slot = before.slot_index(2, 0, 3);
    let player = fixture
        .model
        .domain(3)
        .iter()
        .copied()
        .find(|&p| p != before.slot_at(slot))
        .unwrap();
    let moves = [
        ScheduleMove::ChangeSlot { slot, player },
        ScheduleMove::SwapSlots { a: slot, b: before.slot_index(5, 1, 3) },
        ScheduleMove::ChangeDay { game: 4, day: (before.day(4) + 1) % 3 },
        ScheduleMove::SwapDays { a: 0, b: 1 },
        ScheduleMove::SwapLineups { a: 3, b: 7 },
    ];

    for m in moves {
        assert!(m.is_doable(&director), "{} should be doable", m);
        let evaluated = m.evaluate(&mut director);
        assert_eq!(director.score(), score, "{} was not undone", m);
        assert_eq!(director.working_solution().slots(), before.slots());
        assert_eq!(director.working_solution().days(), before.days());

        // Doing the move for real lands on the evaluated score.
        let undo = m.inverse(director.working_solution());
        assert_eq!(m.do_move(&mut director), evaluated, "{}", m.kind());
        undo.do_move(&mut director);
    }
}

#[test]
fn test_inverse_restores_changes() {
    let fixture = TestFixture::canonical();
    let mut director = fixture.director();
    let original = director.score();

    let m = ScheduleMove::ChangeDay { game: 1, day: director.working_solution().day(0) };
    let undo = m.inverse(director.working_solution());
    assert_eq!(undo, ScheduleMove::ChangeDay { game: 1, day: 1 });

    let worse = m.do_move(&mut director);
    assert!(worse < original);
    assert_eq!(undo.do_move(&mut director), original);

    let swap = ScheduleMove::SwapLineups { a: 0, b: 9 };
    assert_eq!(swap.inverse(director.working_solution()), swap);
}

#[test]
fn test_noop_moves_are_not_doable() {
    let fixture = TestFixture::canonical();
    let director = fixture.director();
    let solution = director.working_solution();

    let slot = solution.slot_index(0, 0, 0);
    let other_position = solution.slot_index(0, 0, 1);
    assert!(!ScheduleMove::ChangeSlot { slot, player: solution.slot_at(slot) }.is_doable(&director));
    assert!(!ScheduleMove::SwapSlots { a: slot, b: slot }.is_doable(&director));
    assert!(!ScheduleMove::SwapSlots { a: slot, b: other_position }.is_doable(&director));
    assert!(!ScheduleMove::ChangeDay { game: 2, day: solution.day(2) }.is_doable(&director));
    // Games 0 and 3 share a day.
    assert!(!ScheduleMove::SwapDays { a: 0, b: 3 }.is_doable(&director));
    assert!(!ScheduleMove::SwapLineups { a: 4, b: 4 }.is_doable(&director));
}

#[test]
fn test_selector_keeps_moves_within_position_pools() {
    let fixture = TestFixture::canonical();
    let solution = fixture.feasible_solution();
    let selector = RandomMoveSelector::new(500);
    let mut rng = StdRng::seed_from_u64(7);
    let mut moves = Vec::new();

    selector.select_moves(&fixture.model, &solution, &mut rng, &mut moves);
    assert_eq!(moves.len(), 500);

    let mut kinds = std::collections::BTreeSet::new();
    for m in &moves {
        kinds.insert(m.kind());
        match *m {
            ScheduleMove::ChangeSlot { slot, player } => {
                let position = solution.position_of_slot(slot);
                assert!(fixture.model.domain(position).contains(&player));
            }
            ScheduleMove::SwapSlots { a, b } => {
                assert_eq!(solution.position_of_slot(a), solution.position_of_slot(b));
            }
            ScheduleMove::ChangeDay { game, day } => {
                assert!(game < 10 && day < 3);
            }
            ScheduleMove::SwapDays { a, b } | ScheduleMove::SwapLineups { a, b } => {
                assert!(a < 10 && b < 10);
            }
        }
    }
    assert_eq!(kinds.len(), 5);
}

#[test]
fn test_selector_is_reproducible_for_a_seed() {
    let fixture = TestFixture::canonical();
    let solution = fixture.feasible_solution();
    let selector = RandomMoveSelector::default();

    let draw = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut moves = Vec::new();
        selector.select_moves(&fixture.model, &solution, &mut rng, &mut moves);
        moves
    };
    assert_eq!(draw(3), draw(3));
    assert_ne!(draw(3), draw(4));
}

#[test]
fn test_move_mix_restricts_kinds() {
    let fixture = TestFixture::canonical();
    let solution = fixture.feasible_solution();
    let selector = RandomMoveSelector::new(200).with_mix(MoveMix {
        change_slot: 0,
        swap_slots: 1,
        change_day: 0,
        swap_days: 0,
        swap_lineups: 0,
    });
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        assert!(matches!(
            selector.next_move(&fixture.model, &solution, &mut rng),
            ScheduleMove::SwapSlots { .. }
        ));
    }
}

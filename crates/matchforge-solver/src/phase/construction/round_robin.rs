//! Round-robin construction.
//!
//! Game `g` hosts the `g`-th Tier-1 matchup `(i, j)`: position `i`'s Tier-1
//! player leads one team and position `j`'s the other. At those two
//! positions the Tier-1 player faces the position's other players in turn;
//! every other position fields a pair of its non-Tier-1 players, cycling
//! through all such pairs. Game `g` is played on day `g % days`, so
//! index-adjacent games never share a day.
//!
//! On the canonical 5 x 5 roster this meets every hard rule.

use rand::seq::SliceRandom;
use rand::Rng;

use matchforge_core::{PlayerId, PositionIdx, Result};
use matchforge_scoring::{ScheduleModel, TournamentSolution};

/// Builds the round-robin schedule, or `None` when the tournament shape
/// does not admit it (not two teams, not one Tier-1 per team, Tier-1
/// matchups not one per game, or a position without non-Tier-1 players).
///
/// With `diversify`, matchup order, the sides of each game, opponent order and day
/// labels are shuffled; the structure is preserved.
pub fn round_robin_solution<R: Rng>(
    model: &ScheduleModel,
    rng: &mut R,
    diversify: bool,
) -> Result<Option<TournamentSolution>> {
    let games = model.game_count();
    let positions = model.positions();
    if model.teams() != 2
        || model.tournament().tier1_per_team != 1
        || model.tier1_pairs().len() != games
    {
        return Ok(None);
    }

    let roster = model.roster();
    let mut matchups: Vec<(PositionIdx, PositionIdx)> = model
        .tier1_pairs()
        .iter()
        .map(|&pair| {
            let (a, b) = model.pairs().players(pair);
            (roster.position_of(a), roster.position_of(b))
        })
        .collect();

    let mut others: Vec<Vec<PlayerId>> = Vec::with_capacity(positions);
    let mut other_pairs: Vec<Vec<(PlayerId, PlayerId)>> = Vec::with_capacity(positions);
    for position in 0..positions {
        let pool: Vec<PlayerId> = model
            .domain(position)
            .iter()
            .copied()
            .filter(|&p| !roster.is_tier1(p))
            .collect();
        if pool.is_empty() {
            return Ok(None);
        }
        let mut pairs = Vec::new();
        for (n, &a) in pool.iter().enumerate() {
            for &b in &pool[n + 1..] {
                pairs.push((a, b));
            }
        }
        others.push(pool);
        other_pairs.push(pairs);
    }

    let mut day_labels: Vec<usize> = (0..model.day_count()).collect();
    if diversify {
        matchups.shuffle(rng);
        for (pool, pairs) in others.iter_mut().zip(other_pairs.iter_mut()) {
            pool.shuffle(rng);
            pairs.shuffle(rng);
        }
        day_labels.shuffle(rng);
    }

    let days = (0..games).map(|g| day_labels[g % day_labels.len()]).collect();
    let mut solution = model.solution(vec![0; games * 2 * positions], days)?;

    let mut facing = vec![0usize; positions];
    let mut cursor = vec![0usize; positions];
    for (game, &(i, j)) in matchups.iter().enumerate() {
        let flip = diversify && rng.random_bool(0.5);
        for position in 0..positions {
            let (mut a, mut b) = if position == i || position == j {
                let tier1 = roster.tier1_of(position);
                let opponent = others[position][facing[position] % others[position].len()];
                facing[position] += 1;
                if position == i {
                    (tier1, opponent)
                } else {
                    (opponent, tier1)
                }
            } else {
                let pairs = &other_pairs[position];
                if pairs.is_empty() {
                    return Ok(None);
                }
                let pair = pairs[cursor[position] % pairs.len()];
                cursor[position] += 1;
                pair
            };
            if flip {
                std::mem::swap(&mut a, &mut b);
            }
            place(&mut solution, game, position, a, b);
        }
    }
    Ok(Some(solution))
}

fn place(solution: &mut TournamentSolution, game: usize, position: PositionIdx, a: PlayerId, b: PlayerId) {
    let first = solution.slot_index(game, 0, position);
    let second = solution.slot_index(game, 1, position);
    solution.set_slot_at(first, a);
    solution.set_slot_at(second, b);
}

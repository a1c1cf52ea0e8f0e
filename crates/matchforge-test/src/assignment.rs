//! A valid assignment of the canonical roster, built by hand.
//!
//! Game `g` hosts the `g`-th Tier-1 pair `(i, j)` in lexicographic order:
//! position `i`'s Tier-1 player leads team A, position `j`'s leads team B.
//! At every position the Tier-1 player faces each of the four others once,
//! and the remaining six games cycle through the six pairs of non-Tier-1
//! players. Games go to day `g % 3`.

/// Flat slot vector `(game * 2 + team) * positions + position` and days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAssignment {
    pub slots: Vec<usize>,
    pub days: Vec<usize>,
}

/// Valid assignment of the canonical 5 x 5 roster to 10 games over 3 days.
pub fn canonical_assignment() -> RawAssignment {
    const POSITIONS: usize = 5;
    const PER_POSITION: usize = 5;
    const GAMES: usize = 10;
    const DAYS: usize = 3;

    let mut tier1_pairs = Vec::new();
    for i in 0..POSITIONS {
        for j in (i + 1)..POSITIONS {
            tier1_pairs.push((i, j));
        }
    }

    let mut rank_pairs = Vec::new();
    for a in 1..PER_POSITION {
        for b in (a + 1)..PER_POSITION {
            rank_pairs.push((a, b));
        }
    }

    let id = |position: usize, rank_index: usize| position * PER_POSITION + rank_index;
    let mut slots = vec![0; GAMES * 2 * POSITIONS];
    let mut facing_tier1 = [0usize; POSITIONS];
    let mut pair_cursor = [0usize; POSITIONS];

    for (game, &(i, j)) in tier1_pairs.iter().enumerate() {
        for p in 0..POSITIONS {
            let (a, b) = if p == i {
                facing_tier1[p] += 1;
                (id(p, 0), id(p, facing_tier1[p]))
            } else if p == j {
                facing_tier1[p] += 1;
                (id(p, facing_tier1[p]), id(p, 0))
            } else {
                let (ra, rb) = rank_pairs[pair_cursor[p]];
                pair_cursor[p] += 1;
                (id(p, ra), id(p, rb))
            };
            slots[game * 2 * POSITIONS + p] = a;
            slots[(game * 2 + 1) * POSITIONS + p] = b;
        }
    }

    let days = (0..GAMES).map(|g| g % DAYS).collect();
    RawAssignment { slots, days }
}

//! Roster fixtures.
//!
//! The canonical roster has five positions (`T`, `J`, `M`, `A`, `S`) with
//! five ranked players each. Canonical names are `<code><rank>` (`"T1"`,
//! `"J3"`), so player ids are `position * 5 + rank - 1`.

use matchforge_core::{BanList, Roster, RosterInput};

pub const POSITION_CODES: [&str; 5] = ["T", "J", "M", "A", "S"];

const ALIASES: [[&str; 5]; 5] = [
    ["Insect", "Yap", "Pogo", "Rook", "Ridge"],
    ["Sowl", "Kora", "Necko", "Whirl", "Otter"],
    ["Gamma", "Sylph", "Hedge", "Jelly", "Mint"],
    ["Kcat", "Taffy", "Flurry", "Mocha", "Runner"],
    ["Lacon", "Flake", "Dawn", "Ruka", "Garnet"],
];

/// Canonical 5 x 5 roster input.
pub fn canonical_roster_input() -> RosterInput {
    roster_input_with_sizes(&[5, 5, 5, 5, 5])
}

/// Canonical roster, already validated.
pub fn canonical_roster() -> Roster {
    Roster::from_input(&canonical_roster_input()).expect("canonical roster is valid")
}

/// Roster whose last position has only four players.
///
/// Leaves 19 non-Tier-1 players, which does not divide the 80 non-Tier-1
/// slots of the canonical tournament.
pub fn indivisible_roster_input() -> RosterInput {
    roster_input_with_sizes(&[5, 5, 5, 5, 4])
}

/// Roster whose `S` position has no players.
pub fn empty_position_roster_input() -> RosterInput {
    let mut input = canonical_roster_input();
    if let Some(last) = input.positions.last_mut() {
        last.entries.clear();
    }
    input
}

/// Bans every canonical player on every day `1..=days`.
pub fn ban_everyone(input: &RosterInput, days: u32) -> BanList {
    let mut bans = BanList::new();
    for day in 1..=days {
        for position in &input.positions {
            for entry in &position.entries {
                bans.ban(day, entry.name.clone());
            }
        }
    }
    bans
}

fn roster_input_with_sizes(sizes: &[usize]) -> RosterInput {
    let mut input = RosterInput::new();
    for (p, code) in POSITION_CODES.iter().enumerate().take(sizes.len()) {
        let names: Vec<String> = (1..=sizes[p]).map(|rank| format!("{}{}", code, rank)).collect();
        let rows: Vec<(u32, &str, &str)> = names
            .iter()
            .enumerate()
            .map(|(i, name)| ((i + 1) as u32, ALIASES[p][i], name.as_str()))
            .collect();
        input = input.with_position(*code, rows);
    }
    input
}

//! Random fill.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use matchforge_core::Result;
use matchforge_scoring::{ScheduleModel, TournamentSolution};

/// Fills every game with distinct random players per position and spreads
/// the games evenly over the days in random order.
pub fn random_solution<R: Rng>(model: &ScheduleModel, rng: &mut R) -> Result<TournamentSolution> {
    let games = model.game_count();
    let teams = model.teams();
    let positions = model.positions();

    let mut days: Vec<usize> = (0..games).map(|g| g % model.day_count()).collect();
    days.shuffle(rng);

    let mut solution = model.solution(vec![0; games * teams * positions], days)?;
    for game in 0..games {
        for position in 0..positions {
            let picks = model.domain(position).choose_multiple(rng, teams);
            for (team, &player) in picks.enumerate() {
                let slot = solution.slot_index(game, team, position);
                solution.set_slot_at(slot, player);
            }
        }
    }
    Ok(solution)
}

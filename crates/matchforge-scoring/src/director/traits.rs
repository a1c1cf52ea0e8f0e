// Score director trait definition.

use matchforge_core::{HardSoftScore, PlayerId};

use crate::solution::TournamentSolution;

// The score director manages the working solution and its score.
//
// Every mutation goes through the director and returns the new score, so
// moves never touch the solution directly. Undoing a move is applying its
// inverse mutation.
pub trait ScoreDirector: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &TournamentSolution;

    // Returns the score of the working solution.
    fn score(&self) -> HardSoftScore;

    // Replaces the working solution and scores it from scratch.
    fn set_working_solution(&mut self, solution: TournamentSolution) -> HardSoftScore;

    // Puts `player` into slot `slot`.
    fn change_slot(&mut self, slot: usize, player: PlayerId) -> HardSoftScore;

    // Exchanges the players of two slots.
    fn swap_slots(&mut self, a: usize, b: usize) -> HardSoftScore;

    // Moves a game to another day.
    fn change_day(&mut self, game: usize, day: usize) -> HardSoftScore;

    // Exchanges the days of two games.
    fn swap_days(&mut self, a: usize, b: usize) -> HardSoftScore;

    // Exchanges the full lineups of two games.
    fn swap_lineups(&mut self, a: usize, b: usize) -> HardSoftScore;

    // Number of score calculations performed so far.
    fn calculation_count(&self) -> u64;

    // Clones the working solution with its score set.
    fn clone_working_solution(&self) -> TournamentSolution {
        let mut solution = self.working_solution().clone();
        solution.set_score(Some(self.score()));
        solution
    }

    // Returns true if this score director supports incremental scoring.
    fn is_incremental(&self) -> bool {
        false
    }
}

//! Incremental score director.
//!
//! A change touches one or two games. Its score delta is computed by
//! retracting the touched games' contributions (local terms, adjacency
//! edges, pair totals, play counts, day loads), applying the change, and
//! inserting the new contributions. Untouched games are never revisited.

use matchforge_core::{HardSoftScore, MatchForgeError, PlayerId, Result};
use smallvec::SmallVec;

use super::traits::ScoreDirector;
use crate::assembler::ScheduleModel;
use crate::evaluate::{
    back_to_back_term, ban_term, day_load_term, domain_term, evaluate_full, pair_hard,
    play_count_term, tier_balance_term, uniqueness_term, Breakdown,
};
use crate::objective::Objective;
use crate::relations::{GameRelations, PairId};
use crate::solution::TournamentSolution;

type Touched = SmallVec<[usize; 2]>;

/// Score director that updates the score from the games a change touches.
///
/// # Example
///
/// ```
/// use matchforge_core::{BanList, DiagnosticLog, Roster, Score, Tournament};
/// use matchforge_scoring::{IncrementalScoreDirector, ModelAssembler, Objective, ScoreDirector};
/// use matchforge_test::{canonical_assignment, canonical_roster};
///
/// let roster = canonical_roster();
/// let mut log = DiagnosticLog::new();
/// let model = ModelAssembler::assemble(&roster, &BanList::new(), &Tournament::canonical(), &mut log).unwrap();
/// let objective = Objective::build(&model);
///
/// let raw = canonical_assignment();
/// let solution = model.solution(raw.slots, raw.days).unwrap();
/// let mut director = IncrementalScoreDirector::new(&model, &objective, solution);
/// assert!(director.score().is_feasible());
///
/// // Moving game 1 onto game 0's day puts shared players back to back.
/// let day = director.working_solution().day(0);
/// let worse = director.change_day(1, day);
/// assert!(!worse.is_feasible());
/// ```
pub struct IncrementalScoreDirector<'m> {
    model: &'m ScheduleModel,
    objective: &'m Objective,
    working_solution: TournamentSolution,
    relations: Vec<GameRelations>,
    enemies: Vec<u32>,
    allies: Vec<u32>,
    plays: Vec<u32>,
    loads: Vec<u32>,
    hard_penalty: i64,
    soft_penalty: i64,
    calculation_count: u64,
}

impl<'m> IncrementalScoreDirector<'m> {
    /// Creates a director and scores `solution` from scratch.
    pub fn new(model: &'m ScheduleModel, objective: &'m Objective, solution: TournamentSolution) -> Self {
        let pairs = model.pairs();
        let relations = (0..solution.game_count())
            .map(|g| GameRelations::build(&solution, pairs, g))
            .collect();
        let mut director = Self {
            model,
            objective,
            working_solution: solution,
            relations,
            enemies: vec![0; pairs.len()],
            allies: vec![0; pairs.len()],
            plays: vec![0; model.player_count()],
            loads: vec![0; model.day_count()],
            hard_penalty: 0,
            soft_penalty: 0,
            calculation_count: 0,
        };
        director.initialize();
        director
    }

    fn initialize(&mut self) {
        let games = self.working_solution.game_count();
        let mut hard = 0;
        for game in 0..games {
            hard += self.game_local(game);
            if game + 1 < games {
                hard += self.edge_local(game);
            }
            self.count_game(game, 1);
        }

        let mut soft = 0;
        for pair in 0..self.enemies.len() {
            hard += pair_hard(self.model, pair, self.enemies[pair]).1;
            soft += self
                .objective
                .pair_penalty(pair, self.enemies[pair], self.allies[pair]);
        }
        for (player, &plays) in self.plays.iter().enumerate() {
            hard += play_count_term(self.model, player, plays);
        }
        for &load in &self.loads {
            hard += day_load_term(self.model, load);
        }

        self.hard_penalty = hard;
        self.soft_penalty = soft;
        self.calculation_count += 1;
        tracing::trace!(score = %self.score(), "Incremental director initialized");
    }

    /// Adds `sign` times a game's relations to the running totals, without
    /// touching the penalties.
    fn count_game(&mut self, game: usize, sign: i32) {
        let rel = &self.relations[game];
        for &pair in &rel.enemies {
            self.enemies[pair] = (self.enemies[pair] as i32 + sign) as u32;
        }
        for &pair in &rel.allies {
            self.allies[pair] = (self.allies[pair] as i32 + sign) as u32;
        }
        for &player in &rel.presence {
            self.plays[player] = (self.plays[player] as i32 + sign) as u32;
        }
        let day = self.working_solution.day(game);
        self.loads[day] = (self.loads[day] as i32 + sign) as u32;
    }

    /// Penalty of the terms that depend on one game only.
    fn game_local(&self, game: usize) -> i64 {
        let rel = &self.relations[game];
        let solution = &self.working_solution;
        domain_term(self.model, solution, game)
            + uniqueness_term(solution, rel)
            + tier_balance_term(self.model, solution, game)
            + ban_term(self.model, rel, solution.day(game))
    }

    /// Back-to-back penalty of games `game` and `game + 1`.
    fn edge_local(&self, game: usize) -> i64 {
        back_to_back_term(
            &self.relations[game],
            &self.relations[game + 1],
            self.working_solution.day(game),
            self.working_solution.day(game + 1),
        )
    }

    fn local_penalty(&self, games: &Touched) -> i64 {
        let last = self.working_solution.game_count().saturating_sub(1);
        let mut edges: SmallVec<[usize; 4]> = SmallVec::new();
        for &g in games {
            if g > 0 {
                edges.push(g - 1);
            }
            if g < last {
                edges.push(g);
            }
        }
        edges.sort_unstable();
        edges.dedup();

        games.iter().map(|&g| self.game_local(g)).sum::<i64>()
            + edges.iter().map(|&e| self.edge_local(e)).sum::<i64>()
    }

    fn pair_penalties(&self, pair: PairId) -> (i64, i64) {
        let enemies = self.enemies[pair];
        (
            pair_hard(self.model, pair, enemies).1,
            self.objective.pair_penalty(pair, enemies, self.allies[pair]),
        )
    }

    /// Retracts or inserts one game, adjusting the aggregated penalties.
    fn shift_game(&mut self, game: usize, sign: i32) {
        let rel = std::mem::take(&mut self.relations[game]);
        let (mut hard, mut soft) = (0i64, 0i64);

        let mut touched_pairs: SmallVec<[PairId; 64]> = SmallVec::new();
        touched_pairs.extend_from_slice(&rel.enemies);
        touched_pairs.extend_from_slice(&rel.allies);
        touched_pairs.sort_unstable();
        touched_pairs.dedup();

        for &pair in &touched_pairs {
            let (h, s) = self.pair_penalties(pair);
            hard -= h;
            soft -= s;
        }
        for &player in &rel.presence {
            hard -= play_count_term(self.model, player, self.plays[player]);
        }
        let day = self.working_solution.day(game);
        hard -= day_load_term(self.model, self.loads[day]);

        self.relations[game] = rel;
        self.count_game(game, sign);

        for &pair in &touched_pairs {
            let (h, s) = self.pair_penalties(pair);
            hard += h;
            soft += s;
        }
        for &player in &self.relations[game].presence {
            hard += play_count_term(self.model, player, self.plays[player]);
        }
        hard += day_load_term(self.model, self.loads[day]);

        self.hard_penalty += hard;
        self.soft_penalty += soft;
    }

    fn mutate<F>(&mut self, games: Touched, change: F) -> HardSoftScore
    where
        F: FnOnce(&mut TournamentSolution),
    {
        let mut games = games;
        games.sort_unstable();
        games.dedup();

        let before = self.local_penalty(&games);
        for &g in &games {
            self.shift_game(g, -1);
        }

        change(&mut self.working_solution);

        let pairs = self.model.pairs();
        for &g in &games {
            self.relations[g] = GameRelations::build(&self.working_solution, pairs, g);
            self.shift_game(g, 1);
        }
        let after = self.local_penalty(&games);

        self.hard_penalty += after - before;
        self.calculation_count += 1;
        let score = self.score();
        tracing::trace!(score = %score, games = ?games.as_slice(), "Move evaluated");
        score
    }

    /// Scores the working solution from scratch.
    pub fn evaluate_full(&self) -> Breakdown {
        evaluate_full(self.model, self.objective, &self.working_solution)
    }

    /// Checks the running score against a full recalculation.
    pub fn assert_consistent(&self) -> Result<()> {
        let full = self.evaluate_full().score();
        let incremental = self.score();
        if full != incremental {
            return Err(MatchForgeError::Internal(format!(
                "incremental score {} differs from full recalculation {}",
                incremental, full
            )));
        }
        Ok(())
    }

    pub fn model(&self) -> &'m ScheduleModel {
        self.model
    }

    pub fn objective(&self) -> &'m Objective {
        self.objective
    }

    /// Games a player appears in.
    pub fn plays(&self, player: PlayerId) -> u32 {
        self.plays[player]
    }

    pub fn into_solution(mut self) -> TournamentSolution {
        let score = self.score();
        self.working_solution.set_score(Some(score));
        self.working_solution
    }
}

impl ScoreDirector for IncrementalScoreDirector<'_> {
    fn working_solution(&self) -> &TournamentSolution {
        &self.working_solution
    }

    #[inline]
    fn score(&self) -> HardSoftScore {
        HardSoftScore::of(-self.hard_penalty, -self.soft_penalty)
    }

    fn set_working_solution(&mut self, solution: TournamentSolution) -> HardSoftScore {
        let pairs = self.model.pairs();
        self.relations = (0..solution.game_count())
            .map(|g| GameRelations::build(&solution, pairs, g))
            .collect();
        self.working_solution = solution;
        self.enemies.fill(0);
        self.allies.fill(0);
        self.plays.fill(0);
        self.loads.fill(0);
        self.initialize();
        self.score()
    }

    fn change_slot(&mut self, slot: usize, player: PlayerId) -> HardSoftScore {
        let game = self.working_solution.game_of_slot(slot);
        self.mutate(SmallVec::from_slice(&[game]), |s| s.set_slot_at(slot, player))
    }

    fn swap_slots(&mut self, a: usize, b: usize) -> HardSoftScore {
        let games = SmallVec::from_slice(&[
            self.working_solution.game_of_slot(a),
            self.working_solution.game_of_slot(b),
        ]);
        self.mutate(games, |s| s.swap_slots(a, b))
    }

    fn change_day(&mut self, game: usize, day: usize) -> HardSoftScore {
        self.mutate(SmallVec::from_slice(&[game]), |s| s.set_day(game, day))
    }

    fn swap_days(&mut self, a: usize, b: usize) -> HardSoftScore {
        self.mutate(SmallVec::from_slice(&[a, b]), |s| {
            let (da, db) = (s.day(a), s.day(b));
            s.set_day(a, db);
            s.set_day(b, da);
        })
    }

    fn swap_lineups(&mut self, a: usize, b: usize) -> HardSoftScore {
        self.mutate(SmallVec::from_slice(&[a, b]), |s| s.swap_lineups(a, b))
    }

    fn calculation_count(&self) -> u64 {
        self.calculation_count
    }

    fn is_incremental(&self) -> bool {
        true
    }
}

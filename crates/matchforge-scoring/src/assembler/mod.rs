//! Constraint assembly: turns a roster, bans and a tournament shape into
//! the immutable [`ScheduleModel`] every solver worker shares.
//!
//! The assembler posts the nine hard rules, records how many instances of
//! each it posted, resolves the conditional play-count rule once, and runs
//! the feasibility screen.

mod screen;

#[cfg(test)]
mod tests;

use matchforge_core::{
    BanList, ConstraintRef, DiagnosticLog, PlayerId, PositionIdx, ResolvedBans, Result, Roster,
    SolvePhase, Tournament,
};

use crate::relations::{PairId, PairIndex};
use crate::rules::HardRule;
use crate::solution::TournamentSolution;

pub use screen::FeasibilityScreen;

/// How a pair of players is constrained beyond the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    /// Both are Tier-1: enemies in exactly one game.
    Tier1,
    /// Same position: enemies in at least the minimum number of games.
    SamePosition,
    /// No pair rule.
    Unconstrained,
}

/// A rule as posted on the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedConstraint {
    pub rule: HardRule,
    /// Number of individual constraint instances posted.
    pub instances: usize,
}

impl PostedConstraint {
    pub fn constraint_ref(&self) -> ConstraintRef {
        self.rule.constraint_ref()
    }
}

/// The assembled constraint model.
#[derive(Debug, Clone)]
pub struct ScheduleModel {
    roster: Roster,
    tournament: Tournament,
    bans: ResolvedBans,
    pairs: PairIndex,
    pair_kinds: Vec<PairKind>,
    tier1_pairs: Vec<PairId>,
    same_position_pairs: Vec<PairId>,
    play_count_target: Option<usize>,
    posted: Vec<PostedConstraint>,
    infeasibility: Vec<String>,
}

impl ScheduleModel {
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    pub fn bans(&self) -> &ResolvedBans {
        &self.bans
    }

    pub fn pairs(&self) -> &PairIndex {
        &self.pairs
    }

    #[inline]
    pub fn pair_kind(&self, pair: PairId) -> PairKind {
        self.pair_kinds[pair]
    }

    pub fn tier1_pairs(&self) -> &[PairId] {
        &self.tier1_pairs
    }

    pub fn same_position_pairs(&self) -> &[PairId] {
        &self.same_position_pairs
    }

    /// Games every non-Tier-1 player must play, when the rule is posted.
    pub fn play_count_target(&self) -> Option<usize> {
        self.play_count_target
    }

    pub fn posted(&self) -> &[PostedConstraint] {
        &self.posted
    }

    pub fn posted_instances(&self, rule: HardRule) -> usize {
        self.posted
            .iter()
            .find(|c| c.rule == rule)
            .map_or(0, |c| c.instances)
    }

    /// Reasons the feasibility screen proved the model unsatisfiable.
    pub fn infeasibility(&self) -> &[String] {
        &self.infeasibility
    }

    pub fn is_proven_infeasible(&self) -> bool {
        !self.infeasibility.is_empty()
    }

    #[inline]
    pub fn game_count(&self) -> usize {
        self.tournament.game_count
    }

    #[inline]
    pub fn day_count(&self) -> usize {
        self.tournament.day_count
    }

    #[inline]
    pub fn teams(&self) -> usize {
        self.tournament.teams_per_game
    }

    #[inline]
    pub fn positions(&self) -> usize {
        self.roster.position_count()
    }

    #[inline]
    pub fn slots_per_game(&self) -> usize {
        self.tournament.slots_per_game(self.positions())
    }

    pub fn player_count(&self) -> usize {
        self.roster.player_count()
    }

    /// Values a slot of `position` may take.
    pub fn domain(&self, position: PositionIdx) -> &[PlayerId] {
        self.roster.players_at(position)
    }

    /// Builds a solution of this model's shape.
    pub fn solution(&self, slots: Vec<PlayerId>, days: Vec<usize>) -> Result<TournamentSolution> {
        TournamentSolution::new(self.game_count(), self.teams(), self.positions(), slots, days)
    }
}

/// Posts the hard rules of a tournament onto a [`ScheduleModel`].
pub struct ModelAssembler;

impl ModelAssembler {
    /// Assembles the model.
    ///
    /// Fails with [`MatchForgeError::InvalidModel`] on structural defects
    /// of the tournament shape. Unsatisfiable but well-formed models are
    /// returned with their screen failures recorded.
    pub fn assemble(
        roster: &Roster,
        bans: &BanList,
        tournament: &Tournament,
        log: &mut DiagnosticLog,
    ) -> Result<ScheduleModel> {
        tournament.validate(roster.position_count(), roster.smallest_pool())?;

        let resolved = bans.resolve(roster, tournament.day_count, log);
        let pairs = PairIndex::new(roster.player_count());

        let mut pair_kinds = Vec::with_capacity(pairs.len());
        let mut tier1_pairs = Vec::new();
        let mut same_position_pairs = Vec::new();
        for (pair, (a, b)) in pairs.iter() {
            let kind = if roster.is_tier1(a) && roster.is_tier1(b) {
                tier1_pairs.push(pair);
                PairKind::Tier1
            } else if roster.position_of(a) == roster.position_of(b) {
                same_position_pairs.push(pair);
                PairKind::SamePosition
            } else {
                PairKind::Unconstrained
            };
            pair_kinds.push(kind);
        }
        let positions_per_team = roster.position_count();
        log.info(
            SolvePhase::Relations,
            format!(
                "{} player pairs indexed: {} Tier-1, {} same-position, {} unconstrained; {} ally and {} enemy relations per game",
                pairs.len(),
                tier1_pairs.len(),
                same_position_pairs.len(),
                pairs.len() - tier1_pairs.len() - same_position_pairs.len(),
                tournament.teams_per_game * positions_per_team * positions_per_team.saturating_sub(1) / 2,
                tournament.teams_per_game * tournament.teams_per_game.saturating_sub(1) / 2
                    * positions_per_team
                    * positions_per_team,
            ),
        );

        let games = tournament.game_count;
        let teams = tournament.teams_per_game;
        let positions = roster.position_count();
        let mut posted = Vec::with_capacity(HardRule::COUNT);
        let mut post = |rule: HardRule, instances: usize, log: &mut DiagnosticLog| {
            log.info(
                SolvePhase::Assembly,
                format!("{}: posted {} constraints", rule.name(), instances),
            );
            posted.push(PostedConstraint { rule, instances });
        };

        post(HardRule::Domain, games * teams * positions, log);
        post(HardRule::IntraGameUniqueness, games, log);
        post(HardRule::TeamTierBalance, games * teams, log);

        let realisable = games * tournament.tier1_per_team * tournament.tier1_per_team;
        if tier1_pairs.len() != realisable {
            log.warning(
                SolvePhase::Assembly,
                format!(
                    "{} Tier-1 pairs but {} games x {}^2 Tier-1 matchups can be realised",
                    tier1_pairs.len(),
                    games,
                    tournament.tier1_per_team
                ),
            );
        }
        post(HardRule::Tier1RoundRobin, tier1_pairs.len(), log);
        post(HardRule::SamePositionRivalry, same_position_pairs.len(), log);

        let non_tier1 = roster.player_count() - roster.tier1_players().len();
        let total_slots = games * teams * positions.saturating_sub(tournament.tier1_per_team);
        let play_count_target = match play_count_target(total_slots, non_tier1) {
            Ok(target) => {
                post(HardRule::PlayCountEqualization, non_tier1, log);
                log.info(
                    SolvePhase::Assembly,
                    format!(
                        "every non-Tier-1 player plays exactly {} games ({} slots / {} players)",
                        target, total_slots, non_tier1
                    ),
                );
                Some(target)
            }
            Err(reason) => {
                log.skipped(
                    SolvePhase::Assembly,
                    format!("{} omitted: {}", HardRule::PlayCountEqualization.name(), reason),
                );
                None
            }
        };

        post(HardRule::DayLoadBalancing, games + tournament.day_count, log);
        post(HardRule::DayBans, resolved.len() * games, log);
        post(
            HardRule::NoSameDayBackToBack,
            games.saturating_sub(1) * roster.player_count(),
            log,
        );

        let mut model = ScheduleModel {
            roster: roster.clone(),
            tournament: *tournament,
            bans: resolved,
            pairs,
            pair_kinds,
            tier1_pairs,
            same_position_pairs,
            play_count_target,
            posted,
            infeasibility: Vec::new(),
        };

        model.infeasibility = FeasibilityScreen::new(&model).run();
        for reason in &model.infeasibility {
            log.warning(SolvePhase::Assembly, format!("infeasible: {}", reason));
        }

        tracing::info!(
            event = "model_assembled",
            players = model.player_count(),
            pairs = model.pairs.len(),
            games = games,
            proven_infeasible = model.is_proven_infeasible(),
        );

        Ok(model)
    }
}

/// Games each non-Tier-1 player must play, or why the rule is omitted.
fn play_count_target(total_slots: usize, non_tier1: usize) -> std::result::Result<usize, String> {
    if non_tier1 == 0 {
        Err("no non-Tier-1 players".to_string())
    } else if total_slots % non_tier1 != 0 {
        Err(format!(
            "{} non-Tier-1 slots do not divide evenly among {} players",
            total_slots, non_tier1
        ))
    } else {
        Ok(total_slots / non_tier1)
    }
}

//! Rule penalties and full-recalculation scoring.
//!
//! The per-term functions here are shared by the incremental director and
//! [`evaluate_full`], so both always agree on what a violation costs.

use matchforge_core::{HardSoftScore, PlayerId};

use crate::assembler::{PairKind, ScheduleModel};
use crate::objective::Objective;
use crate::relations::{GameRelations, PairId};
use crate::rules::HardRule;
use crate::solution::TournamentSolution;

/// Matches and penalty of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleTally {
    /// Number of violated constraint instances.
    pub matches: usize,
    /// Summed violation magnitude.
    pub penalty: i64,
}

impl RuleTally {
    #[inline]
    fn add(&mut self, penalty: i64) {
        if penalty > 0 {
            self.matches += 1;
            self.penalty += penalty;
        }
    }
}

/// Per-rule breakdown of a schedule's score.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub hard: [RuleTally; HardRule::COUNT],
    pub never_enemies: usize,
    pub never_allies: usize,
}

impl Breakdown {
    pub fn rule(&self, rule: HardRule) -> RuleTally {
        self.hard[rule.index()]
    }

    pub fn score(&self) -> HardSoftScore {
        let hard: i64 = self.hard.iter().map(|t| t.penalty).sum();
        HardSoftScore::of(-hard, -((self.never_enemies + self.never_allies) as i64))
    }
}

/// Hard penalty of a pair given its enemy total.
#[inline]
pub(crate) fn pair_hard(model: &ScheduleModel, pair: PairId, enemies: u32) -> (HardRule, i64) {
    match model.pair_kind(pair) {
        PairKind::Tier1 => (HardRule::Tier1RoundRobin, (enemies as i64 - 1).abs()),
        PairKind::SamePosition => {
            let min = model.tournament().min_same_position_rivalry as i64;
            (HardRule::SamePositionRivalry, (min - enemies as i64).max(0))
        }
        PairKind::Unconstrained => (HardRule::SamePositionRivalry, 0),
    }
}

#[inline]
pub(crate) fn play_count_term(model: &ScheduleModel, player: PlayerId, plays: u32) -> i64 {
    match model.play_count_target() {
        Some(target) if !model.roster().is_tier1(player) => (plays as i64 - target as i64).abs(),
        _ => 0,
    }
}

#[inline]
pub(crate) fn day_load_term(model: &ScheduleModel, load: u32) -> i64 {
    let t = model.tournament();
    let load = load as i64;
    (load - t.max_games_per_day as i64).max(0) + (t.min_games_per_day as i64 - load).max(0)
}

pub(crate) fn domain_term(model: &ScheduleModel, solution: &TournamentSolution, game: usize) -> i64 {
    let roster = model.roster();
    let positions = solution.positions();
    solution
        .game(game)
        .iter()
        .enumerate()
        .filter(|&(i, &player)| roster.position_of(player) != i % positions)
        .count() as i64
}

#[inline]
pub(crate) fn uniqueness_term(solution: &TournamentSolution, rel: &GameRelations) -> i64 {
    (solution.slots_per_game() - rel.presence.len()) as i64
}

pub(crate) fn tier_balance_term(
    model: &ScheduleModel,
    solution: &TournamentSolution,
    game: usize,
) -> i64 {
    (0..solution.teams())
        .map(|team| team_tier_term(model, solution, game, team))
        .sum()
}

#[inline]
pub(crate) fn ban_term(model: &ScheduleModel, rel: &GameRelations, day: usize) -> i64 {
    let bans = model.bans();
    if bans.banned_on(day).is_empty() {
        return 0;
    }
    rel.presence
        .iter()
        .filter(|&&p| bans.is_banned(day, p))
        .count() as i64
}

#[inline]
pub(crate) fn back_to_back_term(
    first: &GameRelations,
    second: &GameRelations,
    first_day: usize,
    second_day: usize,
) -> i64 {
    if first_day == second_day {
        first.shared_players(second) as i64
    } else {
        0
    }
}

/// Scores a schedule from scratch, rule by rule.
pub fn evaluate_full(
    model: &ScheduleModel,
    objective: &Objective,
    solution: &TournamentSolution,
) -> Breakdown {
    let pairs = model.pairs();
    let games = solution.game_count();
    let relations: Vec<GameRelations> = (0..games)
        .map(|g| GameRelations::build(solution, pairs, g))
        .collect();

    let mut breakdown = Breakdown::default();
    let mut enemies = vec![0u32; pairs.len()];
    let mut allies = vec![0u32; pairs.len()];
    let mut plays = vec![0u32; model.player_count()];
    let mut loads = vec![0u32; model.day_count()];

    for (game, rel) in relations.iter().enumerate() {
        let day = solution.day(game);
        breakdown.hard[HardRule::Domain.index()].add(domain_term(model, solution, game));
        breakdown.hard[HardRule::IntraGameUniqueness.index()].add(uniqueness_term(solution, rel));
        for team in 0..solution.teams() {
            breakdown.hard[HardRule::TeamTierBalance.index()]
                .add(team_tier_term(model, solution, game, team));
        }
        breakdown.hard[HardRule::DayBans.index()].add(ban_term(model, rel, day));
        if game + 1 < games {
            let next_day = solution.day(game + 1);
            breakdown.hard[HardRule::NoSameDayBackToBack.index()].add(back_to_back_term(
                rel,
                &relations[game + 1],
                day,
                next_day,
            ));
        }

        for &pair in &rel.enemies {
            enemies[pair] += 1;
        }
        for &pair in &rel.allies {
            allies[pair] += 1;
        }
        for &player in &rel.presence {
            plays[player] += 1;
        }
        loads[day] += 1;
    }

    for pair in 0..pairs.len() {
        let (rule, penalty) = pair_hard(model, pair, enemies[pair]);
        breakdown.hard[rule.index()].add(penalty);
        if enemies[pair] == 0 {
            breakdown.never_enemies += 1;
        }
        if objective.is_ally_eligible(pair) && allies[pair] == 0 {
            breakdown.never_allies += 1;
        }
    }
    for (player, &count) in plays.iter().enumerate() {
        breakdown.hard[HardRule::PlayCountEqualization.index()]
            .add(play_count_term(model, player, count));
    }
    for &load in &loads {
        breakdown.hard[HardRule::DayLoadBalancing.index()].add(day_load_term(model, load));
    }

    breakdown
}

fn team_tier_term(
    model: &ScheduleModel,
    solution: &TournamentSolution,
    game: usize,
    team: usize,
) -> i64 {
    let roster = model.roster();
    let tier1 = solution
        .team(game, team)
        .iter()
        .filter(|&&p| roster.is_tier1(p))
        .count() as i64;
    (tier1 - model.tournament().tier1_per_team as i64).abs()
}

//! Independent re-check of an extracted schedule.
//!
//! Works directly on the concrete slot and day values through a
//! [`RelationMatrix`], sharing no code with the score directors. Any
//! violation of a schedule the search reported as valid is a fatal
//! internal inconsistency.

use matchforge_core::{MatchForgeError, Result};

use crate::assembler::{PairKind, ScheduleModel};
use crate::relations::RelationMatrix;
use crate::solution::TournamentSolution;

pub struct ScheduleValidator<'m> {
    model: &'m ScheduleModel,
}

impl<'m> ScheduleValidator<'m> {
    pub fn new(model: &'m ScheduleModel) -> Self {
        Self { model }
    }

    /// Fails with [`MatchForgeError::ConsistencyViolation`] listing every
    /// violated rule.
    pub fn validate(&self, solution: &TournamentSolution) -> Result<()> {
        let violations = self.violations(solution);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(MatchForgeError::ConsistencyViolation(violations.join("; ")))
        }
    }

    /// Human-readable description of every violation.
    pub fn violations(&self, solution: &TournamentSolution) -> Vec<String> {
        let mut out = Vec::new();
        let roster = self.model.roster();
        let t = self.model.tournament();
        let games = solution.game_count();

        for game in 0..games {
            let number = game + 1;
            for team in 0..solution.teams() {
                let lineup = solution.team(game, team);
                for (position, &player) in lineup.iter().enumerate() {
                    if roster.position_of(player) != position {
                        out.push(format!(
                            "game {}: {} fills a '{}' slot",
                            number,
                            roster.display_name(player),
                            roster.position_code(position)
                        ));
                    }
                }
                let tier1 = lineup.iter().filter(|&&p| roster.is_tier1(p)).count();
                if tier1 != t.tier1_per_team {
                    out.push(format!(
                        "game {} team {}: {} Tier-1 players, expected {}",
                        number,
                        team + 1,
                        tier1,
                        t.tier1_per_team
                    ));
                }
            }

            let mut players = solution.game(game).to_vec();
            players.sort_unstable();
            if players.windows(2).any(|w| w[0] == w[1]) {
                out.push(format!("game {}: a player occupies two slots", number));
            }
            players.dedup();

            let day = solution.day(game);
            for &banned in self.model.bans().banned_on(day) {
                if solution.game(game).contains(&banned) {
                    out.push(format!(
                        "game {}: {} plays on banned day {}",
                        number,
                        roster.display_name(banned),
                        day + 1
                    ));
                }
            }

            if game + 1 < games && solution.day(game + 1) == day {
                let next = solution.game(game + 1);
                for &player in &players {
                    if next.contains(&player) {
                        out.push(format!(
                            "games {} and {}: {} plays back to back on day {}",
                            number,
                            number + 1,
                            roster.display_name(player),
                            day + 1
                        ));
                    }
                }
            }
        }

        let pairs = self.model.pairs();
        let matrix = RelationMatrix::build(solution, pairs);
        for (pair, (a, b)) in pairs.iter() {
            let enemies = matrix.enemy_count(pair);
            match self.model.pair_kind(pair) {
                PairKind::Tier1 if enemies != 1 => out.push(format!(
                    "Tier-1 pair {} / {} are enemies in {} games",
                    roster.display_name(a),
                    roster.display_name(b),
                    enemies
                )),
                PairKind::SamePosition if enemies < t.min_same_position_rivalry => {
                    out.push(format!(
                        "same-position pair {} / {} are enemies in {} games, minimum {}",
                        roster.display_name(a),
                        roster.display_name(b),
                        enemies,
                        t.min_same_position_rivalry
                    ))
                }
                _ => {}
            }
        }

        if let Some(target) = self.model.play_count_target() {
            for player in roster.players().iter().filter(|p| !p.is_tier1()) {
                let plays = (0..games)
                    .filter(|&g| solution.game(g).contains(&player.id))
                    .count();
                if plays != target {
                    out.push(format!(
                        "{} plays {} games, expected {}",
                        player.display_name(),
                        plays,
                        target
                    ));
                }
            }
        }

        for day in 0..self.model.day_count() {
            let load = solution.days().iter().filter(|&&d| d == day).count();
            if load < t.min_games_per_day || load > t.max_games_per_day {
                out.push(format!(
                    "day {} hosts {} games, allowed {}..={}",
                    day + 1,
                    load,
                    t.min_games_per_day,
                    t.max_games_per_day
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::ModelAssembler;
    use matchforge_core::{BanList, DiagnosticLog, Tournament};
    use matchforge_test::{canonical_assignment, canonical_roster};

    fn canonical_model(bans: &BanList) -> ScheduleModel {
        let mut log = DiagnosticLog::new();
        ModelAssembler::assemble(&canonical_roster(), bans, &Tournament::canonical(), &mut log)
            .unwrap()
    }

    #[test]
    fn test_canonical_assignment_validates() {
        let model = canonical_model(&BanList::new());
        let raw = canonical_assignment();
        let solution = model.solution(raw.slots, raw.days).unwrap();

        assert!(ScheduleValidator::new(&model).validate(&solution).is_ok());
    }

    #[test]
    fn test_duplicate_player_is_a_consistency_violation() {
        let model = canonical_model(&BanList::new());
        let raw = canonical_assignment();
        let mut solution = model.solution(raw.slots, raw.days).unwrap();
        let a = solution.slot(5, 0, 4);
        let b = solution.slot_index(5, 1, 4);
        solution.set_slot_at(b, a);

        let err = ScheduleValidator::new(&model).validate(&solution).unwrap_err();
        match err {
            MatchForgeError::ConsistencyViolation(msg) => {
                assert!(msg.contains("game 6: a player occupies two slots"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reports_bans_and_day_load() {
        let model = canonical_model(&BanList::new().with_ban(1, "T1"));
        let raw = canonical_assignment();
        let mut solution = model.solution(raw.slots, raw.days).unwrap();
        solution.set_day(1, 0);

        let violations = ScheduleValidator::new(&model).violations(&solution);
        assert!(violations.iter().any(|v| v.contains("banned day 1")));
        assert!(violations.iter().any(|v| v.contains("day 1 hosts 5 games")));
        assert!(violations.iter().any(|v| v.contains("back to back")));
    }
}

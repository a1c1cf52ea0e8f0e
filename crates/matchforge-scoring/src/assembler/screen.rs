//! Necessary conditions for satisfiability.
//!
//! Each check is a counting argument over the posted rules. A failed check
//! proves that no assignment satisfies the model, so the solve can report
//! `Infeasible` without searching. Passing every check proves nothing.

use super::ScheduleModel;

/// Runs the counting checks against an assembled model.
pub struct FeasibilityScreen<'a> {
    model: &'a ScheduleModel,
}

impl<'a> FeasibilityScreen<'a> {
    pub fn new(model: &'a ScheduleModel) -> Self {
        Self { model }
    }

    /// Returns one message per failed check; empty when all pass.
    pub fn run(&self) -> Vec<String> {
        let mut failures = Vec::new();
        self.check_day_band(&mut failures);
        self.check_day_availability(&mut failures);
        self.check_day_tier1_pairs(&mut failures);
        self.check_tier1_round_robin(&mut failures);
        self.check_rivalry_capacity(&mut failures);
        self.check_always_banned(&mut failures);
        failures
    }

    fn check_day_band(&self, failures: &mut Vec<String>) {
        let t = self.model.tournament();
        if !t.day_band_admits_total() {
            failures.push(format!(
                "{} days hosting {}..={} games each cannot hold {} games",
                t.day_count, t.min_games_per_day, t.max_games_per_day, t.game_count
            ));
        }
    }

    /// Every day must host at least `min` games, each needing one unbanned
    /// player per team at every position.
    fn check_day_availability(&self, failures: &mut Vec<String>) {
        let t = self.model.tournament();
        if t.min_games_per_day == 0 {
            return;
        }
        let roster = self.model.roster();
        let bans = self.model.bans();

        for day in 0..t.day_count {
            for position in 0..roster.position_count() {
                let available = roster
                    .players_at(position)
                    .iter()
                    .filter(|&&p| !bans.is_banned(day, p))
                    .count();
                if available < t.teams_per_game {
                    failures.push(format!(
                        "day {}: only {} unbanned '{}' players for {} teams",
                        day + 1,
                        available,
                        roster.position_code(position),
                        t.teams_per_game
                    ));
                }
            }

            let tier1_available = roster
                .tier1_players()
                .iter()
                .filter(|&&p| !bans.is_banned(day, p))
                .count();
            let needed = t.teams_per_game * t.tier1_per_team;
            if tier1_available < needed {
                failures.push(format!(
                    "day {}: only {} unbanned Tier-1 players, {} needed per game",
                    day + 1,
                    tier1_available,
                    needed
                ));
            }
        }
    }

    /// With one Tier-1 player per team, every game on a day consumes a
    /// distinct pair of that day's unbanned Tier-1 players.
    fn check_day_tier1_pairs(&self, failures: &mut Vec<String>) {
        let t = self.model.tournament();
        if t.tier1_per_team != 1 || t.teams_per_game != 2 || t.day_count == 0 {
            return;
        }
        let roster = self.model.roster();
        let bans = self.model.bans();
        let required = t
            .min_games_per_day
            .max(t.game_count.saturating_sub((t.day_count - 1) * t.max_games_per_day));
        if required == 0 {
            return;
        }

        for day in 0..t.day_count {
            let available = roster
                .tier1_players()
                .iter()
                .filter(|&&p| !bans.is_banned(day, p))
                .count();
            let pairs = available * available.saturating_sub(1) / 2;
            if pairs < required {
                failures.push(format!(
                    "day {}: {} unbanned Tier-1 players form {} distinct matchups but the day hosts at least {} games",
                    day + 1,
                    available,
                    pairs,
                    required
                ));
            }
        }
    }

    /// Every game realises exactly `k^2` Tier-1 matchups.
    fn check_tier1_round_robin(&self, failures: &mut Vec<String>) {
        let t = self.model.tournament();
        let pairs = self.model.tier1_pairs().len();
        let realised = t.game_count * t.tier1_per_team * t.tier1_per_team;
        if pairs != realised {
            failures.push(format!(
                "{} Tier-1 pairs must each meet once but {} games realise exactly {} Tier-1 matchups",
                pairs, t.game_count, realised
            ));
        }
    }

    /// Every game realises exactly one same-position matchup per position.
    fn check_rivalry_capacity(&self, failures: &mut Vec<String>) {
        let t = self.model.tournament();
        let roster = self.model.roster();
        for position in 0..roster.position_count() {
            let n = roster.players_at(position).len();
            let needed = n * n.saturating_sub(1) / 2 * t.min_same_position_rivalry;
            if needed > t.game_count {
                failures.push(format!(
                    "position '{}' needs {} same-position matchups but {} games offer {}",
                    roster.position_code(position),
                    needed,
                    t.game_count,
                    t.game_count
                ));
            }
        }
    }

    fn check_always_banned(&self, failures: &mut Vec<String>) {
        let t = self.model.tournament();
        let roster = self.model.roster();
        let bans = self.model.bans();
        let tier1_must_play = roster.tier1_players().len() > 1;

        for player in roster.players() {
            if !bans.banned_every_day(player.id) {
                continue;
            }
            let by_frequency = if player.is_tier1() {
                tier1_must_play
            } else {
                self.model.play_count_target().is_some_and(|target| target > 0)
            };
            let by_rivalry =
                t.min_same_position_rivalry > 0 && roster.players_at(player.position).len() > 1;
            let must_play = by_frequency || by_rivalry;

            if must_play {
                failures.push(format!(
                    "{} is banned on every day but is required to play",
                    player.display_name()
                ));
            }
        }
    }
}

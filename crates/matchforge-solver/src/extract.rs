//! Schedule extraction.
//!
//! Turns a validated solution into the caller-facing schedule: games
//! ordered by day then game index, numbered from 1, with labelled teams.

use std::fmt;

use serde::{Deserialize, Serialize};

use matchforge_core::Result;
use matchforge_scoring::{ScheduleModel, ScheduleValidator, TournamentSolution};

/// One player on a team sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupEntry {
    /// Position code, e.g. `"T"`.
    pub position: String,
    /// Canonical player name.
    pub name: String,
    /// `alias(name)`.
    pub display_name: String,
}

/// One team of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLineup {
    /// `"Team A"`, `"Team B"`, ...
    pub label: String,
    pub players: Vec<LineupEntry>,
}

impl TeamLineup {
    /// Player at a position code.
    pub fn player_at(&self, position: &str) -> Option<&LineupEntry> {
        self.players.iter().find(|e| e.position == position)
    }
}

/// One scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    /// 1-based day number.
    pub day: usize,
    /// 1-based game number (the game's index in the tournament).
    pub game: usize,
    pub teams: Vec<TeamLineup>,
}

impl ScheduledGame {
    /// Canonical names of every player in the game.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.teams
            .iter()
            .flat_map(|t| t.players.iter().map(|e| e.name.as_str()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players().any(|p| p == name)
    }
}

/// The extracted tournament schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub games: Vec<ScheduledGame>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledGame> {
        self.games.iter()
    }

    /// Games on a 1-based day.
    pub fn games_on(&self, day: usize) -> impl Iterator<Item = &ScheduledGame> {
        self.games.iter().filter(move |g| g.day == day)
    }

    /// Number of games a player appears in.
    pub fn appearances(&self, name: &str) -> usize {
        self.games.iter().filter(|g| g.contains(name)).count()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduledGame;
    type IntoIter = std::slice::Iter<'a, ScheduledGame>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_day = None;
        for game in &self.games {
            if current_day != Some(game.day) {
                writeln!(f, "Day {}", game.day)?;
                current_day = Some(game.day);
            }
            writeln!(f, "  Game {}", game.game)?;
            for team in &game.teams {
                let lineup: Vec<String> = team
                    .players
                    .iter()
                    .map(|e| format!("{}: {}", e.position, e.display_name))
                    .collect();
                writeln!(f, "    {:<7} {}", team.label, lineup.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Label of the `team`-th team: `"Team A"`, `"Team B"`, ...
pub fn team_label(team: usize) -> String {
    match u8::try_from(team).ok().filter(|t| *t < 26) {
        Some(t) => format!("Team {}", (b'A' + t) as char),
        None => format!("Team {}", team + 1),
    }
}

/// Re-checks `solution` against every hard rule, then reads it out.
///
/// Fails with `ConsistencyViolation` if the solution breaks a rule.
pub fn extract_schedule(model: &ScheduleModel, solution: &TournamentSolution) -> Result<Schedule> {
    ScheduleValidator::new(model).validate(solution)?;

    let roster = model.roster();
    let mut order: Vec<usize> = (0..solution.game_count()).collect();
    order.sort_by_key(|&g| (solution.day(g), g));

    let games = order
        .into_iter()
        .map(|game| ScheduledGame {
            day: solution.day(game) + 1,
            game: game + 1,
            teams: (0..solution.teams())
                .map(|team| TeamLineup {
                    label: team_label(team),
                    players: solution
                        .team(game, team)
                        .iter()
                        .enumerate()
                        .map(|(position, &player)| LineupEntry {
                            position: roster.position_code(position).to_string(),
                            name: roster.player(player).name.clone(),
                            display_name: roster.display_name(player),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    Ok(Schedule { games })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestFixture;
    use matchforge_core::{BanList, MatchForgeError};

    #[test]
    fn test_extracts_games_in_day_order() {
        let fixture = TestFixture::canonical();
        let schedule = extract_schedule(&fixture.model, &fixture.feasible_solution()).unwrap();

        assert_eq!(schedule.len(), 10);
        let keys: Vec<(usize, usize)> = schedule.iter().map(|g| (g.day, g.game)).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        // Games go to day g % 3, so day 1 holds games 1, 4, 7 and 10.
        let day1: Vec<usize> = schedule.games_on(1).map(|g| g.game).collect();
        assert_eq!(day1, vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_lineups_are_labelled_and_named() {
        let fixture = TestFixture::canonical();
        let schedule = extract_schedule(&fixture.model, &fixture.feasible_solution()).unwrap();
        let first = &schedule.games[0];

        assert_eq!(first.teams.len(), 2);
        assert_eq!(first.teams[0].label, "Team A");
        assert_eq!(first.teams[1].label, "Team B");
        assert_eq!(first.teams[0].players.len(), 5);
        // Game 1 pits T1 against J1.
        assert_eq!(first.teams[0].player_at("T").unwrap().name, "T1");
        assert_eq!(first.teams[1].player_at("J").unwrap().name, "J1");
        assert!(first.teams[0].player_at("T").unwrap().display_name.ends_with("(T1)"));
    }

    #[test]
    fn test_every_non_tier1_player_plays_four_games() {
        let fixture = TestFixture::canonical();
        let schedule = extract_schedule(&fixture.model, &fixture.feasible_solution()).unwrap();

        assert_eq!(schedule.appearances("T1"), 4);
        assert_eq!(schedule.appearances("M3"), 4);
        assert_eq!(schedule.appearances("nobody"), 0);
    }

    #[test]
    fn test_rejects_rule_breaking_solution() {
        let fixture = TestFixture::with_bans(&BanList::new().with_ban(1, "T1"));
        let err = extract_schedule(&fixture.model, &fixture.feasible_solution()).unwrap_err();
        assert!(matches!(err, MatchForgeError::ConsistencyViolation(_)));
    }

    #[test]
    fn test_team_labels() {
        assert_eq!(team_label(0), "Team A");
        assert_eq!(team_label(2), "Team C");
        assert_eq!(team_label(30), "Team 31");
    }

    #[test]
    fn test_display_groups_by_day() {
        let fixture = TestFixture::canonical();
        let schedule = extract_schedule(&fixture.model, &fixture.feasible_solution()).unwrap();
        let text = schedule.to_string();

        assert!(text.starts_with("Day 1\n  Game 1\n"));
        assert_eq!(text.matches("Day ").count(), 3);
        assert_eq!(text.matches("Team A").count(), 10);
    }
}

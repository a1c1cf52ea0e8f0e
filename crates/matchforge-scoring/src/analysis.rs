//! Per-constraint score analysis.
//!
//! Explains a final score rule by rule: how many instances were posted,
//! how many are violated and what they cost.

use std::fmt;

use matchforge_core::{ConstraintRef, HardSoftScore, ScoreLevel};

use crate::assembler::ScheduleModel;
use crate::evaluate::evaluate_full;
use crate::objective::{Objective, ObjectiveBreakdown};
use crate::rules::{HardRule, SoftTerm};
use crate::solution::TournamentSolution;

/// Analysis of one constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSummary {
    pub constraint: ConstraintRef,
    pub level: ScoreLevel,
    /// Instances posted on the model; 0 for an omitted rule.
    pub posted: usize,
    /// Violated instances (true indicators for soft terms).
    pub match_count: usize,
    /// Score impact, as a positive penalty.
    pub penalty: i64,
}

impl ConstraintSummary {
    pub fn name(&self) -> &str {
        &self.constraint.name
    }

    pub fn is_satisfied(&self) -> bool {
        self.match_count == 0
    }
}

/// Score explanation of a schedule.
#[derive(Debug, Clone)]
pub struct ScoreAnalysis {
    pub score: HardSoftScore,
    pub constraints: Vec<ConstraintSummary>,
    pub objective: ObjectiveBreakdown,
}

impl ScoreAnalysis {
    /// Analyzes `solution` by full recalculation.
    pub fn analyze(model: &ScheduleModel, objective: &Objective, solution: &TournamentSolution) -> Self {
        let breakdown = evaluate_full(model, objective, solution);

        let mut constraints: Vec<ConstraintSummary> = HardRule::ALL
            .iter()
            .map(|&rule| {
                let tally = breakdown.rule(rule);
                ConstraintSummary {
                    constraint: rule.constraint_ref(),
                    level: ScoreLevel::Hard,
                    posted: model.posted_instances(rule),
                    match_count: tally.matches,
                    penalty: tally.penalty,
                }
            })
            .collect();

        for term in SoftTerm::ALL {
            let (posted, count) = match term {
                SoftTerm::NeverEnemies => (objective.enemy_indicator_count(), breakdown.never_enemies),
                SoftTerm::NeverAllies => (objective.ally_indicator_count(), breakdown.never_allies),
            };
            constraints.push(ConstraintSummary {
                constraint: term.constraint_ref(),
                level: ScoreLevel::Soft,
                posted,
                match_count: count,
                penalty: count as i64,
            });
        }

        Self {
            score: breakdown.score(),
            constraints,
            objective: ObjectiveBreakdown {
                never_enemies: breakdown.never_enemies,
                never_allies: breakdown.never_allies,
                lower_bound: objective.lower_bound(),
            },
        }
    }

    /// Looks up a constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&ConstraintSummary> {
        self.constraints.iter().find(|c| c.constraint.name == name)
    }

    /// Hard constraints with at least one violation.
    pub fn violated(&self) -> impl Iterator<Item = &ConstraintSummary> {
        self.constraints
            .iter()
            .filter(|c| c.level == ScoreLevel::Hard && !c.is_satisfied())
    }
}

impl fmt::Display for ScoreAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        for c in &self.constraints {
            let level = match c.level {
                ScoreLevel::Hard => "hard",
                ScoreLevel::Soft => "soft",
            };
            writeln!(
                f,
                "  {:<36} {:>4} {:>6} posted {:>5} matches {:>5}",
                c.constraint.name, level, -c.penalty, c.posted, c.match_count
            )?;
        }
        write!(f, "Objective: {}", self.objective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::ModelAssembler;
    use matchforge_core::{BanList, DiagnosticLog, Roster, Score, Tournament};
    use matchforge_test::{canonical_assignment, canonical_roster, indivisible_roster_input};

    #[test]
    fn test_analysis_of_valid_schedule() {
        let mut log = DiagnosticLog::new();
        let model = ModelAssembler::assemble(
            &canonical_roster(),
            &BanList::new(),
            &Tournament::canonical(),
            &mut log,
        )
        .unwrap();
        let objective = Objective::build(&model);
        let raw = canonical_assignment();
        let solution = model.solution(raw.slots, raw.days).unwrap();

        let analysis = ScoreAnalysis::analyze(&model, &objective, &solution);
        assert!(analysis.score.is_feasible());
        assert_eq!(analysis.violated().count(), 0);
        assert_eq!(analysis.constraints.len(), HardRule::COUNT + 2);
        assert_eq!(
            analysis.score.soft(),
            -(analysis.objective.total() as i64)
        );
        assert_eq!(analysis.objective.lower_bound, 90);

        let rr = analysis.constraint("Tier-1 round robin").unwrap();
        assert_eq!(rr.posted, 10);
        assert!(rr.is_satisfied());
        assert!(analysis.to_string().starts_with("Score: 0hard/"));
    }

    #[test]
    fn test_skipped_rule_has_nothing_posted() {
        let roster = Roster::from_input(&indivisible_roster_input()).unwrap();
        let mut log = DiagnosticLog::new();
        let model =
            ModelAssembler::assemble(&roster, &BanList::new(), &Tournament::canonical(), &mut log)
                .unwrap();
        let objective = Objective::build(&model);

        // 24 players: build any domain-respecting schedule
        let mut slots = Vec::new();
        for game in 0..10 {
            for team in 0..2 {
                for position in 0..5 {
                    let pool = roster.players_at(position);
                    slots.push(pool[(game + team) % pool.len()]);
                }
            }
        }
        let solution = model.solution(slots, (0..10).map(|g| g % 3).collect()).unwrap();
        let analysis = ScoreAnalysis::analyze(&model, &objective, &solution);

        let play = analysis
            .constraint("Non-Tier-1 play-count equalization")
            .unwrap();
        assert_eq!(play.posted, 0);
        assert_eq!(play.match_count, 0);
    }
}

//! The zero-matchup objective.
//!
//! For every unordered pair a Never-Enemy indicator, and for every
//! different-position pair that is not two Tier-1 players a Never-Ally
//! indicator. The objective minimises the number of true indicators and
//! forms the soft level of the score.

use matchforge_core::HardSoftScore;

use crate::assembler::{PairKind, ScheduleModel};
use crate::relations::{PairId, RelationMatrix};

/// Indicator eligibility and the counting lower bound.
#[derive(Debug, Clone)]
pub struct Objective {
    ally_eligible: Vec<bool>,
    enemy_indicators: usize,
    ally_indicators: usize,
    enemy_lower_bound: usize,
    ally_lower_bound: usize,
}

impl Objective {
    pub fn build(model: &ScheduleModel) -> Self {
        let roster = model.roster();
        let pairs = model.pairs();

        let ally_eligible: Vec<bool> = pairs
            .iter()
            .map(|(pair, (a, b))| {
                roster.position_of(a) != roster.position_of(b)
                    && model.pair_kind(pair) != PairKind::Tier1
            })
            .collect();
        let enemy_indicators = pairs.len();
        let ally_indicators = ally_eligible.iter().filter(|&&e| e).count();

        // Most distinct pairs one game can relate.
        let t = model.tournament();
        let p = model.positions();
        let k = t.tier1_per_team;
        let team_pairs = t.teams_per_game * t.teams_per_game.saturating_sub(1) / 2;
        let enemies_per_game = team_pairs * p * p;
        let allies_per_game = t.teams_per_game * (choose2(p) - choose2(k.min(p)));

        let enemy_lower_bound = enemy_indicators.saturating_sub(t.game_count * enemies_per_game);
        let ally_lower_bound = ally_indicators.saturating_sub(t.game_count * allies_per_game);

        tracing::debug!(
            enemy_indicators,
            ally_indicators,
            lower_bound = enemy_lower_bound + ally_lower_bound,
            "Objective built"
        );

        Self {
            ally_eligible,
            enemy_indicators,
            ally_indicators,
            enemy_lower_bound,
            ally_lower_bound,
        }
    }

    #[inline]
    pub fn is_ally_eligible(&self, pair: PairId) -> bool {
        self.ally_eligible[pair]
    }

    /// Number of Never-Enemy indicators.
    pub fn enemy_indicator_count(&self) -> usize {
        self.enemy_indicators
    }

    /// Number of Never-Ally indicators.
    pub fn ally_indicator_count(&self) -> usize {
        self.ally_indicators
    }

    /// No feasible schedule leaves fewer true indicators than this.
    pub fn lower_bound(&self) -> usize {
        self.enemy_lower_bound + self.ally_lower_bound
    }

    /// Best score any feasible schedule can reach.
    pub fn lower_bound_score(&self) -> HardSoftScore {
        HardSoftScore::of(0, -(self.lower_bound() as i64))
    }

    /// Soft penalty of one pair given its enemy and ally totals.
    #[inline]
    pub fn pair_penalty(&self, pair: PairId, enemies: u32, allies: u32) -> i64 {
        let never_enemy = (enemies == 0) as i64;
        let never_ally = (self.ally_eligible[pair] && allies == 0) as i64;
        never_enemy + never_ally
    }

    /// Counts the true indicators of a concrete schedule.
    pub fn evaluate(&self, matrix: &RelationMatrix) -> ObjectiveBreakdown {
        let mut never_enemies = 0;
        let mut never_allies = 0;
        for pair in 0..self.ally_eligible.len() {
            if matrix.enemy_count(pair) == 0 {
                never_enemies += 1;
            }
            if self.ally_eligible[pair] && matrix.ally_count(pair) == 0 {
                never_allies += 1;
            }
        }
        ObjectiveBreakdown {
            never_enemies,
            never_allies,
            lower_bound: self.lower_bound(),
        }
    }
}

/// True indicator counts of a schedule, next to the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectiveBreakdown {
    pub never_enemies: usize,
    pub never_allies: usize,
    pub lower_bound: usize,
}

impl ObjectiveBreakdown {
    pub fn total(&self) -> usize {
        self.never_enemies + self.never_allies
    }

    /// True when the objective meets the lower bound.
    pub fn meets_lower_bound(&self) -> bool {
        self.total() <= self.lower_bound
    }
}

impl std::fmt::Display for ObjectiveBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} zero-matchup pairs ({} never enemies, {} never allies; lower bound {})",
            self.total(),
            self.never_enemies,
            self.never_allies,
            self.lower_bound
        )
    }
}

fn choose2(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

//! Configuration system for MatchForge.
//!
//! Load solver configuration from TOML or YAML files to control the
//! tournament shape, termination, phases and acceptors without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use matchforge_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     worker_count = { count = 2 }
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     unimproved_seconds_spent_limit = 5
//!
//!     [tournament]
//!     game_count = 10
//!
//!     [[phases]]
//!     type = "construction_heuristic"
//!     construction_heuristic_type = "round_robin"
//!
//!     [[phases]]
//!     type = "local_search"
//!     [phases.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.phases.len(), 2);
//! assert_eq!(config.worker_count.resolve(), 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use matchforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("matchforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use matchforge_core::{HardSoftScore, ParseableScore, Tournament};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Conventional configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "matchforge.toml";

/// Seed used by reproducible modes when none is configured.
pub const DEFAULT_REPRODUCIBLE_SEED: u64 = 0;

/// Default late acceptance history length.
pub const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;

/// Upper bound for `worker_count = "auto"`.
const MAX_AUTO_WORKERS: usize = 8;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for matchforge_core::MatchForgeError {
    fn from(err: ConfigError) -> Self {
        matchforge_core::MatchForgeError::Config(err.to_string())
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of independent search workers.
    #[serde(default)]
    pub worker_count: WorkerCount,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Shape of the tournament to schedule.
    #[serde(default)]
    pub tournament: Tournament,

    /// Phase configurations. Empty means round-robin construction followed
    /// by late acceptance local search.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot drive a solve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == WorkerCount::Count(0) {
            return Err(ConfigError::Invalid(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if let Some(termination) = &self.termination {
            termination.validate()?;
        }
        for phase in &self.phases {
            match phase {
                PhaseConfig::ConstructionHeuristic(_) => {}
                PhaseConfig::LocalSearch(ls) => ls.validate()?,
            }
        }
        Ok(())
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Replaces the termination configuration.
    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = WorkerCount::Count(count);
        self
    }

    pub fn with_tournament(mut self, tournament: Tournament) -> Self {
        self.tournament = tournament;
        self
    }

    /// Adds a phase configuration.
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Time limit for one solve: the caller's budget, shortened by the
    /// configured limit when that is smaller.
    pub fn effective_time_limit(&self, budget: Duration) -> Duration {
        match self.time_limit() {
            Some(limit) => limit.min(budget),
            None => budget,
        }
    }

    /// Phases to run, falling back to the default pipeline when none are
    /// configured.
    pub fn effective_phases(&self) -> Vec<PhaseConfig> {
        if self.phases.is_empty() {
            vec![
                PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig::default()),
                PhaseConfig::LocalSearch(LocalSearchConfig::default()),
            ]
        } else {
            self.phases.clone()
        }
    }

    /// The configured seed, or a fixed one in reproducible modes.
    pub fn effective_seed(&self) -> Option<u64> {
        match self.random_seed {
            Some(seed) => Some(seed),
            None if self.environment_mode.is_reproducible() => Some(DEFAULT_REPRODUCIBLE_SEED),
            None => None,
        }
    }

    /// Seed for worker `index`, if the run is seeded.
    ///
    /// Workers get distinct seeds derived from the effective one.
    pub fn worker_seed(&self, index: usize) -> Option<u64> {
        self.effective_seed()
            .map(|seed| seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Reproducible mode with deterministic behavior for a fixed seed.
    Reproducible,

    /// Reproducible, and every step's incremental score is checked against
    /// a full recalculation.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_reproducible(&self) -> bool {
        !matches!(self, EnvironmentMode::NonReproducible)
    }

    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Worker count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// One worker per available core, capped.
    #[default]
    Auto,

    /// Specific number of workers.
    Count(usize),
}

impl WorkerCount {
    /// Resolves to a concrete worker count of at least 1.
    pub fn resolve(&self) -> usize {
        match self {
            WorkerCount::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .clamp(1, MAX_AUTO_WORKERS),
            WorkerCount::Count(n) => (*n).max(1),
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Target best score to achieve (as string, e.g., "0hard/-90soft").
    pub best_score_limit: Option<String>,

    /// Maximum number of steps per worker.
    pub step_count_limit: Option<u64>,

    /// Maximum unimproved steps before terminating.
    pub unimproved_step_count_limit: Option<u64>,

    /// Maximum seconds without improvement.
    pub unimproved_seconds_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }

    /// Returns the unimproved time limit as a Duration, if any.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.unimproved_seconds_spent_limit.map(Duration::from_secs)
    }

    /// Parses `best_score_limit`.
    pub fn best_score(&self) -> Result<Option<HardSoftScore>, ConfigError> {
        self.best_score_limit
            .as_deref()
            .map(|s| {
                HardSoftScore::parse(s).map_err(|e| ConfigError::Invalid(e.to_string()))
            })
            .transpose()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.best_score()?;
        if self.step_count_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "step_count_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Phase configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Construction heuristic phase.
    ConstructionHeuristic(ConstructionHeuristicConfig),

    /// Local search phase.
    LocalSearch(LocalSearchConfig),
}

/// Construction heuristic configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    /// Type of construction heuristic.
    #[serde(default)]
    pub construction_heuristic_type: ConstructionHeuristicType,
}

/// Construction heuristic types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicType {
    /// Tier-1 round robin and cyclic pairings of the remaining players.
    #[default]
    RoundRobin,

    /// Uniformly random slot values and days.
    Random,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Acceptor configuration.
    pub acceptor: Option<AcceptorConfig>,

    /// Forager configuration.
    pub forager: Option<ForagerConfig>,

    /// Phase termination configuration.
    pub termination: Option<TerminationConfig>,
}

impl LocalSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(acceptor) = &self.acceptor {
            acceptor.validate()?;
        }
        if let Some(forager) = &self.forager {
            if forager.accepted_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "accepted_count_limit must be positive".to_string(),
                ));
            }
        }
        if let Some(termination) = &self.termination {
            termination.validate()?;
        }
        Ok(())
    }
}

/// Acceptor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Hill climbing (only accept non-worsening moves).
    HillClimbing,

    /// Simulated annealing acceptor.
    SimulatedAnnealing(SimulatedAnnealingConfig),

    /// Late acceptance acceptor.
    LateAcceptance(LateAcceptanceConfig),
}

impl AcceptorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            AcceptorConfig::HillClimbing => Ok(()),
            AcceptorConfig::LateAcceptance(la) => {
                if la.late_acceptance_size == Some(0) {
                    Err(ConfigError::Invalid(
                        "late_acceptance_size must be positive".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            AcceptorConfig::SimulatedAnnealing(sa) => {
                if let Some(t) = sa.starting_temperature {
                    if !(t > 0.0) {
                        return Err(ConfigError::Invalid(format!(
                            "starting_temperature must be positive, got {}",
                            t
                        )));
                    }
                }
                if let Some(d) = sa.decay_rate {
                    if !(d > 0.0 && d <= 1.0) {
                        return Err(ConfigError::Invalid(format!(
                            "decay_rate must be in (0, 1], got {}",
                            d
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Starting temperature in scalar score units.
    pub starting_temperature: Option<f64>,

    /// Per-step multiplicative cooling factor.
    pub decay_rate: Option<f64>,
}

/// Late acceptance configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Size of late acceptance list.
    pub late_acceptance_size: Option<usize>,
}

/// Forager configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ForagerConfig {
    /// Maximum number of accepted moves to consider per step.
    pub accepted_count_limit: Option<usize>,
}

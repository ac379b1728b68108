//! Configuration system for submodmax.
//!
//! Load optimizer configuration from TOML or YAML files to pick an
//! algorithm, its parameters, and the random seed without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use submodmax_config::{AlgorithmConfig, OptimizerConfig};
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [algorithm]
//!     type = "randomized_double_greedy"
//!     n_tries = 25
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! match config.algorithm {
//!     AlgorithmConfig::RandomizedDoubleGreedy(rdgs) => assert_eq!(rdgs.n_tries, Some(25)),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use submodmax_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::load("optimizer.toml").unwrap_or_default();
//! // Proceeds with randomized double greedy search if the file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

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

/// Main optimizer configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Enables verbose step tracing. Never changes results.
    #[serde(default)]
    pub debug: bool,

    /// Algorithm selection and parameters.
    #[serde(default)]
    pub algorithm: AlgorithmConfig,
}

impl OptimizerConfig {
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
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Enables or disables step tracing.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: AlgorithmConfig) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Checks parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for `n_tries < 1`, a negative or
    /// non-finite epsilon, a probability outside `[0, 1]`, or a zero sample
    /// budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.algorithm.validate()
    }
}

/// Algorithm selection.
///
/// Each variant also accepts its short name (`RDGS`, `DDGS`, `DLS`, `SLS`,
/// `random_set`) as the `type` tag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlgorithmConfig {
    /// Deterministic double greedy search (1/3-approximation).
    #[serde(alias = "DDGS")]
    DeterministicDoubleGreedy,

    /// Randomized double greedy search with restarts (1/2-approximation in expectation).
    #[serde(alias = "RDGS")]
    RandomizedDoubleGreedy(RandomizedDoubleGreedyConfig),

    /// Deterministic local search with a relative-improvement threshold.
    #[serde(alias = "DLS")]
    DeterministicLocalSearch(DeterministicLocalSearchConfig),

    /// Smooth local search with Monte-Carlo marginal estimates.
    #[serde(alias = "SLS")]
    SmoothLocalSearch(SmoothLocalSearchConfig),

    /// Uniformly random subset baseline.
    #[serde(alias = "random_set")]
    RandomSubset(RandomSubsetConfig),

    /// Returns the whole ground set.
    GroundSet,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self::RandomizedDoubleGreedy(RandomizedDoubleGreedyConfig::default())
    }
}

impl AlgorithmConfig {
    /// Returns the snake_case name of the selected algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeterministicDoubleGreedy => "deterministic_double_greedy",
            Self::RandomizedDoubleGreedy(_) => "randomized_double_greedy",
            Self::DeterministicLocalSearch(_) => "deterministic_local_search",
            Self::SmoothLocalSearch(_) => "smooth_local_search",
            Self::RandomSubset(_) => "random_subset",
            Self::GroundSet => "ground_set",
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::RandomizedDoubleGreedy(c) => {
                if c.n_tries == Some(0) {
                    return Err(ConfigError::Invalid(
                        "randomized_double_greedy.n_tries must be at least 1".to_string(),
                    ));
                }
            }
            Self::DeterministicLocalSearch(c) => {
                if let Some(epsilon) = c.epsilon {
                    if !epsilon.is_finite() || epsilon < 0.0 {
                        return Err(ConfigError::Invalid(format!(
                            "deterministic_local_search.epsilon must be finite and non-negative, got {epsilon}"
                        )));
                    }
                }
            }
            Self::SmoothLocalSearch(c) => {
                if c.max_samples_per_arm == Some(0) {
                    return Err(ConfigError::Invalid(
                        "smooth_local_search.max_samples_per_arm must be positive".to_string(),
                    ));
                }
            }
            Self::RandomSubset(c) => {
                if let Some(p) = c.probability {
                    if !(0.0..=1.0).contains(&p) {
                        return Err(ConfigError::Invalid(format!(
                            "random_subset.probability must lie in [0, 1], got {p}"
                        )));
                    }
                }
            }
            Self::DeterministicDoubleGreedy | Self::GroundSet => {}
        }
        Ok(())
    }
}

/// Randomized double greedy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RandomizedDoubleGreedyConfig {
    /// Number of independently shuffled passes (default 10).
    pub n_tries: Option<usize>,
}

/// Deterministic local search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeterministicLocalSearchConfig {
    /// Approximation slack (default 0.05).
    pub epsilon: Option<f64>,

    /// Form of the improvement threshold.
    #[serde(default)]
    pub rho: RhoVariant,

    /// Maximum number of accepted add/remove steps.
    pub step_limit: Option<u64>,
}

/// Form of the deterministic local search improvement threshold `rho`,
/// with `n` the ground set size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RhoVariant {
    /// `rho = 1 + epsilon / n²`: a step must improve by a relative margin.
    #[default]
    Standard,

    /// `rho = 0.5 * (1 + epsilon / n²)`, the threshold of the FOCS'07 write-up.
    Halved,
}

impl RhoVariant {
    /// Computes `rho` for the given slack and ground set size.
    pub fn rho(self, epsilon: f64, ground_set_size: usize) -> f64 {
        let n = ground_set_size.max(1) as f64;
        let base = 1.0 + epsilon / (n * n);
        match self {
            Self::Standard => base,
            Self::Halved => 0.5 * base,
        }
    }
}

/// Smooth local search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SmoothLocalSearchConfig {
    /// Cap on samples per arm of one omega estimate (default 10 000).
    pub max_samples_per_arm: Option<usize>,

    /// Lifts the sample cap, sampling until the standard error bound is met.
    #[serde(default)]
    pub unbounded_sampling: bool,

    /// Maximum number of accepted add/remove steps per run.
    pub step_limit: Option<u64>,
}

/// Random subset configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RandomSubsetConfig {
    /// Inclusion probability of each element (default 0.5).
    pub probability: Option<f64>,
}

#[cfg(test)]
mod tests;

//! Builder module for constructing optimizers from configuration
//!
//! This module provides the wiring between configuration types and
//! the optimizer implementations.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use submodmax_config::{AlgorithmConfig, ConfigError, OptimizerConfig};
use submodmax_core::{
    FromScratch, FuncValue, GroundSet, IncrementalObjective, ObjectiveFunction, Result,
    SubmodError,
};

use crate::baseline::{GroundSetReturner, RandomSubsetOptimizer, DEFAULT_PROBABILITY};
use crate::double_greedy::{
    DeterministicDoubleGreedySearch, RandomizedDoubleGreedySearch, DEFAULT_N_TRIES,
};
use crate::local_search::{DeterministicLocalSearch, DEFAULT_EPSILON};
use crate::optimizer::Optimizer;
use crate::smooth_local_search::{SmoothLocalSearch, DEFAULT_MAX_SAMPLES_PER_ARM};

/// A type-erased optimizer.
pub type BoxedOptimizer<'a, E, I> = Box<dyn Optimizer<E, Info = I> + 'a>;

/// Builds optimizers from an [`OptimizerConfig`].
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use submodmax_config::OptimizerConfig;
/// use submodmax_core::{GroundSet, ObjectiveFunction, Result};
/// use submodmax_solver::{Optimizer, OptimizerFactory};
///
/// struct Cardinality;
///
/// impl ObjectiveFunction<u32> for Cardinality {
///     fn evaluate(&self, set: &HashSet<u32>) -> Result<f64> {
///         Ok(set.len() as f64)
///     }
/// }
///
/// let config = OptimizerConfig::from_toml_str(r#"
///     random_seed = 1
///     [algorithm]
///     type = "DDGS"
/// "#).unwrap();
///
/// let factory = OptimizerFactory::new(config);
/// let mut optimizer = factory
///     .build_from_function(Cardinality, GroundSet::new([1, 2, 3]))
///     .unwrap();
/// assert_eq!(optimizer.optimize_set().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptimizerFactory {
    config: OptimizerConfig,
}

impl OptimizerFactory {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Builds the configured optimizer over an incremental objective.
    ///
    /// # Errors
    ///
    /// Returns [`SubmodError::Misconfiguration`] if the configuration fails
    /// validation.
    pub fn build<'a, E, F>(
        &self,
        objective: F,
        ground_set: GroundSet<E>,
    ) -> Result<BoxedOptimizer<'a, E, F::Info>>
    where
        E: Clone + Eq + Hash + Debug + 'a,
        F: IncrementalObjective<E> + 'a,
    {
        self.config.validate().map_err(into_misconfiguration)?;
        let seed = self.config.random_seed;
        let debug = self.config.debug;
        debug!(
            event = "build_optimizer",
            algorithm = self.config.algorithm.name(),
            seed = ?seed,
        );

        let optimizer: BoxedOptimizer<'a, E, F::Info> = match &self.config.algorithm {
            AlgorithmConfig::DeterministicDoubleGreedy => Box::new(
                DeterministicDoubleGreedySearch::new(objective, ground_set).with_debug(debug),
            ),

            AlgorithmConfig::RandomizedDoubleGreedy(c) => {
                let search = match seed {
                    Some(seed) => {
                        RandomizedDoubleGreedySearch::with_seed(objective, ground_set, seed)
                    }
                    None => RandomizedDoubleGreedySearch::new(objective, ground_set),
                };
                Box::new(
                    search
                        .with_n_tries(c.n_tries.unwrap_or(DEFAULT_N_TRIES))
                        .with_debug(debug),
                )
            }

            AlgorithmConfig::DeterministicLocalSearch(c) => Box::new(
                DeterministicLocalSearch::new(objective, ground_set)
                    .with_epsilon(c.epsilon.unwrap_or(DEFAULT_EPSILON))
                    .with_rho_variant(c.rho)
                    .with_step_limit(c.step_limit)
                    .with_debug(debug),
            ),

            AlgorithmConfig::SmoothLocalSearch(c) => {
                let search = match seed {
                    Some(seed) => SmoothLocalSearch::with_seed(objective, ground_set, seed),
                    None => SmoothLocalSearch::new(objective, ground_set),
                };
                let max_samples = if c.unbounded_sampling {
                    None
                } else {
                    Some(c.max_samples_per_arm.unwrap_or(DEFAULT_MAX_SAMPLES_PER_ARM))
                };
                Box::new(
                    search
                        .with_max_samples_per_arm(max_samples)
                        .with_step_limit(c.step_limit)
                        .with_debug(debug),
                )
            }

            AlgorithmConfig::RandomSubset(c) => {
                let optimizer = match seed {
                    Some(seed) => RandomSubsetOptimizer::with_seed(objective, ground_set, seed),
                    None => RandomSubsetOptimizer::new(objective, ground_set),
                };
                Box::new(
                    optimizer
                        .with_probability(c.probability.unwrap_or(DEFAULT_PROBABILITY))
                        .with_debug(debug),
                )
            }

            AlgorithmConfig::GroundSet => {
                Box::new(GroundSetReturner::new(objective, ground_set).with_debug(debug))
            }
        };
        Ok(optimizer)
    }

    /// Builds the configured optimizer over a plain objective.
    pub fn build_from_function<'a, E, O>(
        &self,
        objective: O,
        ground_set: GroundSet<E>,
    ) -> Result<BoxedOptimizer<'a, E, FuncValue>>
    where
        E: Clone + Eq + Hash + Debug + 'a,
        O: ObjectiveFunction<E> + 'a,
    {
        self.build(FromScratch::new(objective), ground_set)
    }
}

fn into_misconfiguration(error: ConfigError) -> SubmodError {
    SubmodError::Misconfiguration(error.to_string())
}

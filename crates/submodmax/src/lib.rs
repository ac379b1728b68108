//! submodmax - Unconstrained Submodular Maximization in Rust
//!
//! Implement [`ObjectiveFunction`] (or [`IncrementalObjective`] to reuse
//! state between evaluations), pick an optimizer, and call `optimize()`.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use submodmax::prelude::*;
//!
//! struct Tutorial;
//!
//! impl ObjectiveFunction<u32> for Tutorial {
//!     fn evaluate(&self, set: &HashSet<u32>) -> Result<f64> {
//!         Ok(match (set.contains(&1), set.contains(&2)) {
//!             (false, false) => 0.0,
//!             (true, false) => -1.0,
//!             (false, true) => 2.0,
//!             (true, true) => 0.0,
//!         })
//!     }
//! }
//!
//! let config = OptimizerConfig::new()
//!     .with_random_seed(42)
//!     .with_algorithm(AlgorithmConfig::DeterministicLocalSearch(Default::default()));
//! let optimum =
//!     submodmax::optimize_with_config(&config, Tutorial, GroundSet::new([1, 2])).unwrap();
//! assert_eq!(optimum.set(), &HashSet::from([2]));
//! ```

// Core types
pub use submodmax_core::{
    FromScratch, FuncInfo, FuncValue, GroundSet, IncrementalObjective, ObjectiveFunction, Result,
    SetDeltaInfo, SubmodError,
};

// Configuration
pub use submodmax_config::{
    AlgorithmConfig, ConfigError, DeterministicLocalSearchConfig, OptimizerConfig,
    RandomSubsetConfig, RandomizedDoubleGreedyConfig, RhoVariant, SmoothLocalSearchConfig,
};

// Optimizers
pub use submodmax_solver::{
    BiasedSample, BiasedSampler, BoxedOptimizer, DecisionStrategy, DeterministicDecision,
    DeterministicDoubleGreedySearch, DeterministicLocalSearch, DoubleGreedySearch,
    GroundSetReturner, Optimizer, OptimizerFactory, Optimum, RandomSubsetOptimizer,
    RandomizedDecision, RandomizedDoubleGreedySearch, SearchStatistics, SmoothLocalSearch,
};

#[cfg(feature = "console")]
pub use submodmax_console as console;

mod run;
pub use run::{optimize, optimize_incremental_with_config, optimize_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        FuncInfo, FuncValue, GroundSet, IncrementalObjective, ObjectiveFunction, Result,
        SetDeltaInfo, SubmodError,
    };
    pub use super::{AlgorithmConfig, OptimizerConfig, RhoVariant};
    pub use super::{
        DeterministicDoubleGreedySearch, DeterministicLocalSearch, Optimizer, OptimizerFactory,
        Optimum, RandomizedDoubleGreedySearch, SmoothLocalSearch,
    };
}

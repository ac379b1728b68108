//! submodmax Solver Engine
//!
//! This crate provides the submodular maximization algorithms:
//! - Double greedy search (deterministic and randomized) with pluggable decision strategies
//! - Deterministic local search
//! - Smooth local search with Monte-Carlo marginal estimates
//! - Random biased set sampling
//! - Baselines (random subset, ground set)
//! - Configuration wiring (builder module)
//!
//! Every optimizer is written against
//! [`IncrementalObjective`](submodmax_core::IncrementalObjective). Plain
//! objectives go through [`FromScratch`](submodmax_core::FromScratch), which
//! each optimizer's `from_function` constructor applies.

pub mod baseline;
pub mod builder;
pub mod decision;
pub mod double_greedy;
pub mod local_search;
pub mod optimizer;
pub mod sampler;
pub mod scope;
pub mod smooth_local_search;
pub mod statistics;

pub use baseline::{GroundSetReturner, RandomSubsetOptimizer, DEFAULT_PROBABILITY};
pub use builder::{BoxedOptimizer, OptimizerFactory};
pub use decision::{DecisionStrategy, DeterministicDecision, RandomizedDecision};
pub use double_greedy::{
    DeterministicDoubleGreedySearch, DoubleGreedySearch, RandomizedDoubleGreedySearch,
    DEFAULT_N_TRIES,
};
pub use local_search::{DeterministicLocalSearch, DEFAULT_EPSILON};
pub use optimizer::{Optimizer, Optimum};
pub use sampler::{BiasedSample, BiasedSampler};
pub use scope::SearchScope;
pub use smooth_local_search::{SmoothLocalSearch, DEFAULT_MAX_SAMPLES_PER_ARM, OMEGA_BATCH_SIZE};
pub use statistics::SearchStatistics;
pub use submodmax_config::RhoVariant;

//! Baseline optimizers.
//!
//! - [`RandomSubsetOptimizer`]: a uniformly random subset `X(p)`. For a
//!   non-negative submodular `f` and `p = 1/2`, `E[f(X(1/2))] >= OPT / 4`.
//! - [`GroundSetReturner`]: the whole ground set.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use submodmax_core::{
    FromScratch, GroundSet, IncrementalObjective, ObjectiveFunction, Result, SubmodError,
};

use crate::optimizer::{Optimizer, Optimum};
use crate::scope::SearchScope;

/// Default inclusion probability of [`RandomSubsetOptimizer`].
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Returns one random subset, evaluated once.
pub struct RandomSubsetOptimizer<E: Eq + Hash, F, R = StdRng> {
    objective: F,
    ground_set: GroundSet<E>,
    probability: f64,
    rng: R,
    debug: bool,
}

impl<E, F> RandomSubsetOptimizer<E, F, StdRng>
where
    E: Clone + Eq + Hash,
{
    pub fn new(objective: F, ground_set: GroundSet<E>) -> Self {
        Self::with_rng(objective, ground_set, StdRng::from_os_rng())
    }

    pub fn with_seed(objective: F, ground_set: GroundSet<E>, seed: u64) -> Self {
        Self::with_rng(objective, ground_set, StdRng::seed_from_u64(seed))
    }
}

impl<E, O> RandomSubsetOptimizer<E, FromScratch<O>, StdRng>
where
    E: Clone + Eq + Hash,
    O: ObjectiveFunction<E>,
{
    /// Wraps a plain objective.
    pub fn from_function(objective: O, ground_set: GroundSet<E>) -> Self {
        Self::new(FromScratch::new(objective), ground_set)
    }
}

impl<E, F, R> RandomSubsetOptimizer<E, F, R>
where
    E: Clone + Eq + Hash,
    R: Rng,
{
    pub fn with_rng(objective: F, ground_set: GroundSet<E>, rng: R) -> Self {
        Self {
            objective,
            ground_set,
            probability: DEFAULT_PROBABILITY,
            rng,
            debug: false,
        }
    }

    /// Sets the inclusion probability. Checked when optimizing.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Draws `X(p)`: each element, in ground-set order, is included iff a
    /// uniform draw from `[0, 1)` is below `probability`.
    pub fn draw<G: Rng>(
        ground_set: &GroundSet<E>,
        probability: f64,
        rng: &mut G,
    ) -> HashSet<E> {
        ground_set
            .iter()
            .filter(|_| rng.random::<f64>() < probability)
            .cloned()
            .collect()
    }
}

impl<E, F, R> Optimizer<E> for RandomSubsetOptimizer<E, F, R>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
    R: Rng,
{
    type Info = F::Info;

    fn optimize(&mut self) -> Result<Optimum<E, F::Info>> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(SubmodError::Misconfiguration(format!(
                "inclusion probability must lie in [0, 1], got {}",
                self.probability
            )));
        }
        let mut scope = SearchScope::start(
            self.algorithm_name(),
            &self.objective,
            &self.ground_set,
            self.debug,
        );
        let set = Self::draw(&self.ground_set, self.probability, &mut self.rng);
        if scope.is_debug() {
            debug!(event = "step", set_size = set.len(), "drew random subset");
        }
        let (set_info, func_info) = scope.evaluate_set(set)?;
        Ok(scope.finish(set_info, func_info))
    }

    fn algorithm_name(&self) -> &'static str {
        "random_subset"
    }
}

/// Returns the whole ground set.
pub struct GroundSetReturner<E: Eq + Hash, F> {
    objective: F,
    ground_set: GroundSet<E>,
    debug: bool,
}

impl<E, F> GroundSetReturner<E, F>
where
    E: Clone + Eq + Hash,
{
    pub fn new(objective: F, ground_set: GroundSet<E>) -> Self {
        Self {
            objective,
            ground_set,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl<E, O> GroundSetReturner<E, FromScratch<O>>
where
    E: Clone + Eq + Hash,
    O: ObjectiveFunction<E>,
{
    /// Wraps a plain objective.
    pub fn from_function(objective: O, ground_set: GroundSet<E>) -> Self {
        Self::new(FromScratch::new(objective), ground_set)
    }
}

impl<E, F> Optimizer<E> for GroundSetReturner<E, F>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
{
    type Info = F::Info;

    fn optimize(&mut self) -> Result<Optimum<E, F::Info>> {
        let mut scope = SearchScope::start(
            self.algorithm_name(),
            &self.objective,
            &self.ground_set,
            self.debug,
        );
        let (set_info, func_info) = scope.evaluate_set(self.ground_set.to_set())?;
        Ok(scope.finish(set_info, func_info))
    }

    fn algorithm_name(&self) -> &'static str {
        "ground_set"
    }
}

//! Double greedy search for unconstrained submodular maximization.
//!
//! Buchbinder, Feldman, Naor and Schwartz, "A tight linear time
//! (1/2)-approximation for unconstrained submodular maximization",
//! SIAM J. Comput. 44(5), 2015.
//!
//! Starts from `X = ∅` and `Y = ground set` and visits every element once.
//! A [`DecisionStrategy`] either adds the element to `X` or removes it from
//! `Y`; after the pass `X = Y` is the answer. With
//! [`DeterministicDecision`] this is a 1/3-approximation, with
//! [`RandomizedDecision`] a 1/2-approximation in expectation.

use std::fmt::Debug;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use submodmax_core::{
    FromScratch, FuncInfo, GroundSet, IncrementalObjective, ObjectiveFunction, Result,
    SetDeltaInfo, SubmodError,
};

use crate::decision::{DecisionStrategy, DeterministicDecision, RandomizedDecision};
use crate::optimizer::{Optimizer, Optimum};
use crate::scope::SearchScope;

/// Default number of restarts of the randomized search.
pub const DEFAULT_N_TRIES: usize = 10;

/// Double greedy search, generic over the decision strategy.
///
/// Each try visits the ground set once, in ground-set order or shuffled.
/// The best try by objective value wins; the earliest one on ties.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use submodmax_core::{GroundSet, ObjectiveFunction, Result};
/// use submodmax_solver::{DeterministicDoubleGreedySearch, Optimizer};
///
/// // f({}) = 0, f({1}) = -1, f({2}) = 2, f({1, 2}) = 0
/// struct Tutorial;
///
/// impl ObjectiveFunction<u32> for Tutorial {
///     fn evaluate(&self, set: &HashSet<u32>) -> Result<f64> {
///         Ok(match (set.contains(&1), set.contains(&2)) {
///             (false, false) => 0.0,
///             (true, false) => -1.0,
///             (false, true) => 2.0,
///             (true, true) => 0.0,
///         })
///     }
/// }
///
/// let mut search = DeterministicDoubleGreedySearch::from_function(Tutorial, GroundSet::new([1, 2]));
/// assert_eq!(search.optimize_set().unwrap(), HashSet::from([2]));
/// ```
pub struct DoubleGreedySearch<E: Eq + Hash, F, D, R = StdRng> {
    objective: F,
    ground_set: GroundSet<E>,
    decision: D,
    rng: R,
    n_tries: usize,
    shuffle: bool,
    debug: bool,
    algorithm: &'static str,
}

/// One pass in ground-set order with `a >= b` decisions.
pub type DeterministicDoubleGreedySearch<E, F> =
    DoubleGreedySearch<E, F, DeterministicDecision, StdRng>;

/// `n_tries` shuffled passes with randomized decisions.
pub type RandomizedDoubleGreedySearch<E, F, R = StdRng> =
    DoubleGreedySearch<E, F, RandomizedDecision, R>;

impl<E, F> DoubleGreedySearch<E, F, DeterministicDecision, StdRng>
where
    E: Clone + Eq + Hash,
{
    pub fn new(objective: F, ground_set: GroundSet<E>) -> Self {
        Self {
            objective,
            ground_set,
            decision: DeterministicDecision,
            // never drawn from
            rng: StdRng::seed_from_u64(0),
            n_tries: 1,
            shuffle: false,
            debug: false,
            algorithm: "deterministic_double_greedy",
        }
    }
}

impl<E, O> DoubleGreedySearch<E, FromScratch<O>, DeterministicDecision, StdRng>
where
    E: Clone + Eq + Hash,
    O: ObjectiveFunction<E>,
{
    /// Wraps a plain objective.
    pub fn from_function(objective: O, ground_set: GroundSet<E>) -> Self {
        Self::new(FromScratch::new(objective), ground_set)
    }
}

impl<E, F> DoubleGreedySearch<E, F, RandomizedDecision, StdRng>
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

impl<E, O> DoubleGreedySearch<E, FromScratch<O>, RandomizedDecision, StdRng>
where
    E: Clone + Eq + Hash,
    O: ObjectiveFunction<E>,
{
    /// Wraps a plain objective.
    pub fn from_function(objective: O, ground_set: GroundSet<E>) -> Self {
        Self::new(FromScratch::new(objective), ground_set)
    }
}

impl<E, F, R> DoubleGreedySearch<E, F, RandomizedDecision, R>
where
    E: Clone + Eq + Hash,
    R: Rng,
{
    pub fn with_rng(objective: F, ground_set: GroundSet<E>, rng: R) -> Self {
        Self {
            objective,
            ground_set,
            decision: RandomizedDecision,
            rng,
            n_tries: DEFAULT_N_TRIES,
            shuffle: true,
            debug: false,
            algorithm: "randomized_double_greedy",
        }
    }

    /// Sets the number of restarts. Must be at least 1 when optimizing.
    pub fn with_n_tries(mut self, n_tries: usize) -> Self {
        self.n_tries = n_tries;
        self
    }
}

impl<E, F, D, R> DoubleGreedySearch<E, F, D, R>
where
    E: Clone + Eq + Hash,
{
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn n_tries(&self) -> usize {
        self.n_tries
    }

    pub fn ground_set(&self) -> &GroundSet<E> {
        &self.ground_set
    }
}

impl<E, F, D, R> Optimizer<E> for DoubleGreedySearch<E, F, D, R>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
    D: DecisionStrategy,
    R: Rng,
{
    type Info = F::Info;

    fn optimize(&mut self) -> Result<Optimum<E, F::Info>> {
        if self.n_tries == 0 {
            return Err(SubmodError::Misconfiguration(
                "double greedy search needs at least one try".to_string(),
            ));
        }

        let mut scope =
            SearchScope::start(self.algorithm, &self.objective, &self.ground_set, self.debug);
        let mut order: Vec<E> = self.ground_set.elements().to_vec();
        let mut best: Option<(SetDeltaInfo<E>, F::Info)> = None;

        for try_index in 0..self.n_tries {
            if self.shuffle {
                order.shuffle(&mut self.rng);
            }
            let (set_info, func_info) =
                double_greedy_pass(&mut scope, &order, &self.decision, &mut self.rng)?;
            scope.record_try();

            let value = func_info.func_value();
            let improved = match &best {
                None => true,
                Some((_, best_info)) => value > best_info.func_value(),
            };
            if self.n_tries > 1 {
                info!(
                    event = "try_end",
                    algorithm = self.algorithm,
                    try_index,
                    value,
                    set_size = set_info.current_set_size(),
                    improved,
                );
            }
            if improved {
                best = Some((set_info, func_info));
            }
        }

        let Some((set_info, func_info)) = best else {
            return Err(SubmodError::InvariantViolation(
                "double greedy search finished without a result".to_string(),
            ));
        };
        Ok(scope.finish(set_info, func_info))
    }

    fn algorithm_name(&self) -> &'static str {
        self.algorithm
    }
}

/// Runs one pass over `order` and returns the converged set.
fn double_greedy_pass<E, F, D, R>(
    scope: &mut SearchScope<'_, E, F>,
    order: &[E],
    decision: &D,
    rng: &mut R,
) -> Result<(SetDeltaInfo<E>, F::Info)>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
    D: DecisionStrategy,
    R: Rng,
{
    let n = scope.n();
    let mut x = SetDeltaInfo::empty(n);
    let mut y = SetDeltaInfo::from_scratch(n, scope.ground_set().to_set());
    let mut f_x = scope.evaluate(&x, None)?;
    let mut f_y = scope.evaluate(&y, None)?;

    for (i, elem) in order.iter().enumerate() {
        let x_plus = x.with_added(elem.clone());
        let f_x_plus = scope.evaluate(&x_plus, Some(&f_x))?;
        let a = f_x_plus.func_value() - f_x.func_value();

        let y_minus = y.with_removed(elem.clone());
        let f_y_minus = scope.evaluate(&y_minus, Some(&f_y))?;
        let b = f_y_minus.func_value() - f_y.func_value();

        let update_x = decision.should_update_x(a, b, rng);
        if scope.is_debug() {
            debug!(
                event = "step",
                step = i + 1,
                element = ?elem,
                a,
                b,
                update_x,
                x_value = f_x_plus.func_value(),
                y_value = f_y_minus.func_value(),
            );
        }
        if update_x {
            x = x_plus;
            f_x = f_x_plus;
            scope.record_addition();
        } else {
            y = y_minus;
            f_y = f_y_minus;
            scope.record_removal();
        }
    }

    if x.current_set() != y.current_set() {
        return Err(SubmodError::InvariantViolation(format!(
            "double greedy ended with X ({} elements) != Y ({} elements)",
            x.current_set_size(),
            y.current_set_size()
        )));
    }
    Ok((x, f_x))
}

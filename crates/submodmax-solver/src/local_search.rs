//! Deterministic local search.
//!
//! Feige, Mirrokni and Vondrák, "Maximizing non-monotone submodular
//! functions", FOCS 2007.
//!
//! Starting from the best singleton, repeatedly add the first element (in
//! ground-set order) whose addition beats `rho · f(S)`, otherwise remove the
//! first member whose removal does, until neither move exists. The better of
//! the local optimum `S` and its complement `X - S` is returned, which makes
//! this a `(1/3 - ε/n)`-approximation for non-negative submodular `f`.
//!
//! The threshold `rho · f(S)` only demands an improvement while `f(S) > 0`
//! and `rho > 1`. With the [`RhoVariant::Halved`] threshold, or with a
//! negative `f(S)`, moves may lower the value and the search can cycle; set
//! a step limit in those cases.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use submodmax_config::RhoVariant;
use submodmax_core::{
    FromScratch, FuncInfo, GroundSet, IncrementalObjective, ObjectiveFunction, Result,
    SetDeltaInfo, SubmodError,
};

use crate::optimizer::{Optimizer, Optimum};
use crate::scope::SearchScope;

/// Default approximation slack.
pub const DEFAULT_EPSILON: f64 = 0.05;

/// Single-element move of a local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Move {
    Add,
    Remove,
}

/// Deterministic local search with a relative-improvement threshold.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use submodmax_core::{GroundSet, ObjectiveFunction, Result};
/// use submodmax_solver::{DeterministicLocalSearch, Optimizer};
///
/// // cut weight of a path 0 - 1 - 2
/// struct PathCut;
///
/// impl ObjectiveFunction<u8> for PathCut {
///     fn evaluate(&self, set: &HashSet<u8>) -> Result<f64> {
///         let crosses = |a: u8, b: u8| set.contains(&a) != set.contains(&b);
///         Ok(crosses(0, 1) as u8 as f64 + crosses(1, 2) as u8 as f64)
///     }
/// }
///
/// let mut search = DeterministicLocalSearch::from_function(PathCut, GroundSet::new([0, 1, 2]));
/// let optimum = search.optimize().unwrap();
/// assert_eq!(optimum.value(), 2.0);
/// ```
pub struct DeterministicLocalSearch<E: Eq + Hash, F> {
    objective: F,
    ground_set: GroundSet<E>,
    epsilon: f64,
    rho_variant: RhoVariant,
    step_limit: Option<u64>,
    debug: bool,
}

impl<E, F> DeterministicLocalSearch<E, F>
where
    E: Clone + Eq + Hash,
{
    pub fn new(objective: F, ground_set: GroundSet<E>) -> Self {
        Self {
            objective,
            ground_set,
            epsilon: DEFAULT_EPSILON,
            rho_variant: RhoVariant::Standard,
            step_limit: None,
            debug: false,
        }
    }

    /// Sets the approximation slack. Checked when optimizing.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_rho_variant(mut self, rho_variant: RhoVariant) -> Self {
        self.rho_variant = rho_variant;
        self
    }

    /// Caps the number of accepted add/remove steps.
    pub fn with_step_limit(mut self, step_limit: Option<u64>) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The improvement factor for the current ground set.
    pub fn rho(&self) -> f64 {
        self.rho_variant.rho(self.epsilon, self.ground_set.len())
    }
}

impl<E, O> DeterministicLocalSearch<E, FromScratch<O>>
where
    E: Clone + Eq + Hash,
    O: ObjectiveFunction<E>,
{
    /// Wraps a plain objective.
    pub fn from_function(objective: O, ground_set: GroundSet<E>) -> Self {
        Self::new(FromScratch::new(objective), ground_set)
    }
}

impl<E, F> Optimizer<E> for DeterministicLocalSearch<E, F>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
{
    type Info = F::Info;

    fn optimize(&mut self) -> Result<Optimum<E, F::Info>> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(SubmodError::Misconfiguration(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        let rho = self.rho();
        let mut scope = SearchScope::start(
            self.algorithm_name(),
            &self.objective,
            &self.ground_set,
            self.debug,
        );

        let (mut current, mut f_current) = best_singleton(&mut scope)?;
        let mut steps: u64 = 0;

        loop {
            if let Some(limit) = self.step_limit {
                if steps >= limit {
                    warn!(
                        event = "step_limit_reached",
                        algorithm = scope.algorithm(),
                        step_limit = limit,
                    );
                    break;
                }
            }

            let threshold = rho * f_current.func_value();
            let outside: Vec<E> = self
                .ground_set
                .iter()
                .filter(|e| !current.current_set().contains(*e))
                .cloned()
                .collect();
            let added = first_improvement(
                &mut scope,
                &current,
                &f_current,
                &outside,
                Move::Add,
                threshold,
            )?;
            let next = match added {
                Some(next) => Some(next),
                None => {
                    let inside: Vec<E> = self
                        .ground_set
                        .ordered_members(current.current_set())
                        .cloned()
                        .collect();
                    first_improvement(
                        &mut scope,
                        &current,
                        &f_current,
                        &inside,
                        Move::Remove,
                        threshold,
                    )?
                }
            };

            let Some((next, f_next)) = next else {
                break;
            };
            current = next;
            f_current = f_next;
            steps += 1;
        }

        let complement = self.ground_set.complement(current.current_set());
        let (complement_info, f_complement) = scope.evaluate_set(complement)?;
        if scope.is_debug() {
            debug!(
                event = "step",
                local_optimum_value = f_current.func_value(),
                complement_value = f_complement.func_value(),
                "comparing local optimum with its complement"
            );
        }
        if f_complement.func_value() > f_current.func_value() {
            Ok(scope.finish(complement_info, f_complement))
        } else {
            Ok(scope.finish(current, f_current))
        }
    }

    fn algorithm_name(&self) -> &'static str {
        "deterministic_local_search"
    }
}

/// Evaluates every singleton and keeps the first one with the highest
/// defined value.
fn best_singleton<E, F>(scope: &mut SearchScope<'_, E, F>) -> Result<(SetDeltaInfo<E>, F::Info)>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
{
    let mut best: Option<(SetDeltaInfo<E>, F::Info)> = None;
    for elem in scope.ground_set().iter() {
        let (info, value) = scope.evaluate_set([elem.clone()].into_iter().collect())?;
        if value.func_value().is_nan() {
            continue;
        }
        let better = match &best {
            None => true,
            Some((_, best_value)) => value.func_value() > best_value.func_value(),
        };
        if better {
            best = Some((info, value));
        }
    }
    best.ok_or(SubmodError::NoFeasibleSingleton)
}

/// Returns the first candidate move whose value beats `threshold`.
fn first_improvement<E, F>(
    scope: &mut SearchScope<'_, E, F>,
    current: &SetDeltaInfo<E>,
    f_current: &F::Info,
    candidates: &[E],
    kind: Move,
    threshold: f64,
) -> Result<Option<(SetDeltaInfo<E>, F::Info)>>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
{
    for elem in candidates {
        let candidate = match kind {
            Move::Add => current.with_added(elem.clone()),
            Move::Remove => current.with_removed(elem.clone()),
        };
        let value = scope.evaluate(&candidate, Some(f_current))?;
        if value.func_value() > threshold {
            match kind {
                Move::Add => scope.record_addition(),
                Move::Remove => scope.record_removal(),
            }
            if scope.is_debug() {
                debug!(
                    event = "step",
                    kind = ?kind,
                    element = ?elem,
                    value = value.func_value(),
                    threshold,
                    set_size = candidate.current_set_size(),
                );
            }
            return Ok(Some((candidate, value)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests;

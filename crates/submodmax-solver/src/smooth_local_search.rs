//! Smooth local search.
//!
//! Feige, Mirrokni and Vondrák, "Maximizing non-monotone submodular
//! functions", FOCS 2007.
//!
//! Local search on a smoothed objective: the value of adding or removing an
//! element `e` is judged by its expected marginal contribution
//!
//! ```text
//! omega(e) = E[f(R ∪ {e})] - E[f(R - {e})],   R = R_A(δ)
//! ```
//!
//! over random sets biased toward the current solution `A`, estimated by
//! Monte-Carlo sampling. The local optimum is then turned into the answer by
//! one more biased sample with bias `δ'`.
//!
//! Two runs are made, with `(δ, δ') = (1/3, 1/3)` and `(1/3, -1)`, and the
//! better sample wins (the first on ties).
//!
//! The thresholds `2/n² · OPT` and `1/n² · OPT` use an `OPT` estimated from
//! a single uniformly random subset. A non-positive estimate makes the
//! standard error bound unreachable; the per-arm sample budget then ends
//! every estimate. As with every local search, termination relies on the
//! objective being submodular; a step limit caps runaway searches.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use submodmax_core::{
    FromScratch, FuncInfo, GroundSet, IncrementalObjective, ObjectiveFunction, Result,
    SetDeltaInfo, SubmodError,
};

use crate::baseline::RandomSubsetOptimizer;
use crate::local_search::Move;
use crate::optimizer::{Optimizer, Optimum};
use crate::sampler::BiasedSampler;
use crate::scope::SearchScope;

/// Default cap on the samples per arm of one omega estimate.
pub const DEFAULT_MAX_SAMPLES_PER_ARM: usize = 10_000;

/// Samples drawn per arm before the standard error is re-checked.
pub const OMEGA_BATCH_SIZE: usize = 10;

/// `(δ, δ')` pairs of the two runs.
const RUNS: [(f64, f64); 2] = [(1.0 / 3.0, 1.0 / 3.0), (1.0 / 3.0, -1.0)];

/// Inclusion probability of the subset that estimates `OPT`.
const OPT_ESTIMATE_PROBABILITY: f64 = 0.5;

/// Smooth local search with Monte-Carlo marginal estimates.
pub struct SmoothLocalSearch<E: Eq + Hash, F, R = StdRng> {
    objective: F,
    ground_set: GroundSet<E>,
    sampler: BiasedSampler<R>,
    max_samples_per_arm: Option<usize>,
    step_limit: Option<u64>,
    debug: bool,
}

impl<E, F> SmoothLocalSearch<E, F, StdRng>
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

impl<E, O> SmoothLocalSearch<E, FromScratch<O>, StdRng>
where
    E: Clone + Eq + Hash,
    O: ObjectiveFunction<E>,
{
    /// Wraps a plain objective.
    pub fn from_function(objective: O, ground_set: GroundSet<E>) -> Self {
        Self::new(FromScratch::new(objective), ground_set)
    }
}

impl<E, F, R> SmoothLocalSearch<E, F, R>
where
    E: Clone + Eq + Hash,
    R: Rng,
{
    pub fn with_rng(objective: F, ground_set: GroundSet<E>, rng: R) -> Self {
        Self {
            objective,
            ground_set,
            sampler: BiasedSampler::with_rng(rng),
            max_samples_per_arm: Some(DEFAULT_MAX_SAMPLES_PER_ARM),
            step_limit: None,
            debug: false,
        }
    }

    /// Caps the samples per arm of one omega estimate; `None` samples until
    /// the standard error bound is met.
    pub fn with_max_samples_per_arm(mut self, max_samples_per_arm: Option<usize>) -> Self {
        self.max_samples_per_arm = max_samples_per_arm;
        self
    }

    /// Caps the accepted add/remove steps of each run.
    pub fn with_step_limit(mut self, step_limit: Option<u64>) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl<E, F, R> Optimizer<E> for SmoothLocalSearch<E, F, R>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
    R: Rng,
{
    type Info = F::Info;

    fn optimize(&mut self) -> Result<Optimum<E, F::Info>> {
        if self.max_samples_per_arm == Some(0) {
            return Err(SubmodError::Misconfiguration(
                "max_samples_per_arm must be positive".to_string(),
            ));
        }
        let mut scope = SearchScope::start(
            self.algorithm_name(),
            &self.objective,
            &self.ground_set,
            self.debug,
        );
        if self.ground_set.is_empty() {
            let (set_info, func_info) = scope.evaluate_set(HashSet::new())?;
            return Ok(scope.finish(set_info, func_info));
        }

        let limits = Limits {
            max_samples_per_arm: self.max_samples_per_arm,
            step_limit: self.step_limit,
        };
        let mut best: Option<(SetDeltaInfo<E>, F::Info)> = None;
        for (run, (delta, delta_prime)) in RUNS.into_iter().enumerate() {
            let (set_info, func_info) =
                smooth_run(&mut scope, &mut self.sampler, delta, delta_prime, limits)?;
            scope.record_try();

            let value = func_info.func_value();
            let improved = match &best {
                None => true,
                Some((_, best_info)) => value > best_info.func_value(),
            };
            info!(
                event = "try_end",
                algorithm = scope.algorithm(),
                try_index = run,
                delta,
                delta_prime,
                value,
                set_size = set_info.current_set_size(),
                improved,
            );
            if improved {
                best = Some((set_info, func_info));
            }
        }

        let Some((set_info, func_info)) = best else {
            return Err(SubmodError::InvariantViolation(
                "smooth local search finished without a result".to_string(),
            ));
        };
        Ok(scope.finish(set_info, func_info))
    }

    fn algorithm_name(&self) -> &'static str {
        "smooth_local_search"
    }
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    max_samples_per_arm: Option<usize>,
    step_limit: Option<u64>,
}

/// Running mean and population variance (Welford).
#[derive(Debug, Clone, Copy, Default)]
struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }
}

/// Omega estimate of one element.
struct OmegaEstimate {
    omega: f64,
    budget_exhausted: bool,
}

/// One smooth local search run for a `(δ, δ')` pair.
fn smooth_run<E, F, R>(
    scope: &mut SearchScope<'_, E, F>,
    sampler: &mut BiasedSampler<R>,
    delta: f64,
    delta_prime: f64,
    limits: Limits,
) -> Result<(SetDeltaInfo<E>, F::Info)>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
    R: Rng,
{
    let ground = scope.ground_set();
    let n = ground.len();
    let n_squared = (n * n) as f64;

    let opt_sample = RandomSubsetOptimizer::<E, F, R>::draw(
        ground,
        OPT_ESTIMATE_PROBABILITY,
        sampler.rng_mut(),
    );
    let (_, opt_info) = scope.evaluate_set(opt_sample)?;
    let opt = opt_info.func_value();
    let omega_threshold = 2.0 / n_squared * opt;
    let error_bound = opt / n_squared;
    if opt <= 0.0 || opt.is_nan() {
        warn!(
            event = "non_positive_opt_estimate",
            algorithm = scope.algorithm(),
            opt,
        );
    }
    if scope.is_debug() {
        debug!(event = "step", delta, opt, omega_threshold, error_bound, "estimated optimum");
    }

    let (mut current, mut f_current) = scope.evaluate_set(HashSet::new())?;
    let mut steps: u64 = 0;
    let mut exhausted_estimates: u64 = 0;

    loop {
        if let Some(limit) = limits.step_limit {
            if steps >= limit {
                warn!(
                    event = "step_limit_reached",
                    algorithm = scope.algorithm(),
                    step_limit = limit,
                );
                break;
            }
        }

        let mut chosen: Option<(Move, E)> = None;
        let outside: Vec<E> = ground
            .iter()
            .filter(|e| !current.current_set().contains(*e))
            .cloned()
            .collect();
        for elem in outside {
            let estimate = estimate_omega(
                scope, sampler, &current, &f_current, &elem, delta, error_bound, limits,
            )?;
            exhausted_estimates += u64::from(estimate.budget_exhausted);
            if estimate.omega > omega_threshold {
                chosen = Some((Move::Add, elem));
                break;
            }
        }
        if chosen.is_none() {
            let inside: Vec<E> = ground.ordered_members(current.current_set()).cloned().collect();
            for elem in inside {
                let estimate = estimate_omega(
                    scope, sampler, &current, &f_current, &elem, delta, error_bound, limits,
                )?;
                exhausted_estimates += u64::from(estimate.budget_exhausted);
                if estimate.omega < -omega_threshold {
                    chosen = Some((Move::Remove, elem));
                    break;
                }
            }
        }

        let Some((kind, elem)) = chosen else {
            break;
        };
        let next = match kind {
            Move::Add => current.with_added(elem.clone()),
            Move::Remove => current.with_removed(elem.clone()),
        };
        let f_next = scope.evaluate(&next, Some(&f_current))?;
        match kind {
            Move::Add => scope.record_addition(),
            Move::Remove => scope.record_removal(),
        }
        if scope.is_debug() {
            debug!(
                event = "step",
                kind = ?kind,
                element = ?elem,
                set_size = next.current_set_size(),
            );
        }
        current = next;
        f_current = f_next;
        steps += 1;
    }

    if exhausted_estimates > 0 {
        warn!(
            event = "omega_sample_budget_exhausted",
            algorithm = scope.algorithm(),
            estimates = exhausted_estimates,
            max_samples_per_arm = ?limits.max_samples_per_arm,
            error_bound,
            "omega estimates were truncated by the sample budget, not converged to the error bound"
        );
    }
    if current.current_set().is_empty() {
        warn!(
            event = "empty_final_set",
            algorithm = scope.algorithm(),
            delta_prime,
            "the set the final sample is biased toward is empty"
        );
    }

    let sample = sampler.sample_extended(current.current_set(), ground, delta_prime)?;
    let result = SetDeltaInfo::from_sample(n, current.current_set(), sample.added, sample.removed);
    let f_result = scope.evaluate(&result, Some(&f_current))?;
    Ok((result, f_result))
}

/// Estimates `omega(elem)` around `current` until the standard error of the
/// difference of means is at most `error_bound` or the budget runs out.
///
/// Both sample series grow by [`OMEGA_BATCH_SIZE`] per round and are never
/// reset within one call.
#[allow(clippy::too_many_arguments)]
fn estimate_omega<E, F, R>(
    scope: &mut SearchScope<'_, E, F>,
    sampler: &mut BiasedSampler<R>,
    current: &SetDeltaInfo<E>,
    f_current: &F::Info,
    elem: &E,
    delta: f64,
    error_bound: f64,
    limits: Limits,
) -> Result<OmegaEstimate>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
    R: Rng,
{
    let ground = scope.ground_set();
    let reference = current.current_set();
    let in_reference = reference.contains(elem);
    let mut include = RunningMoments::default();
    let mut exclude = RunningMoments::default();

    loop {
        for _ in 0..OMEGA_BATCH_SIZE {
            let mut sample = sampler.sample_extended(reference, ground, delta)?;
            if in_reference {
                sample.removed.remove(elem);
            } else {
                sample.added.insert(elem.clone());
            }
            let info =
                SetDeltaInfo::from_sample(ground.len(), reference, sample.added, sample.removed);
            include.push(scope.evaluate(&info, Some(f_current))?.func_value());
        }
        for _ in 0..OMEGA_BATCH_SIZE {
            let mut sample = sampler.sample_extended(reference, ground, delta)?;
            if in_reference {
                sample.removed.insert(elem.clone());
            } else {
                sample.added.remove(elem);
            }
            let info =
                SetDeltaInfo::from_sample(ground.len(), reference, sample.added, sample.removed);
            exclude.push(scope.evaluate(&info, Some(f_current))?.func_value());
        }
        scope.record_omega_samples(2 * OMEGA_BATCH_SIZE as u64);

        let standard_error = (include.variance() / include.count as f64
            + exclude.variance() / exclude.count as f64)
            .sqrt();
        if scope.is_debug() {
            trace!(
                event = "omega_batch",
                element = ?elem,
                samples_per_arm = include.count,
                standard_error,
                error_bound,
            );
        }
        if standard_error <= error_bound {
            return Ok(OmegaEstimate {
                omega: include.mean - exclude.mean,
                budget_exhausted: false,
            });
        }
        if let Some(max) = limits.max_samples_per_arm {
            if include.count >= max {
                scope.record_truncated_omega_estimate();
                return Ok(OmegaEstimate {
                    omega: include.mean - exclude.mean,
                    budget_exhausted: true,
                });
            }
        }
    }
}

//! The optimizer contract and its result type.

use std::collections::HashSet;
use std::hash::Hash;

use submodmax_core::{FuncInfo, Result, SetDeltaInfo};

use crate::statistics::SearchStatistics;

/// A submodular maximization algorithm bound to an objective and ground set.
///
/// `optimize` takes `&mut self` because randomized algorithms advance their
/// random generator; calling it again continues the random stream.
pub trait Optimizer<E: Eq + Hash> {
    /// Info type produced by the objective.
    type Info: FuncInfo;

    /// Runs the algorithm and returns the chosen subset with its value.
    fn optimize(&mut self) -> Result<Optimum<E, Self::Info>>;

    /// Runs the algorithm and returns only the chosen subset.
    fn optimize_set(&mut self) -> Result<HashSet<E>>
    where
        E: Clone,
    {
        self.optimize().map(Optimum::into_set)
    }

    /// Returns the snake_case algorithm name used in log events.
    fn algorithm_name(&self) -> &'static str;
}

impl<E, O> Optimizer<E> for Box<O>
where
    E: Eq + Hash,
    O: Optimizer<E> + ?Sized,
{
    type Info = O::Info;

    fn optimize(&mut self) -> Result<Optimum<E, Self::Info>> {
        (**self).optimize()
    }

    fn algorithm_name(&self) -> &'static str {
        (**self).algorithm_name()
    }
}

/// Result of an optimizer run.
///
/// The set info is the delta record of the final evaluation, so its
/// `added`/`removed` describe the last transition the algorithm made.
#[derive(Debug, Clone)]
pub struct Optimum<E: Eq + Hash, I> {
    set_info: SetDeltaInfo<E>,
    func_info: I,
    statistics: SearchStatistics,
}

impl<E, I> Optimum<E, I>
where
    E: Clone + Eq + Hash,
    I: FuncInfo,
{
    pub fn new(set_info: SetDeltaInfo<E>, func_info: I, statistics: SearchStatistics) -> Self {
        Self {
            set_info,
            func_info,
            statistics,
        }
    }

    /// The chosen subset.
    pub fn set(&self) -> &HashSet<E> {
        self.set_info.current_set()
    }

    /// Objective value of the chosen subset.
    pub fn value(&self) -> f64 {
        self.func_info.func_value()
    }

    pub fn set_info(&self) -> &SetDeltaInfo<E> {
        &self.set_info
    }

    pub fn func_info(&self) -> &I {
        &self.func_info
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    pub fn into_set(self) -> HashSet<E> {
        self.set_info.into_current_set()
    }

    /// Splits into the final set info and func info.
    pub fn into_parts(self) -> (SetDeltaInfo<E>, I) {
        (self.set_info, self.func_info)
    }
}

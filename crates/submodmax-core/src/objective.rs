//! Objective function contracts.
//!
//! Two shapes exist:
//! - [`ObjectiveFunction`]: evaluates a plain set.
//! - [`IncrementalObjective`]: evaluates a [`SetDeltaInfo`], optionally
//!   reusing the [`FuncInfo`] of the previously evaluated set.
//!
//! Optimizers are written once, against [`IncrementalObjective`]. A plain
//! objective is lifted with [`FromScratch`], which ignores the delta hints
//! and always evaluates the materialized current set.
//!
//! Callers are responsible for supplying a function with the mathematical
//! properties an algorithm relies on (non-negativity, submodularity). A
//! function that is not submodular can stall the local-search algorithms.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Result;
use crate::set_info::SetDeltaInfo;

/// A set function evaluated from scratch.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use submodmax_core::{ObjectiveFunction, Result};
///
/// struct Cardinality;
///
/// impl ObjectiveFunction<u32> for Cardinality {
///     fn evaluate(&self, set: &HashSet<u32>) -> Result<f64> {
///         Ok(set.len() as f64)
///     }
/// }
///
/// assert_eq!(Cardinality.evaluate(&HashSet::from([1, 2])).unwrap(), 2.0);
/// ```
pub trait ObjectiveFunction<E> {
    /// Evaluates the function on `set`.
    ///
    /// A NaN result marks the value as undefined.
    ///
    /// # Errors
    ///
    /// Implementations may return [`SubmodError::Evaluation`](crate::SubmodError::Evaluation)
    /// for elements outside the ground set. Validation is optional.
    fn evaluate(&self, set: &HashSet<E>) -> Result<f64>;
}

impl<E, F> ObjectiveFunction<E> for &F
where
    F: ObjectiveFunction<E> + ?Sized,
{
    fn evaluate(&self, set: &HashSet<E>) -> Result<f64> {
        (**self).evaluate(set)
    }
}

/// Value of a set plus whatever private state an incremental objective carries.
///
/// Optimizers only ever read [`func_value`](FuncInfo::func_value).
pub trait FuncInfo: Clone + Debug {
    /// Returns the objective value.
    fn func_value(&self) -> f64;
}

/// A bare function value without incremental state.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuncValue(pub f64);

impl FuncInfo for FuncValue {
    fn func_value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for FuncValue {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// A set function evaluated from a delta against the previous evaluation.
pub trait IncrementalObjective<E: Eq + Hash> {
    /// Value plus reusable state.
    type Info: FuncInfo;

    /// Evaluates the set described by `current`.
    ///
    /// `previous` is the info of the set `current` was derived from. When it
    /// is `None` the value must be computed from scratch. Implementations may
    /// always ignore the hints; the only contract is a correct value for
    /// `current.current_set()`.
    fn evaluate(
        &self,
        current: &SetDeltaInfo<E>,
        previous: Option<&Self::Info>,
    ) -> Result<Self::Info>;
}

impl<E, F> IncrementalObjective<E> for &F
where
    E: Eq + Hash,
    F: IncrementalObjective<E> + ?Sized,
{
    type Info = F::Info;

    fn evaluate(
        &self,
        current: &SetDeltaInfo<E>,
        previous: Option<&Self::Info>,
    ) -> Result<Self::Info> {
        (**self).evaluate(current, previous)
    }
}

/// Lifts an [`ObjectiveFunction`] into an [`IncrementalObjective`] that
/// always recomputes from the materialized current set.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use submodmax_core::{
///     FromScratch, FuncInfo, IncrementalObjective, ObjectiveFunction, Result, SetDeltaInfo,
/// };
///
/// struct Cardinality;
///
/// impl ObjectiveFunction<u32> for Cardinality {
///     fn evaluate(&self, set: &HashSet<u32>) -> Result<f64> {
///         Ok(set.len() as f64)
///     }
/// }
///
/// let lifted = FromScratch::new(Cardinality);
/// let info = SetDeltaInfo::from_scratch(3, HashSet::from([0])).with_added(1);
/// assert_eq!(lifted.evaluate(&info, None).unwrap().func_value(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FromScratch<F> {
    inner: F,
}

impl<F> FromScratch<F> {
    /// Wraps a plain objective.
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    /// Returns the wrapped objective.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Unwraps the plain objective.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<E, F> IncrementalObjective<E> for FromScratch<F>
where
    E: Clone + Eq + Hash,
    F: ObjectiveFunction<E>,
{
    type Info = FuncValue;

    fn evaluate(
        &self,
        current: &SetDeltaInfo<E>,
        _previous: Option<&FuncValue>,
    ) -> Result<FuncValue> {
        self.inner.evaluate(current.current_set()).map(FuncValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmodError;

    struct Sum;

    impl ObjectiveFunction<i32> for Sum {
        fn evaluate(&self, set: &HashSet<i32>) -> Result<f64> {
            if set.iter().any(|e| *e < 0) {
                return Err(SubmodError::Evaluation("negative element".to_string()));
            }
            Ok(set.iter().map(|e| f64::from(*e)).sum())
        }
    }

    #[test]
    fn test_from_scratch_ignores_previous() {
        let lifted = FromScratch::new(Sum);
        let start = SetDeltaInfo::from_scratch(10, HashSet::from([1, 2]));
        let bogus_previous = FuncValue(1000.0);
        let info = lifted
            .evaluate(&start.with_added(4), Some(&bogus_previous))
            .unwrap();
        assert_eq!(info.func_value(), 7.0);
    }

    #[test]
    fn test_from_scratch_propagates_errors() {
        let lifted = FromScratch::new(Sum);
        let info = SetDeltaInfo::from_scratch(10, HashSet::from([-1]));
        assert!(matches!(
            lifted.evaluate(&info, None),
            Err(SubmodError::Evaluation(_))
        ));
    }

    fn evaluate_plain<F: ObjectiveFunction<i32>>(f: F, set: &HashSet<i32>) -> f64 {
        f.evaluate(set).unwrap()
    }

    fn evaluate_incremental<F: IncrementalObjective<i32>>(f: F, info: &SetDeltaInfo<i32>) -> f64 {
        f.evaluate(info, None).unwrap().func_value()
    }

    #[test]
    fn test_reference_impls_delegate() {
        let sum = Sum;
        assert_eq!(evaluate_plain(&sum, &HashSet::from([3])), 3.0);

        let lifted = FromScratch::new(Sum);
        let info = SetDeltaInfo::from_scratch(4, HashSet::from([2]));
        assert_eq!(evaluate_incremental(&lifted, &info), 2.0);
    }
}

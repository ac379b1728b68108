//! The tutorial function from the submodularity.org slides.
//!
//! | set      | value |
//! |----------|-------|
//! | `{}`     | 0     |
//! | `{1}`    | -1    |
//! | `{2}`    | 2     |
//! | `{1, 2}` | 0     |
//!
//! The ground set is `{1, 2}` and the maximizer is `{2}`.

use std::collections::HashSet;

use submodmax_core::{
    FuncValue, GroundSet, IncrementalObjective, ObjectiveFunction, Result, SetDeltaInfo,
    SubmodError,
};

/// Ground set of the tutorial function, in the order `[1, 2]`.
pub fn ground_set() -> GroundSet<u32> {
    GroundSet::new([1, 2])
}

fn lookup(has_one: bool, has_two: bool, len: usize) -> Result<f64> {
    match (has_one, has_two, len) {
        (false, false, 0) => Ok(0.0),
        (true, false, 1) => Ok(-1.0),
        (false, true, 1) => Ok(2.0),
        (true, true, 2) => Ok(0.0),
        _ => Err(SubmodError::Evaluation(
            "tutorial function is only defined on subsets of {1, 2}".to_string(),
        )),
    }
}

/// Plain form of the tutorial function.
#[derive(Debug, Clone, Copy, Default)]
pub struct TutorialFunction;

impl ObjectiveFunction<u32> for TutorialFunction {
    fn evaluate(&self, set: &HashSet<u32>) -> Result<f64> {
        lookup(set.contains(&1), set.contains(&2), set.len())
    }
}

/// Incremental form of the tutorial function.
///
/// Reads only `intersection` and `added`, never the materialized current set.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalTutorialFunction;

impl IncrementalObjective<u32> for IncrementalTutorialFunction {
    type Info = FuncValue;

    fn evaluate(
        &self,
        current: &SetDeltaInfo<u32>,
        _previous: Option<&FuncValue>,
    ) -> Result<FuncValue> {
        let has = |e: u32| current.intersection().contains(&e) || current.added().contains(&e);
        lookup(has(1), has(2), current.current_set_size()).map(FuncValue)
    }
}

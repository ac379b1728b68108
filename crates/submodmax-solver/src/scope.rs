//! Search-level scope.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

use tracing::info;

use submodmax_core::{FuncInfo, GroundSet, IncrementalObjective, Result, SetDeltaInfo};

use crate::optimizer::Optimum;
use crate::statistics::SearchStatistics;

/// State shared by every step of one `optimize()` call.
///
/// Owns the statistics, routes every objective evaluation through
/// [`evaluate`](Self::evaluate) so evaluations are counted, and emits the
/// `optimize_start` / `optimize_end` events.
pub struct SearchScope<'a, E, F>
where
    E: Eq + Hash,
    F: IncrementalObjective<E>,
{
    algorithm: &'static str,
    objective: &'a F,
    ground_set: &'a GroundSet<E>,
    debug: bool,
    start_time: Instant,
    statistics: SearchStatistics,
}

impl<'a, E, F> SearchScope<'a, E, F>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
{
    /// Starts a search and logs `optimize_start`.
    pub fn start(
        algorithm: &'static str,
        objective: &'a F,
        ground_set: &'a GroundSet<E>,
        debug: bool,
    ) -> Self {
        info!(
            event = "optimize_start",
            algorithm,
            ground_set_size = ground_set.len(),
        );
        Self {
            algorithm,
            objective,
            ground_set,
            debug,
            start_time: Instant::now(),
            statistics: SearchStatistics::new(),
        }
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn ground_set(&self) -> &'a GroundSet<E> {
        self.ground_set
    }

    /// Size of the ground set.
    pub fn n(&self) -> usize {
        self.ground_set.len()
    }

    /// Whether step-level events are emitted.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Evaluates `current`, reusing `previous` when the objective supports it.
    pub fn evaluate(
        &mut self,
        current: &SetDeltaInfo<E>,
        previous: Option<&F::Info>,
    ) -> Result<F::Info> {
        self.statistics.evaluations += 1;
        self.objective.evaluate(current, previous)
    }

    /// Evaluates `set` from scratch.
    pub fn evaluate_set(&mut self, set: HashSet<E>) -> Result<(SetDeltaInfo<E>, F::Info)> {
        let info = SetDeltaInfo::from_scratch(self.ground_set.len(), set);
        let value = self.evaluate(&info, None)?;
        Ok((info, value))
    }

    pub fn record_addition(&mut self) {
        self.statistics.steps += 1;
        self.statistics.additions += 1;
    }

    pub fn record_removal(&mut self) {
        self.statistics.steps += 1;
        self.statistics.removals += 1;
    }

    pub fn record_try(&mut self) {
        self.statistics.tries += 1;
    }

    pub fn record_omega_samples(&mut self, count: u64) {
        self.statistics.omega_samples += count;
    }

    pub fn record_truncated_omega_estimate(&mut self) {
        self.statistics.truncated_omega_estimates += 1;
    }

    /// Ends the search, logs `optimize_end` and packages the result.
    pub fn finish(mut self, set_info: SetDeltaInfo<E>, func_info: F::Info) -> Optimum<E, F::Info> {
        self.statistics.duration = self.start_time.elapsed();
        info!(
            event = "optimize_end",
            algorithm = self.algorithm,
            value = func_info.func_value(),
            set_size = set_info.current_set_size(),
            evaluations = self.statistics.evaluations,
            duration_ms = self.statistics.duration_ms(),
        );
        Optimum::new(set_info, func_info, self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use submodmax_core::FromScratch;
    use submodmax_test::tutorial::{ground_set, TutorialFunction};

    #[test]
    fn test_evaluations_are_counted() {
        let objective = FromScratch::new(TutorialFunction);
        let ground = ground_set();
        let mut scope = SearchScope::start("test", &objective, &ground, false);

        let (info, value) = scope.evaluate_set(HashSet::from([2])).unwrap();
        assert_eq!(value.func_value(), 2.0);
        let grown = info.with_added(1);
        let value = scope.evaluate(&grown, Some(&value)).unwrap();
        assert_eq!(value.func_value(), 0.0);
        assert_eq!(scope.statistics().evaluations, 2);

        scope.record_addition();
        scope.record_removal();
        let optimum = scope.finish(grown, value);
        assert_eq!(optimum.statistics().steps, 2);
        assert_eq!(optimum.statistics().additions, 1);
        assert_eq!(optimum.statistics().removals, 1);
        assert_eq!(optimum.set(), &HashSet::from([1, 2]));
    }
}

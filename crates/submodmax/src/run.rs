//! Optimizer entry points that hide the config wiring.

use std::fmt::Debug;
use std::hash::Hash;

use submodmax_config::OptimizerConfig;
use submodmax_core::{
    FromScratch, FuncValue, GroundSet, IncrementalObjective, ObjectiveFunction, Result,
};
use submodmax_solver::{Optimizer, OptimizerFactory, Optimum};

/// Config file read by [`optimize`].
pub const CONFIG_FILE: &str = "optimizer.toml";

/// Maximizes `objective` with the optimizer described by `config`.
pub fn optimize_with_config<E, O>(
    config: &OptimizerConfig,
    objective: O,
    ground_set: GroundSet<E>,
) -> Result<Optimum<E, FuncValue>>
where
    E: Clone + Eq + Hash + Debug,
    O: ObjectiveFunction<E>,
{
    optimize_incremental_with_config(config, FromScratch::new(objective), ground_set)
}

/// Like [`optimize_with_config`], for objectives that reuse state.
pub fn optimize_incremental_with_config<E, F>(
    config: &OptimizerConfig,
    objective: F,
    ground_set: GroundSet<E>,
) -> Result<Optimum<E, F::Info>>
where
    E: Clone + Eq + Hash + Debug,
    F: IncrementalObjective<E>,
{
    #[cfg(feature = "console")]
    submodmax_console::init_with(config.debug);

    let factory = OptimizerFactory::new(config.clone());
    let mut optimizer = factory.build(objective, ground_set)?;
    optimizer.optimize()
}

/// Maximizes `objective` with the configuration in [`CONFIG_FILE`], or the
/// default configuration when the file is missing or invalid.
pub fn optimize<E, O>(objective: O, ground_set: GroundSet<E>) -> Result<Optimum<E, FuncValue>>
where
    E: Clone + Eq + Hash + Debug,
    O: ObjectiveFunction<E>,
{
    let config = OptimizerConfig::load(CONFIG_FILE).unwrap_or_default();
    optimize_with_config(&config, objective, ground_set)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use submodmax_config::{AlgorithmConfig, RandomizedDoubleGreedyConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use submodmax_core::SubmodError;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::{EnvFilter, Layer};

    struct Tutorial;

    impl ObjectiveFunction<u32> for Tutorial {
        fn evaluate(&self, set: &HashSet<u32>) -> Result<f64> {
            Ok(match (set.contains(&1), set.contains(&2)) {
                (false, false) => 0.0,
                (true, false) => -1.0,
                (false, true) => 2.0,
                (true, true) => 0.0,
            })
        }
    }

    #[test]
    fn test_optimize_with_default_config() {
        let config = OptimizerConfig::new().with_random_seed(3);
        let optimum = optimize_with_config(&config, Tutorial, GroundSet::new([1, 2])).unwrap();
        assert_eq!(optimum.set(), &HashSet::from([2]));
        assert_eq!(optimum.value(), 2.0);
        assert_eq!(optimum.statistics().tries, 10);
    }

    #[derive(Default)]
    struct EventName(Option<String>);

    impl Visit for EventName {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "event" {
                self.0 = Some(value.to_string());
            }
        }

        fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
    }

    /// Counts `step` events that pass the filter.
    struct StepCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for StepCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut name = EventName::default();
            event.record(&mut name);
            if name.0.as_deref() == Some("step") {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn count_steps(debug: bool) -> usize {
        let steps = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(submodmax_console::default_filter(debug)))
            .with(StepCounter(Arc::clone(&steps)));
        let config = OptimizerConfig::new()
            .with_algorithm(AlgorithmConfig::DeterministicDoubleGreedy)
            .with_debug(debug);
        tracing::subscriber::with_default(subscriber, || {
            let optimum = optimize_with_config(&config, Tutorial, GroundSet::new([1, 2])).unwrap();
            assert_eq!(optimum.set(), &HashSet::from([2]));
        });
        steps.load(Ordering::Relaxed)
    }

    #[test]
    fn test_debug_config_reaches_console_filter() {
        // one step per ground-set element
        assert_eq!(count_steps(true), 2);
        assert_eq!(count_steps(false), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = OptimizerConfig::new().with_algorithm(AlgorithmConfig::RandomizedDoubleGreedy(
            RandomizedDoubleGreedyConfig { n_tries: Some(0) },
        ));
        let result = optimize_with_config(&config, Tutorial, GroundSet::new([1, 2]));
        assert!(matches!(result, Err(SubmodError::Misconfiguration(_))));
    }
}

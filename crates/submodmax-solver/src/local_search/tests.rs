//! Tests for deterministic local search.

use std::collections::HashSet;

use submodmax_core::GroundSet;
use submodmax_test::graphs::{brute_force_max, random_graph, triangle_graph};
use submodmax_test::max_cut::{IncrementalMaxCut, MaxCut};
use submodmax_test::tutorial::{self, IncrementalTutorialFunction, TutorialFunction};

use super::*;

/// Lookup table over subsets of `{0, 1, 2}`, keyed by bitmask.
struct TableFunction([f64; 8]);

impl ObjectiveFunction<u32> for TableFunction {
    fn evaluate(&self, set: &HashSet<u32>) -> Result<f64> {
        let mask: usize = set.iter().map(|e| 1usize << *e).sum();
        Ok(self.0[mask])
    }
}

#[test]
fn test_tutorial_both_rho_variants() {
    for variant in [RhoVariant::Standard, RhoVariant::Halved] {
        let optimum =
            DeterministicLocalSearch::from_function(TutorialFunction, tutorial::ground_set())
                .with_rho_variant(variant)
                .optimize()
                .unwrap();
        assert_eq!(optimum.set(), &HashSet::from([2]), "{variant:?}");
        assert_eq!(optimum.value(), 2.0);

        let set = DeterministicLocalSearch::new(IncrementalTutorialFunction, tutorial::ground_set())
            .with_rho_variant(variant)
            .optimize_set()
            .unwrap();
        assert_eq!(set, HashSet::from([2]));
    }
}

#[test]
fn test_max_cut_triangle() {
    let f = MaxCut::new(triangle_graph(), 0.0).unwrap();
    let ground = f.ground_set();
    let optimum = DeterministicLocalSearch::from_function(f, ground)
        .optimize()
        .unwrap();
    assert_eq!(optimum.set(), &HashSet::from([1]));
    assert_eq!(optimum.value(), 2.0);
}

#[test]
fn test_rho_values() {
    let f = MaxCut::new(random_graph(10, 1, 0), 0.0).unwrap();
    let ground = f.ground_set();
    let standard = DeterministicLocalSearch::from_function(f.clone(), ground.clone());
    assert!((standard.rho() - 1.0005).abs() < 1e-12);
    let halved =
        DeterministicLocalSearch::from_function(f, ground).with_rho_variant(RhoVariant::Halved);
    assert!((halved.rho() - 0.50025).abs() < 1e-12);
}

#[test]
fn test_empty_ground_set_has_no_singleton() {
    let f = MaxCut::new(Vec::new(), 0.0).unwrap();
    let ground = f.ground_set();
    let result = DeterministicLocalSearch::from_function(f, ground).optimize();
    assert!(matches!(result, Err(SubmodError::NoFeasibleSingleton)));
}

#[test]
fn test_undefined_singletons() {
    let all_nan = TableFunction([0.0, f64::NAN, f64::NAN, 1.0, f64::NAN, 1.0, 1.0, 0.0]);
    let result =
        DeterministicLocalSearch::from_function(all_nan, GroundSet::new([0, 1, 2])).optimize();
    assert!(matches!(result, Err(SubmodError::NoFeasibleSingleton)));

    // {0} undefined, {1} and {2} tie: {1} comes first
    let partial = TableFunction([0.0, f64::NAN, 1.0, 0.5, 1.0, 0.5, 0.5, 0.0]);
    let optimum = DeterministicLocalSearch::from_function(partial, GroundSet::new([0, 1, 2]))
        .optimize()
        .unwrap();
    assert_eq!(optimum.set(), &HashSet::from([1]));
}

#[test]
fn test_singleton_ties_keep_first() {
    // f = 1 on every non-empty set
    let flat = TableFunction([0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    let optimum = DeterministicLocalSearch::from_function(flat, GroundSet::new([2, 0, 1]))
        .optimize()
        .unwrap();
    assert_eq!(optimum.set(), &HashSet::from([2]));
}

#[test]
fn test_complement_wins() {
    // best singleton {0} is a local optimum, its complement {1, 2} is better
    let table = TableFunction([0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 5.0, 0.0]);
    let optimum = DeterministicLocalSearch::from_function(table, GroundSet::new([0, 1, 2]))
        .optimize()
        .unwrap();
    assert_eq!(optimum.set(), &HashSet::from([1, 2]));
    assert_eq!(optimum.value(), 5.0);
}

#[test]
fn test_step_limit_zero_keeps_best_singleton() {
    let f = MaxCut::new(random_graph(6, 5, 4), 0.0).unwrap();
    let ground = f.ground_set();
    let optimum = DeterministicLocalSearch::from_function(f, ground)
        .with_step_limit(Some(0))
        .optimize()
        .unwrap();
    assert_eq!(optimum.statistics().steps, 0);
    let size = optimum.set().len();
    assert!(size == 1 || size == 5);
}

#[test]
fn test_negative_epsilon_is_misconfiguration() {
    let result = DeterministicLocalSearch::from_function(TutorialFunction, tutorial::ground_set())
        .with_epsilon(-1.0)
        .optimize();
    assert!(matches!(result, Err(SubmodError::Misconfiguration(_))));
}

#[test]
fn test_approximation_on_random_graphs() {
    for seed in 0..40 {
        let n = 2 + (seed as usize % 7);
        let f = MaxCut::new(random_graph(n, 6, seed), 0.0).unwrap();
        let ground = f.ground_set();
        let (_, opt) = brute_force_max(&f, &ground).unwrap();
        let best_singleton = ground
            .iter()
            .map(|e| f.evaluate(&HashSet::from([*e])).unwrap())
            .fold(f64::NEG_INFINITY, f64::max);

        let optimum = DeterministicLocalSearch::from_function(f.clone(), ground.clone())
            .optimize()
            .unwrap();
        assert!(ground.is_superset_of(optimum.set()));
        assert_eq!(optimum.value(), f.evaluate(optimum.set()).unwrap());
        assert!(optimum.value() >= best_singleton, "seed {seed}");
        assert!(optimum.value() >= (1.0 / 3.0 - DEFAULT_EPSILON / n as f64) * opt);
        let stats = optimum.statistics();
        assert_eq!(stats.steps, stats.additions + stats.removals);
    }
}

#[test]
fn test_halved_threshold_with_step_limit_terminates() {
    for seed in 0..10 {
        let f = MaxCut::new(random_graph(6, 4, seed), 0.0).unwrap();
        let ground = f.ground_set();
        let optimum = DeterministicLocalSearch::from_function(f, ground.clone())
            .with_rho_variant(RhoVariant::Halved)
            .with_step_limit(Some(40))
            .optimize()
            .unwrap();
        assert!(ground.is_superset_of(optimum.set()));
        assert!(optimum.statistics().steps <= 40);
    }
}

#[test]
fn test_value_reuse_matches_plain() {
    for seed in 0..30 {
        let n = 3 + (seed as usize % 6);
        let graph = random_graph(n, 5, seed);
        let plain = MaxCut::new(graph.clone(), 0.0).unwrap();
        let incremental = IncrementalMaxCut::new(graph, 0.0).unwrap();
        let ground = plain.ground_set();

        let a = DeterministicLocalSearch::from_function(plain, ground.clone())
            .optimize()
            .unwrap();
        let b = DeterministicLocalSearch::new(incremental, ground)
            .optimize()
            .unwrap();
        assert_eq!(a.set(), b.set(), "seed {seed}");
        assert_eq!(a.value(), b.value());
        assert_eq!(a.statistics().evaluations, b.statistics().evaluations);
    }
}

#[test]
fn test_debug_does_not_change_results() {
    let f = IncrementalMaxCut::new(random_graph(7, 6, 17), 0.0).unwrap();
    let ground = f.ground_set();
    let run = |debug| {
        DeterministicLocalSearch::new(f.clone(), ground.clone())
            .with_debug(debug)
            .optimize()
            .unwrap()
    };
    let (quiet, verbose) = (run(false), run(true));
    assert_eq!(quiet.set(), verbose.set());
    assert_eq!(quiet.value(), verbose.value());
    assert_eq!(quiet.statistics().evaluations, verbose.statistics().evaluations);
    assert_eq!(quiet.statistics().steps, verbose.statistics().steps);
}

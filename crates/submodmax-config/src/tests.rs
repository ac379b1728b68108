//! Tests for optimizer configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42
        debug = true

        [algorithm]
        type = "deterministic_local_search"
        epsilon = 0.1
        rho = "halved"
        step_limit = 500
    "#;

    let config = OptimizerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert!(config.debug);
    match config.algorithm {
        AlgorithmConfig::DeterministicLocalSearch(dls) => {
            assert_eq!(dls.epsilon, Some(0.1));
            assert_eq!(dls.rho, RhoVariant::Halved);
            assert_eq!(dls.step_limit, Some(500));
        }
        other => panic!("unexpected algorithm {other:?}"),
    }
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 42
        algorithm:
          type: smooth_local_search
          max_samples_per_arm: 2000
    "#;

    let config = OptimizerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert!(!config.debug);
    match config.algorithm {
        AlgorithmConfig::SmoothLocalSearch(sls) => {
            assert_eq!(sls.max_samples_per_arm, Some(2000));
            assert!(!sls.unbounded_sampling);
            assert_eq!(sls.step_limit, None);
        }
        other => panic!("unexpected algorithm {other:?}"),
    }
}

#[test]
fn test_defaults() {
    let config = OptimizerConfig::from_toml_str("").unwrap();
    assert_eq!(config.random_seed, None);
    assert!(!config.debug);
    assert_eq!(config.algorithm.name(), "randomized_double_greedy");
    assert!(config.validate().is_ok());
}

#[test]
fn test_short_aliases() {
    let cases = [
        ("DDGS", "deterministic_double_greedy"),
        ("RDGS", "randomized_double_greedy"),
        ("DLS", "deterministic_local_search"),
        ("SLS", "smooth_local_search"),
        ("random_set", "random_subset"),
        ("ground_set", "ground_set"),
    ];
    for (alias, name) in cases {
        let toml = format!("[algorithm]\ntype = \"{alias}\"\n");
        let config = OptimizerConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.algorithm.name(), name, "alias {alias}");
    }
}

#[test]
fn test_unknown_algorithm_is_rejected() {
    let result = OptimizerConfig::from_toml_str("[algorithm]\ntype = \"simulated_annealing\"\n");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_builder() {
    let config = OptimizerConfig::new()
        .with_random_seed(123)
        .with_debug(true)
        .with_algorithm(AlgorithmConfig::RandomSubset(RandomSubsetConfig {
            probability: Some(0.25),
        }));

    assert_eq!(config.random_seed, Some(123));
    assert!(config.debug);
    assert_eq!(config.algorithm.name(), "random_subset");
}

#[test]
fn test_validate_rejects_zero_tries() {
    let config = OptimizerConfig::new().with_algorithm(AlgorithmConfig::RandomizedDoubleGreedy(
        RandomizedDoubleGreedyConfig { n_tries: Some(0) },
    ));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_bad_epsilon() {
    for epsilon in [-0.5, f64::NAN, f64::INFINITY] {
        let config = OptimizerConfig::new().with_algorithm(
            AlgorithmConfig::DeterministicLocalSearch(DeterministicLocalSearchConfig {
                epsilon: Some(epsilon),
                ..Default::default()
            }),
        );
        assert!(config.validate().is_err(), "epsilon {epsilon}");
    }
}

#[test]
fn test_validate_rejects_bad_probability() {
    for probability in [-0.1, 1.5] {
        let config = OptimizerConfig::new().with_algorithm(AlgorithmConfig::RandomSubset(
            RandomSubsetConfig {
                probability: Some(probability),
            },
        ));
        assert!(config.validate().is_err(), "probability {probability}");
    }
    let edge = OptimizerConfig::new().with_algorithm(AlgorithmConfig::RandomSubset(
        RandomSubsetConfig {
            probability: Some(1.0),
        },
    ));
    assert!(edge.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_sample_budget() {
    let config = OptimizerConfig::new().with_algorithm(AlgorithmConfig::SmoothLocalSearch(
        SmoothLocalSearchConfig {
            max_samples_per_arm: Some(0),
            ..Default::default()
        },
    ));
    assert!(config.validate().is_err());
}

#[test]
fn test_rho_variants() {
    let standard = RhoVariant::Standard.rho(0.05, 10);
    let halved = RhoVariant::Halved.rho(0.05, 10);
    assert!((standard - 1.0005).abs() < 1e-12);
    assert!((halved - 0.50025).abs() < 1e-12);
}

#[test]
fn test_missing_file() {
    let result = OptimizerConfig::load("/nonexistent/optimizer.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

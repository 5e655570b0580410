//! Tests for configuration defaults, builders and loading.

use cvrp_heuristics::config::{AnnealingConfig, Config, GeneratorConfig};

#[test]
fn test_default_values() {
    let annealing = AnnealingConfig::default();
    assert_eq!(annealing.lambda, 0.995);
    assert_eq!(annealing.starting_temperature, 1000.0);
    assert_eq!(annealing.swap_probability, 0.5);
    assert_eq!(annealing.guided_probability, 0.5);
    assert!(annealing.seed.is_none());
    assert!(annealing.validate().is_ok());

    let generator = GeneratorConfig::default();
    assert_eq!(generator.size, 50);
    assert_eq!(generator.edges, 63);
    assert_eq!(generator.capacity, 100.0);
}

#[test]
fn test_builder_methods() {
    let config = AnnealingConfig::new()
        .with_lambda(0.9)
        .with_starting_temperature(20.0)
        .with_swap_probability(0.2)
        .with_guided_probability(0.8)
        .with_seed(3);

    assert_eq!(config.lambda, 0.9);
    assert_eq!(config.starting_temperature, 20.0);
    assert_eq!(config.swap_probability, 0.2);
    assert_eq!(config.guided_probability, 0.8);
    assert_eq!(config.seed, Some(3));

    let generator = GeneratorConfig::new()
        .with_size(10)
        .with_edges(12)
        .with_edge_length(5.0, 1.0)
        .with_demand(8.0, 2.0)
        .with_capacity(40.0)
        .with_seed(4);

    assert_eq!(generator.size, 10);
    assert_eq!(generator.edge_length_mean, 5.0);
    assert_eq!(generator.demand_deviation, 2.0);
    assert_eq!(generator.capacity, 40.0);
}

#[test]
fn test_validation() {
    assert!(AnnealingConfig::new().with_lambda(1.0).validate().is_err());
    assert!(AnnealingConfig::new().with_lambda(0.0).validate().is_err());
    assert!(AnnealingConfig::new()
        .with_starting_temperature(f64::INFINITY)
        .validate()
        .is_err());
    assert!(AnnealingConfig::new()
        .with_swap_probability(1.5)
        .validate()
        .is_err());
    assert!(AnnealingConfig::new()
        .with_guided_probability(-0.1)
        .validate()
        .is_err());
}

#[test]
fn test_generator_validation() {
    assert!(GeneratorConfig::new().validate().is_ok());
    assert!(GeneratorConfig::new()
        .with_edge_length(10.0, -1.0)
        .validate()
        .is_err());
    assert!(GeneratorConfig::new()
        .with_demand(30.0, -5.0)
        .validate()
        .is_err());
    assert!(GeneratorConfig::new()
        .with_demand(f64::INFINITY, 1.0)
        .validate()
        .is_err());
}

#[test]
fn test_iterations_when_temperature_lands_on_one() {
    // 10 -> 1 stops after one step, 100 -> 10 -> 1 after two
    for (start, expected) in [(10.0, 1), (100.0, 2), (10000.0, 4)] {
        let config = AnnealingConfig::new()
            .with_lambda(0.1)
            .with_starting_temperature(start);
        assert_eq!(config.iterations(), expected, "start {}", start);
    }

    assert_eq!(AnnealingConfig::new().with_lambda(1.0).iterations(), 0);
}

#[test]
fn test_partial_config_file() {
    let path = std::env::temp_dir().join(format!("cvrp_config_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{ "annealing": { "lambda": 0.9, "seed": 12 }, "generator": { "size": 8 } }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.annealing.lambda, 0.9);
    assert_eq!(config.annealing.seed, Some(12));
    assert_eq!(config.annealing.starting_temperature, 1000.0);
    assert_eq!(config.generator.size, 8);
    assert_eq!(config.generator.edges, 63);
}

#[test]
fn test_missing_config_file() {
    assert!(Config::from_file("/nonexistent/cvrp_config.json").is_err());
}

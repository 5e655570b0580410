//! Tests for random instance generation.

use cvrp_heuristics::config::GeneratorConfig;
use cvrp_heuristics::error::CvrpError;
use cvrp_heuristics::generator::{generate, generate_with};
use cvrp_heuristics::shortest_path::ShortestPathTable;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_config() -> GeneratorConfig {
    GeneratorConfig::new()
        .with_size(20)
        .with_edges(30)
        .with_seed(11)
}

#[test]
fn test_generated_graph_shape() {
    let config = create_test_config();
    let graph = generate(&config).unwrap();

    assert_eq!(graph.size(), 20);
    assert_eq!(graph.edge_count(), 30);
    assert_eq!(graph.capacity(), config.capacity);
    assert_eq!(graph.name, "random-n20-e30");
    assert_eq!(graph.demand(graph.depot()), 0.0);

    for node in graph.customers() {
        let demand = graph.demand(node);
        assert!(demand >= 0.0 && demand <= graph.capacity());
    }
    for (_, _, weight) in graph.edges() {
        assert!(weight > 0.0);
    }
}

#[test]
fn test_generated_graph_is_connected() {
    let graph = generate(&create_test_config().with_edges(0)).unwrap();

    // The spanning tree alone
    assert_eq!(graph.edge_count(), 19);

    let table = ShortestPathTable::calculate(&graph);
    for node in graph.customers() {
        assert!(table.distance(graph.depot(), node).is_some());
    }
}

#[test]
fn test_edge_count_is_clamped_to_complete_graph() {
    let graph = generate(&create_test_config().with_size(5).with_edges(100)).unwrap();

    assert_eq!(graph.edge_count(), 10);
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let config = create_test_config();
    let first = generate(&config).unwrap();
    let second = generate(&config).unwrap();

    assert_eq!(first.demands(), second.demands());
    assert_eq!(
        first.edges().collect::<Vec<_>>(),
        second.edges().collect::<Vec<_>>()
    );

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let third = generate_with(&config, &mut rng).unwrap();
    assert_eq!(first.demands(), third.demands());
}

#[test]
fn test_large_demands_are_clamped() {
    let config = create_test_config().with_demand(500.0, 10.0).with_capacity(100.0);
    let graph = generate(&config).unwrap();

    for node in graph.customers() {
        assert_eq!(graph.demand(node), 100.0);
    }
}

#[test]
fn test_single_node_instance() {
    let graph = generate(&create_test_config().with_size(1)).unwrap();

    assert_eq!(graph.size(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_invalid_generator_settings() {
    assert!(matches!(
        generate(&create_test_config().with_size(0)),
        Err(CvrpError::EmptyGraph)
    ));
    assert!(matches!(
        generate(&create_test_config().with_edge_length(10.0, -1.0)),
        Err(CvrpError::InvalidConfig(_))
    ));
    assert!(matches!(
        generate(&create_test_config().with_demand(30.0, -5.0)),
        Err(CvrpError::InvalidConfig(_))
    ));
    assert!(matches!(
        generate(&create_test_config().with_edge_length(f64::NAN, 1.0)),
        Err(CvrpError::InvalidConfig(_))
    ));
    assert!(matches!(
        generate(&create_test_config().with_capacity(0.0)),
        Err(CvrpError::InvalidCapacity(_))
    ));
}

#[test]
fn test_zero_deviation_is_accepted() {
    let config = create_test_config().with_demand(25.0, 0.0);
    let graph = generate(&config).unwrap();

    for node in graph.customers() {
        assert_eq!(graph.demand(node), 25.0);
    }
}

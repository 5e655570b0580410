//! Tests for route repair in concrete and abstract mode.

use cvrp_heuristics::error::CvrpError;
use cvrp_heuristics::graph::{EdgeSpec, Graph};
use cvrp_heuristics::repair::RouteRepair;
use cvrp_heuristics::shortest_path::ShortestPathTable;
use proptest::prelude::*;

/// Creates the complete graph on four nodes with weight 10 everywhere and
/// demand 40 per customer.
fn create_complete_graph() -> Graph {
    let mut edges = Vec::new();
    for a in 0..4 {
        for b in (a + 1)..4 {
            edges.push(EdgeSpec::new(a, b, 10.0));
        }
    }

    Graph::new("K4", 100.0, vec![0.0, 40.0, 40.0, 40.0], &edges).unwrap()
}

/// Creates a line 0 - 1 - ... with unit weights.
fn create_line_graph(demands: Vec<f64>, capacity: f64) -> Graph {
    let edges: Vec<_> = (1..demands.len())
        .map(|i| EdgeSpec::new(i - 1, i, 1.0))
        .collect();

    Graph::new("Line", capacity, demands, &edges).unwrap()
}

#[test]
fn test_overflow_triggers_depot_return() {
    let graph = create_complete_graph();
    let table = ShortestPathTable::calculate(&graph);
    let repair = RouteRepair::new(&graph, &table);

    let route = repair.to_route(&[1, 2, 3]).unwrap();

    // Node 3 does not fit after 1 and 2: step onto it, unload, come back
    assert_eq!(route.nodes, vec![0, 1, 2, 3, 0, 3, 0]);
    assert_eq!(route.distance, 60.0);
    assert_eq!(route.trip_loads(&graph), vec![80.0, 40.0]);
    assert!(route.is_feasible(&graph));
    assert_eq!(repair.objective(&[1, 2, 3]).unwrap(), 60.0);
}

#[test]
fn test_customers_on_the_way_are_served() {
    let graph = create_line_graph(vec![0.0, 10.0, 10.0, 10.0], 100.0);
    let table = ShortestPathTable::calculate(&graph);
    let repair = RouteRepair::new(&graph, &table);

    let route = repair.to_route(&[3, 1, 2]).unwrap();

    assert_eq!(route.nodes, vec![0, 1, 2, 3, 2, 1, 0]);
    assert_eq!(route.distance, 6.0);
    assert_eq!(route.served_customers(), vec![1, 2, 3]);

    // Targets already served on the way are skipped
    assert_eq!(repair.fix_permutation(&[3, 1, 2]).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_detour_passes_through_blocked_node() {
    let graph = create_line_graph(vec![0.0, 60.0, 60.0], 100.0);
    let table = ShortestPathTable::calculate(&graph);
    let repair = RouteRepair::new(&graph, &table);

    let route = repair.to_route(&[2]).unwrap();

    assert_eq!(route.nodes, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]);
    assert_eq!(route.distance, 8.0);
    assert_eq!(route.trip_loads(&graph), vec![60.0, 60.0]);
    assert_eq!(repair.fix_permutation(&[2]).unwrap(), vec![1, 2]);
}

#[test]
fn test_full_vehicle_returns_before_next_target() {
    // Star around node 1: the first trip fills up exactly at 2, so node 3
    // overflows and is served on a second trip.
    let edges = vec![
        EdgeSpec::new(0, 1, 1.0),
        EdgeSpec::new(1, 2, 1.0),
        EdgeSpec::new(1, 3, 1.0),
    ];
    let graph = Graph::new("Star", 100.0, vec![0.0, 30.0, 70.0, 50.0], &edges).unwrap();
    let table = ShortestPathTable::calculate(&graph);
    let repair = RouteRepair::new(&graph, &table);

    let route = repair.to_route(&[2, 3]).unwrap();
    assert_eq!(route.served_customers(), vec![1, 2, 3]);
    assert_eq!(route.nodes, vec![0, 1, 2, 1, 3, 1, 0, 1, 3, 1, 0]);
    assert!(route.is_feasible(&graph));
    assert!(route.max_load(&graph) <= graph.capacity());
}

#[test]
fn test_empty_permutation() {
    let graph = create_complete_graph();
    let table = ShortestPathTable::calculate(&graph);
    let repair = RouteRepair::new(&graph, &table);

    let route = repair.to_route(&[]).unwrap();

    assert_eq!(route.nodes, vec![0]);
    assert_eq!(route.distance, 0.0);
    assert!(repair.fix_permutation(&[]).unwrap().is_empty());
}

#[test]
fn test_unknown_node_is_rejected() {
    let graph = create_complete_graph();
    let table = ShortestPathTable::calculate(&graph);
    let repair = RouteRepair::new(&graph, &table);

    assert!(matches!(
        repair.to_route(&[1, 9]),
        Err(CvrpError::UnknownNode(9))
    ));
    assert!(matches!(
        repair.fix_permutation(&[9]),
        Err(CvrpError::UnknownNode(9))
    ));
}

#[test]
fn test_depot_in_permutation_is_ignored() {
    let graph = create_complete_graph();
    let table = ShortestPathTable::calculate(&graph);
    let repair = RouteRepair::new(&graph, &table);

    let with_depot = repair.to_route(&[1, 0, 2, 3]).unwrap();
    let without = repair.to_route(&[1, 2, 3]).unwrap();

    assert_eq!(with_depot, without);
}

/// Random instances on a path spine with extra chords; every demand fits
/// into an empty vehicle.
fn instance_and_permutation() -> impl Strategy<Value = (Graph, Vec<usize>)> {
    (3usize..9).prop_flat_map(|size| {
        let spine = prop::collection::vec(1.0f64..20.0, size - 1);
        let extra = prop::collection::vec((0..size, 0..size, 1.0f64..20.0), 0..8);
        let demands = prop::collection::vec(1.0f64..100.0, size - 1);
        let order = Just((1..size).collect::<Vec<_>>()).prop_shuffle();

        (spine, extra, demands, order).prop_map(move |(spine, extra, demands, order)| {
            let mut edges: Vec<_> = spine
                .into_iter()
                .enumerate()
                .map(|(i, w)| EdgeSpec::new(i, i + 1, w))
                .collect();
            edges.extend(
                extra
                    .into_iter()
                    .filter(|&(a, b, _)| a != b)
                    .map(|(a, b, w)| EdgeSpec::new(a, b, w)),
            );
            let mut all_demands = vec![0.0];
            all_demands.extend(demands);

            let graph = Graph::new("Random", 100.0, all_demands, &edges).unwrap();
            (graph, order)
        })
    })
}

proptest! {
    #[test]
    fn prop_repaired_routes_are_feasible((graph, order) in instance_and_permutation()) {
        let table = ShortestPathTable::calculate(&graph);
        let repair = RouteRepair::new(&graph, &table);

        let route = repair.to_route(&order).unwrap();
        prop_assert!(route.is_feasible(&graph));
        prop_assert!(route.max_load(&graph) <= graph.capacity());

        // Every customer served exactly once
        let mut served = route.served_customers();
        served.sort();
        prop_assert_eq!(served, graph.customers().collect::<Vec<_>>());
    }

    #[test]
    fn prop_abstract_and_concrete_modes_agree((graph, order) in instance_and_permutation()) {
        let table = ShortestPathTable::calculate(&graph);
        let repair = RouteRepair::new(&graph, &table);

        let route = repair.to_route(&order).unwrap();
        let fixed = repair.fix_permutation(&order).unwrap();
        prop_assert_eq!(fixed, route.served_customers());
    }
}

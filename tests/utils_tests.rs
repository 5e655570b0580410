//! Unit tests for the reporting helpers.

use cvrp_heuristics::config::AnnealingConfig;
use cvrp_heuristics::graph::{EdgeSpec, Graph};
use cvrp_heuristics::solution::{Route, Solution};
use cvrp_heuristics::utils::{format_duration, format_route, format_solution, write_result_log};
use cvrp_heuristics::{CvrpSolver, Heuristic};
use std::time::Duration;

fn create_test_graph() -> Graph {
    let mut edges = Vec::new();
    for a in 0..4 {
        for b in (a + 1)..4 {
            edges.push(EdgeSpec::new(a, b, 10.0));
        }
    }

    Graph::new("K4", 100.0, vec![0.0, 40.0, 40.0, 40.0], &edges).unwrap()
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_secs(65)), "0h 01m 05s");
    assert_eq!(format_duration(Duration::from_secs(3600 + 120 + 5)), "1h 02m 05s");
    assert_eq!(
        format_duration(Duration::from_secs(7200 + 3600 + 900 + 30)),
        "3h 15m 30s"
    );
}

#[test]
fn test_format_route_one_trip_per_line() {
    let mut route = Route::new(0);
    for (node, weight) in [(1, 1.0), (2, 1.0), (0, 1.0), (3, 1.0), (0, 1.0)] {
        route.travel(node, weight);
    }

    assert_eq!(format_route(&route, 0), "0 1 2 0\n0 3 0");
    assert_eq!(format_route(&Route::new(0), 0), "0");
}

#[test]
fn test_format_solution() {
    let mut route = Route::new(0);
    route.travel(1, 2.5);
    route.travel(0, 2.5);
    let solution = Solution::new(route, vec![1]);

    let text = format_solution(Heuristic::Greedy, &solution, 0);

    assert!(text.contains("GREEDY"));
    assert!(text.contains("SOLUTION DISTANCE: 5.0000"));
    assert!(text.ends_with("0 1 0"));
}

#[test]
fn test_heuristic_codes() {
    assert_eq!(Heuristic::OracleDecoder.code(), 1);
    assert_eq!(Heuristic::Greedy.code(), 2);
    assert_eq!(Heuristic::Annealing.code(), 3);
    assert_eq!(Heuristic::AssistedAnnealing.code(), 4);
}

#[test]
fn test_result_log_without_oracle() {
    let config = AnnealingConfig::new()
        .with_starting_temperature(1.0)
        .with_seed(1);
    let solver = CvrpSolver::new(create_test_graph(), config);
    let report = solver.run(None).unwrap();

    let mut buffer = Vec::new();
    write_result_log(&mut buffer, &report).unwrap();
    let log = String::from_utf8(buffer).unwrap();

    // Without iterations the annealing keeps the repaired greedy order
    assert_eq!(log, "4\n2,50.0000\n3,60.0000\n");
}

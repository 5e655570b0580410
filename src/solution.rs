//! Route and solution representation for the CVRP.

use crate::error::{CvrpError, CvrpResult};
use crate::graph::Graph;
use crate::shortest_path::ShortestPathTable;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete vehicle route through the graph.
///
/// Consecutive nodes are adjacent in the graph. Every occurrence of the depot
/// marks a trip boundary where the vehicle unloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Node ids in travel order
    pub nodes: Vec<usize>,
    /// Whether the vehicle served the node at the same position
    pub served: Vec<bool>,
    /// The total travelled distance
    pub distance: f64,
}

impl Route {
    /// Create a route standing at `start` without having travelled.
    pub fn new(start: usize) -> Self {
        Route {
            nodes: vec![start],
            served: vec![false],
            distance: 0.0,
        }
    }

    /// Expand a sequence of waypoints through shortest paths.
    ///
    /// Every waypoint other than the depot is marked as served; nodes passed
    /// on the way between waypoints are not.
    pub fn through_waypoints(
        table: &ShortestPathTable,
        waypoints: &[usize],
        depot: usize,
    ) -> CvrpResult<Self> {
        let mut route = match waypoints.first() {
            Some(&start) => Route::new(start),
            None => return Ok(Route::new(depot)),
        };

        for (&from, &to) in waypoints.iter().tuple_windows() {
            let hops = table
                .hops(from, to)
                .ok_or(CvrpError::Unreachable { from, to })?;
            for (node, weight) in hops {
                route.travel(node, weight);
            }
            if to != depot && from != to {
                route.mark_served();
            }
        }

        Ok(route)
    }

    /// Move the vehicle onto an adjacent node.
    pub fn travel(&mut self, node: usize, weight: f64) {
        self.nodes.push(node);
        self.served.push(false);
        self.distance += weight;
    }

    /// Record a service at the node the vehicle currently stands on.
    pub fn mark_served(&mut self) {
        if let Some(flag) = self.served.last_mut() {
            *flag = true;
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Customers in the order they were served.
    pub fn served_customers(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .zip(&self.served)
            .filter(|&(_, &served)| served)
            .map(|(&node, _)| node)
            .collect()
    }

    /// Split the route at every depot occurrence. Each trip starts and ends
    /// at the depot.
    pub fn trips(&self, depot: usize) -> Vec<&[usize]> {
        let boundaries: Vec<usize> = self.nodes.iter().positions(|&n| n == depot).collect();
        boundaries
            .iter()
            .tuple_windows()
            .map(|(&start, &end)| &self.nodes[start..=end])
            .collect()
    }

    /// Vehicle load at the end of each trip, following the served flags.
    pub fn trip_loads(&self, graph: &Graph) -> Vec<f64> {
        let mut loads = Vec::new();
        let mut load = 0.0;

        for (position, (&node, &served)) in self.nodes.iter().zip(&self.served).enumerate() {
            if node == graph.depot() {
                if position > 0 {
                    loads.push(load);
                }
                load = 0.0;
            } else if served {
                load += graph.demand(node);
            }
        }

        loads
    }

    /// Highest load carried at any point of the route.
    pub fn max_load(&self, graph: &Graph) -> f64 {
        self.trip_loads(graph).into_iter().fold(0.0, f64::max)
    }

    /// Check that the route starts and ends at the depot, only uses graph
    /// edges and never exceeds the vehicle capacity.
    pub fn is_feasible(&self, graph: &Graph) -> bool {
        let depot = graph.depot();
        if self.nodes.first() != Some(&depot) || self.nodes.last() != Some(&depot) {
            return false;
        }

        let adjacent = self
            .nodes
            .iter()
            .tuple_windows()
            .all(|(&a, &b)| graph.neighbors(a).any(|(n, _)| n == b));

        adjacent && self.max_load(graph) <= graph.capacity()
    }
}

/// Result of a heuristic: the concrete route plus the visitation order it
/// was built from.
#[derive(Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The concrete route
    pub route: Route,
    /// Customers in visitation order, without depot returns
    pub permutation: Vec<usize>,
    /// The total travelled distance
    pub distance: f64,
}

impl Solution {
    pub fn new(route: Route, permutation: Vec<usize>) -> Self {
        let distance = route.distance;
        Solution {
            route,
            permutation,
            distance,
        }
    }

    /// Number of trips the vehicle makes.
    pub fn trip_count(&self, depot: usize) -> usize {
        self.route.trips(depot).len()
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Distance: {:.2}", self.distance)?;
        writeln!(f, "  Permutation: {:?}", self.permutation)?;
        writeln!(f, "  Route: {:?}", self.route.nodes)?;
        Ok(())
    }
}

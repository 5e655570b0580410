//! Greedy nearest-feasible-neighbor construction.

use crate::error::{CvrpError, CvrpResult};
use crate::graph::{DemandLedger, Graph};
use crate::shortest_path::ShortestPathTable;
use crate::solution::{Route, Solution};
use log::debug;
use serde::{Deserialize, Serialize};

/// Output of a constructive heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Construction {
    /// Waypoints in visiting order, including every return to the depot
    pub visits: Vec<usize>,
    /// The expanded route and its clean permutation (depot returns removed)
    pub solution: Solution,
}

impl Construction {
    /// Visitation order without depot returns, used to seed local search.
    pub fn permutation(&self) -> &[usize] {
        &self.solution.permutation
    }

    pub fn route(&self) -> &Route {
        &self.solution.route
    }

    pub fn distance(&self) -> f64 {
        self.solution.distance
    }
}

/// Build a solution by repeatedly asking `choose` for the next customer.
///
/// `choose(current, ledger, load)` returns a customer with positive remaining
/// demand that fits on the vehicle, or `None` to send the vehicle back to the
/// depot. The ledger is consumed as customers are served.
pub(crate) fn construct<F>(
    graph: &Graph,
    table: &ShortestPathTable,
    mut ledger: DemandLedger,
    start: usize,
    mut load: f64,
    mut choose: F,
) -> CvrpResult<Construction>
where
    F: FnMut(usize, &DemandLedger, f64) -> CvrpResult<Option<usize>>,
{
    let depot = graph.depot();
    if !graph.contains(start) {
        return Err(CvrpError::UnknownNode(start));
    }

    let mut visits = vec![start];
    let mut current = start;

    while !ledger.is_clear() {
        match choose(current, &ledger, load)? {
            Some(next) => {
                load += ledger.take(next);
                visits.push(next);
                current = next;
            }
            None if current == depot => {
                // Nothing fits into an empty vehicle.
                let node = graph
                    .customers()
                    .find(|&c| ledger.remaining(c) > 0.0)
                    .unwrap_or(depot);
                return Err(CvrpError::DemandExceedsCapacity {
                    node,
                    demand: ledger.remaining(node),
                    capacity: graph.capacity(),
                });
            }
            None => {
                load = 0.0;
                visits.push(depot);
                current = depot;
            }
        }
    }

    if current != depot {
        visits.push(depot);
    }

    let route = Route::through_waypoints(table, &visits, depot)?;
    let permutation = visits.iter().copied().filter(|&n| n != depot).collect();

    Ok(Construction {
        visits,
        solution: Solution::new(route, permutation),
    })
}

/// Greedy constructor: always drive to the nearest customer that still fits.
#[derive(Debug, Clone, Copy)]
pub struct Greedy<'a> {
    graph: &'a Graph,
    table: &'a ShortestPathTable,
}

impl<'a> Greedy<'a> {
    pub fn new(graph: &'a Graph, table: &'a ShortestPathTable) -> Self {
        Greedy { graph, table }
    }

    /// Solve the instance from scratch, starting empty at the depot.
    pub fn solve(&self) -> CvrpResult<Construction> {
        let construction = self.complete(DemandLedger::new(self.graph), self.graph.depot(), 0.0)?;
        debug!(
            "Greedy construction: distance {:.2}, {} waypoints",
            construction.distance(),
            construction.visits.len()
        );
        Ok(construction)
    }

    /// Finish a partially served instance from an arbitrary vehicle state.
    ///
    /// The returned visits and route start at `position`.
    pub fn complete(
        &self,
        ledger: DemandLedger,
        position: usize,
        load: f64,
    ) -> CvrpResult<Construction> {
        construct(self.graph, self.table, ledger, position, load, |current, ledger, load| {
            Ok(self.nearest_feasible(current, ledger, load))
        })
    }

    /// The closest customer with remaining demand that fits on top of `load`.
    /// Ties go to the lowest id.
    pub fn nearest_feasible(&self, current: usize, ledger: &DemandLedger, load: f64) -> Option<usize> {
        let capacity = self.graph.capacity();

        self.graph
            .customers()
            .filter(|&node| node != current)
            .filter(|&node| {
                let demand = ledger.remaining(node);
                demand > 0.0 && load + demand <= capacity
            })
            .filter_map(|node| self.table.distance(current, node).map(|d| (node, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _)| node)
    }
}

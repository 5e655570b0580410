//! Route repair: turn an arbitrary customer ordering into a capacity-feasible
//! route.
//!
//! The vehicle walks shortest paths from target to target and serves every
//! node it passes whose demand still fits. When the next hop cannot be served
//! without overflowing, the vehicle steps onto it, drives back to the depot
//! (still picking up whatever fits), unloads and resumes towards the target.
//! Customers already served on an earlier detour are skipped, so the output
//! order may differ from the input.

use crate::error::{CvrpError, CvrpResult};
use crate::graph::{DemandLedger, Graph};
use crate::shortest_path::{Hops, ShortestPathTable};
use crate::solution::Route;

/// Receives the events of a repair walk. The same walk feeds both the
/// concrete route and the abstract visitation order.
trait RepairSink {
    /// The vehicle moved onto `node` over a hop of length `weight`.
    fn travel(&mut self, node: usize, weight: f64);
    /// The vehicle served the node it stands on.
    fn serve(&mut self, node: usize);
}

impl RepairSink for Route {
    fn travel(&mut self, node: usize, weight: f64) {
        Route::travel(self, node, weight);
    }

    fn serve(&mut self, _node: usize) {
        self.mark_served();
    }
}

/// Collects only the served customers.
struct VisitOrder(Vec<usize>);

impl RepairSink for VisitOrder {
    fn travel(&mut self, _node: usize, _weight: f64) {}

    fn serve(&mut self, node: usize) {
        self.0.push(node);
    }
}

/// Repairs permutations against one graph and its shortest-path table.
#[derive(Debug, Clone, Copy)]
pub struct RouteRepair<'a> {
    graph: &'a Graph,
    table: &'a ShortestPathTable,
}

impl<'a> RouteRepair<'a> {
    pub fn new(graph: &'a Graph, table: &'a ShortestPathTable) -> Self {
        RouteRepair { graph, table }
    }

    /// Concrete mode: the full node-by-node route, starting and ending at
    /// the depot, with its total distance.
    pub fn to_route(&self, permutation: &[usize]) -> CvrpResult<Route> {
        let mut route = Route::new(self.graph.depot());
        self.walk(permutation, &mut route)?;
        Ok(route)
    }

    /// Abstract mode: the customers in the order they end up being served.
    pub fn fix_permutation(&self, permutation: &[usize]) -> CvrpResult<Vec<usize>> {
        let mut order = VisitOrder(Vec::with_capacity(permutation.len()));
        self.walk(permutation, &mut order)?;
        Ok(order.0)
    }

    /// Total distance of the repaired route for a permutation.
    pub fn objective(&self, permutation: &[usize]) -> CvrpResult<f64> {
        Ok(self.to_route(permutation)?.distance)
    }

    fn walk<S: RepairSink>(&self, permutation: &[usize], sink: &mut S) -> CvrpResult<()> {
        let depot = self.graph.depot();
        let capacity = self.graph.capacity();
        let mut ledger = DemandLedger::new(self.graph);
        let mut load = 0.0;
        let mut position = depot;

        for &target in permutation {
            if !self.graph.contains(target) {
                return Err(CvrpError::UnknownNode(target));
            }
            if ledger.remaining(target) <= 0.0 {
                continue;
            }

            let mut hops = self.hops(position, target)?;
            while let Some((hop, weight)) = hops.next() {
                if hop == depot {
                    sink.travel(hop, weight);
                    load = 0.0;
                    continue;
                }

                let demand = ledger.remaining(hop);
                if load + demand <= capacity {
                    sink.travel(hop, weight);
                    if demand > 0.0 {
                        load += ledger.take(hop);
                        sink.serve(hop);
                    }
                    continue;
                }

                if load == 0.0 {
                    return Err(CvrpError::DemandExceedsCapacity {
                        node: hop,
                        demand,
                        capacity,
                    });
                }

                // Overflow: step onto the hop, then head back to unload.
                sink.travel(hop, weight);
                for (node, weight) in self.hops(hop, depot)? {
                    sink.travel(node, weight);
                    let demand = ledger.remaining(node);
                    if demand > 0.0 && load + demand <= capacity {
                        load += ledger.take(node);
                        sink.serve(node);
                    }
                }
                load = 0.0;
                hops = self.hops(depot, target)?;
            }
            position = target;
        }

        for (node, weight) in self.hops(position, depot)? {
            sink.travel(node, weight);
        }

        Ok(())
    }

    fn hops(&self, from: usize, to: usize) -> CvrpResult<Hops<'a>> {
        self.table
            .hops(from, to)
            .ok_or(CvrpError::Unreachable { from, to })
    }
}

//! Oracle-driven construction.
//!
//! Works like the greedy constructor, but instead of the nearest customer it
//! drives to the customer the oracle prefers most after the current node.

use crate::error::CvrpResult;
use crate::graph::{DemandLedger, Graph};
use crate::greedy::{construct, Construction};
use crate::oracle::{checked_scores, ScoringOracle};
use crate::shortest_path::ShortestPathTable;
use log::debug;

pub struct OracleDecoder<'a> {
    graph: &'a Graph,
    table: &'a ShortestPathTable,
    oracle: &'a dyn ScoringOracle,
}

impl<'a> OracleDecoder<'a> {
    pub fn new(graph: &'a Graph, table: &'a ShortestPathTable, oracle: &'a dyn ScoringOracle) -> Self {
        OracleDecoder {
            graph,
            table,
            oracle,
        }
    }

    pub fn solve(&self) -> CvrpResult<Construction> {
        let ledger = DemandLedger::new(self.graph);
        let construction = construct(
            self.graph,
            self.table,
            ledger,
            self.graph.depot(),
            0.0,
            |current, ledger, load| self.preferred(current, ledger, load),
        )?;

        debug!(
            "Oracle decoder construction: distance {:.2}, {} waypoints",
            construction.distance(),
            construction.visits.len()
        );
        Ok(construction)
    }

    /// Highest scored customer that still fits, ties going to the lowest id.
    fn preferred(&self, current: usize, ledger: &DemandLedger, load: f64) -> CvrpResult<Option<usize>> {
        let scores = checked_scores(self.oracle, current, self.graph.size())?;
        let capacity = self.graph.capacity();

        let mut best: Option<(usize, f64)> = None;
        for node in self.graph.customers() {
            let demand = ledger.remaining(node);
            if node == current || demand <= 0.0 || load + demand > capacity {
                continue;
            }
            if self.table.distance(current, node).is_none() {
                continue;
            }
            match best {
                Some((_, score)) if scores[node] <= score => {}
                _ => best = Some((node, scores[node])),
            }
        }

        Ok(best.map(|(node, _)| node))
    }
}

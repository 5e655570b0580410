//! # CVRP heuristics
//!
//! Route construction and route repair for the Capacitated Vehicle Routing
//! Problem on sparse weighted graphs: a single vehicle of fixed capacity
//! serves every customer demand, returning to the depot whenever its load
//! would overflow.
//!
//! The crate provides an all-pairs shortest-path table, a repair algorithm
//! turning any customer ordering into a capacity-feasible route, a greedy
//! nearest-neighbor constructor and a simulated annealing search, optionally
//! assisted by an external scoring oracle.

pub mod annealing;
pub mod config;
pub mod decoder;
pub mod error;
pub mod generator;
pub mod graph;
pub mod greedy;
pub mod oracle;
pub mod repair;
pub mod shortest_path;
pub mod solution;
pub mod utils;

use crate::annealing::{AnnealingOutcome, SimulatedAnnealing};
use crate::config::AnnealingConfig;
use crate::decoder::OracleDecoder;
use crate::error::CvrpResult;
use crate::graph::Graph;
use crate::greedy::{Construction, Greedy};
use crate::oracle::ScoringOracle;
use crate::repair::RouteRepair;
use crate::shortest_path::ShortestPathTable;
use crate::solution::Solution;

use log::info;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::{Duration, Instant};

/// The heuristics a run can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heuristic {
    OracleDecoder,
    Greedy,
    Annealing,
    AssistedAnnealing,
}

impl Heuristic {
    /// Numeric code used in result logs.
    pub fn code(&self) -> u8 {
        match self {
            Heuristic::OracleDecoder => 1,
            Heuristic::Greedy => 2,
            Heuristic::Annealing => 3,
            Heuristic::AssistedAnnealing => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::OracleDecoder => "Oracle decoder",
            Heuristic::Greedy => "Greedy",
            Heuristic::Annealing => "Simulated annealing",
            Heuristic::AssistedAnnealing => "Assisted simulated annealing",
        }
    }
}

/// Results of running every heuristic on one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub name: String,
    pub size: usize,
    pub greedy: Construction,
    pub decoder: Option<Construction>,
    pub annealing: AnnealingOutcome,
    pub assisted: Option<AnnealingOutcome>,
    pub run_time: Duration,
}

impl RunReport {
    /// Every produced solution, ordered by heuristic code.
    pub fn solutions(&self) -> Vec<(Heuristic, &Solution)> {
        let mut solutions = Vec::with_capacity(4);
        if let Some(decoder) = &self.decoder {
            solutions.push((Heuristic::OracleDecoder, &decoder.solution));
        }
        solutions.push((Heuristic::Greedy, &self.greedy.solution));
        solutions.push((Heuristic::Annealing, &self.annealing.solution));
        if let Some(assisted) = &self.assisted {
            solutions.push((Heuristic::AssistedAnnealing, &assisted.solution));
        }
        solutions
    }
}

/// Owns one graph and its shortest-path table and runs the heuristics on it.
///
/// The table is computed once in [`CvrpSolver::new`] and shared read-only by
/// every heuristic.
pub struct CvrpSolver {
    pub graph: Graph,
    pub table: ShortestPathTable,
    pub config: AnnealingConfig,
}

impl CvrpSolver {
    /// Create a solver, computing the shortest-path table for the graph.
    pub fn new(graph: Graph, config: AnnealingConfig) -> Self {
        let table = ShortestPathTable::calculate(&graph);
        CvrpSolver {
            graph,
            table,
            config,
        }
    }

    pub fn repair(&self) -> RouteRepair<'_> {
        RouteRepair::new(&self.graph, &self.table)
    }

    pub fn greedy(&self) -> CvrpResult<Construction> {
        Greedy::new(&self.graph, &self.table).solve()
    }

    pub fn decode(&self, oracle: &dyn ScoringOracle) -> CvrpResult<Construction> {
        OracleDecoder::new(&self.graph, &self.table, oracle).solve()
    }

    /// Baseline annealing from `initial`.
    pub fn anneal(&self, initial: &[usize]) -> CvrpResult<AnnealingOutcome> {
        SimulatedAnnealing::new(&self.graph, &self.table, self.config.clone()).solve(initial)
    }

    /// Oracle-assisted annealing from `initial`.
    pub fn anneal_assisted(
        &self,
        initial: &[usize],
        oracle: &dyn ScoringOracle,
    ) -> CvrpResult<AnnealingOutcome> {
        SimulatedAnnealing::new(&self.graph, &self.table, self.config.clone())
            .with_oracle(oracle)
            .solve(initial)
    }

    /// Run greedy construction followed by baseline annealing and, when an
    /// oracle is given, the oracle decoder and assisted annealing.
    pub fn run(&self, oracle: Option<&dyn ScoringOracle>) -> CvrpResult<RunReport> {
        let start = Instant::now();
        self.config.validate()?;

        let greedy = self.greedy()?;
        let decoder = oracle.map(|o| self.decode(o)).transpose()?;
        let annealing = self.anneal(greedy.permutation())?;
        let assisted = oracle
            .map(|o| self.anneal_assisted(greedy.permutation(), o))
            .transpose()?;

        Ok(self.report(greedy, decoder, annealing, assisted, start.elapsed()))
    }

    /// Same as [`CvrpSolver::run`], but the searches following the greedy
    /// construction run on separate threads sharing the table.
    pub fn run_concurrent(
        &self,
        oracle: Option<&(dyn ScoringOracle + Sync)>,
    ) -> CvrpResult<RunReport> {
        let start = Instant::now();
        self.config.validate()?;

        let greedy = self.greedy()?;
        let initial = greedy.permutation();

        let (decoder, annealing, assisted) = thread::scope(|scope| {
            let annealing = scope.spawn(|| self.anneal(initial));
            let assisted = oracle.map(|o| scope.spawn(move || self.anneal_assisted(initial, o)));
            let decoder = oracle.map(|o| self.decode(o));

            let annealing = join(annealing);
            let assisted = assisted.map(join);
            (decoder, annealing, assisted)
        });

        Ok(self.report(
            greedy,
            decoder.transpose()?,
            annealing?,
            assisted.transpose()?,
            start.elapsed(),
        ))
    }

    fn report(
        &self,
        greedy: Construction,
        decoder: Option<Construction>,
        annealing: AnnealingOutcome,
        assisted: Option<AnnealingOutcome>,
        run_time: Duration,
    ) -> RunReport {
        info!(
            "{}: greedy {:.2}, annealing {:.2}{}",
            self.graph.name,
            greedy.distance(),
            annealing.solution.distance,
            assisted
                .as_ref()
                .map(|a| format!(", assisted {:.2}", a.solution.distance))
                .unwrap_or_default()
        );

        RunReport {
            name: self.graph.name.clone(),
            size: self.graph.size(),
            greedy,
            decoder,
            annealing,
            assisted,
            run_time,
        }
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

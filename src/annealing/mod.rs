//! Simulated annealing over customer permutations.
//!
//! Each iteration perturbs the current permutation, repairs it into a
//! feasible visitation order, evaluates the distance of the repaired route
//! and accepts it by the Metropolis criterion. The temperature cools
//! geometrically and the search stops once it drops to 1 or below.
//!
//! Two variants share the loop. The baseline variant draws relocate and swap
//! moves uniformly. The assisted variant only relocates and, with
//! [`AnnealingConfig::guided_probability`], lets a [`ScoringOracle`] choose
//! the element to move.

pub mod moves;

use crate::config::AnnealingConfig;
use crate::error::CvrpResult;
use crate::graph::Graph;
use crate::oracle::ScoringOracle;
use crate::repair::RouteRepair;
use crate::shortest_path::ShortestPathTable;
use crate::solution::Solution;
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use self::moves::Move;

/// Result of an annealing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnealingOutcome {
    /// Best solution found, expanded into a concrete route
    pub solution: Solution,
    /// Objective of the starting permutation
    pub initial_distance: f64,
    /// Number of iterations performed
    pub iterations: usize,
    /// Number of candidates accepted as current
    pub accepted: usize,
    /// Number of times the best solution improved
    pub improvements: usize,
}

pub struct SimulatedAnnealing<'a> {
    graph: &'a Graph,
    table: &'a ShortestPathTable,
    config: AnnealingConfig,
    oracle: Option<&'a dyn ScoringOracle>,
    rng: ChaCha8Rng,
}

impl<'a> SimulatedAnnealing<'a> {
    /// Create the baseline variant.
    pub fn new(graph: &'a Graph, table: &'a ShortestPathTable, config: AnnealingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        SimulatedAnnealing {
            graph,
            table,
            config,
            oracle: None,
            rng,
        }
    }

    /// Turn this search into the assisted variant.
    pub fn with_oracle(mut self, oracle: &'a dyn ScoringOracle) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn is_assisted(&self) -> bool {
        self.oracle.is_some()
    }

    /// Run the search starting from `initial`, typically the greedy
    /// permutation.
    pub fn solve(&mut self, initial: &[usize]) -> CvrpResult<AnnealingOutcome> {
        self.config.validate()?;
        let repair = RouteRepair::new(self.graph, self.table);

        let mut current = initial.to_vec();
        let mut current_distance = repair.objective(&current)?;
        let mut best = current.clone();
        let mut best_distance = current_distance;
        let initial_distance = current_distance;

        let mut iterations = 0;
        let mut accepted = 0;
        let mut improvements = 0;
        let mut temperature = self.config.starting_temperature;

        while temperature > 1.0 {
            let neighbor = self.next_move(&current)?.apply(&current);
            let candidate = repair.fix_permutation(&neighbor)?;
            let distance = repair.objective(&candidate)?;

            if distance < best_distance {
                trace!(
                    "Iteration {}: best improved {:.2} -> {:.2}",
                    iterations,
                    best_distance,
                    distance
                );
                best = candidate.clone();
                best_distance = distance;
                improvements += 1;
            }

            let accept = if distance < current_distance {
                true
            } else {
                let probability = (-(distance - current_distance) / temperature).exp();
                self.rng.gen::<f64>() < probability
            };
            if accept {
                current = candidate;
                current_distance = distance;
                accepted += 1;
            }

            temperature *= self.config.lambda;
            iterations += 1;
        }

        let route = repair.to_route(&best)?;
        debug!(
            "{} annealing: {} iterations, {} accepted, distance {:.2} -> {:.2}",
            if self.is_assisted() { "Assisted" } else { "Baseline" },
            iterations,
            accepted,
            initial_distance,
            route.distance
        );

        Ok(AnnealingOutcome {
            solution: Solution::new(route, best),
            initial_distance,
            iterations,
            accepted,
            improvements,
        })
    }

    /// Draw the next move for the configured variant.
    fn next_move(&mut self, current: &[usize]) -> CvrpResult<Move> {
        let len = current.len();
        let draw = self.rng.gen::<f64>();

        match self.oracle {
            None if draw < self.config.swap_probability => Ok(moves::random_swap(len, &mut self.rng)),
            None => Ok(moves::random_relocate(len, &mut self.rng)),
            Some(oracle) if draw < self.config.guided_probability => moves::guided_relocate(
                current,
                self.graph.depot(),
                self.graph.size(),
                oracle,
                &mut self.rng,
            ),
            Some(_) => Ok(moves::random_relocate(len, &mut self.rng)),
        }
    }
}

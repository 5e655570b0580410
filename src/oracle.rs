//! Scoring oracles used to bias move selection and construction.
//!
//! An oracle answers one question: given the node the vehicle stands on, how
//! much does it prefer each node of the graph as the next one? Higher scores
//! mean stronger preference. How the scores are produced (a learned embedding,
//! a heuristic, a file) is irrelevant to the search.

use crate::error::{CvrpError, CvrpResult};
use crate::shortest_path::ShortestPathTable;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Capability returning one preference score per node for "next after `node`".
pub trait ScoringOracle {
    fn score(&self, node: usize) -> Vec<f64>;
}

impl<F> ScoringOracle for F
where
    F: Fn(usize) -> Vec<f64>,
{
    fn score(&self, node: usize) -> Vec<f64> {
        self(node)
    }
}

/// Fetch the scores for `node` and check they cover all `size` nodes.
pub(crate) fn checked_scores(
    oracle: &dyn ScoringOracle,
    node: usize,
    size: usize,
) -> CvrpResult<Vec<f64>> {
    let scores = oracle.score(node);
    if scores.len() != size {
        return Err(CvrpError::OracleMismatch {
            expected: size,
            actual: scores.len(),
        });
    }
    Ok(scores)
}

/// A precomputed score matrix: row `i` holds the scores for "next after `i`".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub scores: Vec<Vec<f64>>,
}

impl ScoreTable {
    pub fn new(scores: Vec<Vec<f64>>) -> Self {
        ScoreTable { scores }
    }

    /// Build a square table of `size` rows from a scoring function.
    pub fn from_fn<F>(size: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let scores = (0..size)
            .map(|from| (0..size).map(|to| f(from, to)).collect())
            .collect();
        ScoreTable { scores }
    }

    /// Prefer nodes that are close by shortest-path distance.
    ///
    /// The node itself and unreachable nodes score negative infinity.
    pub fn proximity(table: &ShortestPathTable) -> Self {
        Self::from_fn(table.size(), |from, to| match table.distance(from, to) {
            Some(distance) if from != to => -distance,
            _ => f64::NEG_INFINITY,
        })
    }

    /// Load a JSON matrix of scores (an array of rows).
    pub fn from_file<P: AsRef<Path>>(path: P) -> CvrpResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let scores: Vec<Vec<f64>> = serde_json::from_reader(reader)?;
        Ok(ScoreTable { scores })
    }

    pub fn size(&self) -> usize {
        self.scores.len()
    }
}

impl ScoringOracle for ScoreTable {
    fn score(&self, node: usize) -> Vec<f64> {
        self.scores.get(node).cloned().unwrap_or_default()
    }
}

//! Error types shared by every component of the crate.

use thiserror::Error;

/// Errors raised while building an instance or running a heuristic on it.
#[derive(Debug, Error)]
pub enum CvrpError {
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("invalid vehicle capacity {0}")]
    InvalidCapacity(f64),
    #[error("invalid demand {demand} for node {node}")]
    InvalidDemand { node: usize, demand: f64 },
    #[error("infeasible instance: node {node} demands {demand} but vehicle capacity is {capacity}")]
    DemandExceedsCapacity {
        node: usize,
        demand: f64,
        capacity: f64,
    },
    #[error("invalid edge {from}-{to} with weight {weight}")]
    InvalidEdge { from: usize, to: usize, weight: f64 },
    #[error("infeasible instance: node {node} is not reachable from the depot")]
    Disconnected { node: usize },
    #[error("unknown node {0}")]
    UnknownNode(usize),
    #[error("no path from node {from} to node {to}")]
    Unreachable { from: usize, to: usize },
    #[error("scoring oracle returned {actual} scores, expected one per node ({expected})")]
    OracleMismatch { expected: usize, actual: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type CvrpResult<T> = Result<T, CvrpError>;

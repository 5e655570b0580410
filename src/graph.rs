//! Graph model and instance definition for the CVRP.

use crate::error::{CvrpError, CvrpResult};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{Bfs, EdgeRef};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Id of the depot node.
pub const DEPOT: usize = 0;

/// An undirected weighted edge as stored in an instance file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

impl EdgeSpec {
    pub fn new(from: usize, to: usize, weight: f64) -> Self {
        EdgeSpec { from, to, weight }
    }
}

/// Serialized form of a CVRP instance.
///
/// Node ids are positions in `demands`; node 0 is the depot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub capacity: f64,
    pub demands: Vec<f64>,
    pub edges: Vec<EdgeSpec>,
}

impl Instance {
    /// Load an instance from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CvrpResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Save the instance as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CvrpResult<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// A validated CVRP graph.
///
/// Node weights hold demands, edge weights hold lengths. Every value of this
/// type is connected, has a zero-demand depot at id 0 and no demand above the
/// vehicle capacity.
#[derive(Debug, Clone)]
pub struct Graph {
    pub name: String,
    inner: UnGraph<f64, f64>,
    capacity: f64,
}

impl Graph {
    /// Build a graph from node demands and undirected edges.
    ///
    /// Parallel edges between the same pair of nodes are merged, keeping the
    /// shortest one.
    pub fn new(
        name: impl Into<String>,
        capacity: f64,
        demands: Vec<f64>,
        edges: &[EdgeSpec],
    ) -> CvrpResult<Self> {
        if demands.is_empty() {
            return Err(CvrpError::EmptyGraph);
        }
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(CvrpError::InvalidCapacity(capacity));
        }

        let mut inner = UnGraph::with_capacity(demands.len(), edges.len());

        for (node, &demand) in demands.iter().enumerate() {
            if !demand.is_finite() || demand < 0.0 || (node == DEPOT && demand != 0.0) {
                return Err(CvrpError::InvalidDemand { node, demand });
            }
            if demand > capacity {
                return Err(CvrpError::DemandExceedsCapacity {
                    node,
                    demand,
                    capacity,
                });
            }
            inner.add_node(demand);
        }

        let size = demands.len();
        for edge in edges {
            let valid = edge.from < size
                && edge.to < size
                && edge.from != edge.to
                && edge.weight.is_finite()
                && edge.weight > 0.0;
            if !valid {
                return Err(CvrpError::InvalidEdge {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.weight,
                });
            }

            let a = NodeIndex::new(edge.from);
            let b = NodeIndex::new(edge.to);
            match inner.find_edge(a, b) {
                Some(existing) if inner[existing] <= edge.weight => {}
                Some(existing) => inner[existing] = edge.weight,
                None => {
                    inner.add_edge(a, b, edge.weight);
                }
            }
        }

        let graph = Graph {
            name: name.into(),
            inner,
            capacity,
        };
        graph.check_connected()?;

        Ok(graph)
    }

    /// Build a graph from a deserialized instance.
    pub fn from_instance(instance: Instance) -> CvrpResult<Self> {
        Graph::new(
            instance.name,
            instance.capacity,
            instance.demands,
            &instance.edges,
        )
    }

    /// Convert the graph back into its serialized form.
    pub fn to_instance(&self) -> Instance {
        let edges = self
            .inner
            .edge_references()
            .map(|e| EdgeSpec::new(e.source().index(), e.target().index(), *e.weight()))
            .collect();

        Instance {
            name: self.name.clone(),
            capacity: self.capacity,
            demands: self.demands(),
            edges,
        }
    }

    fn check_connected(&self) -> CvrpResult<()> {
        let mut bfs = Bfs::new(&self.inner, NodeIndex::new(DEPOT));
        while bfs.next(&self.inner).is_some() {}

        match (0..self.size()).find(|&node| !bfs.discovered.contains(node)) {
            Some(node) => Err(CvrpError::Disconnected { node }),
            None => Ok(()),
        }
    }

    /// Neighbors of a node together with the connecting edge length.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.inner.edges(NodeIndex::new(node)).map(move |e| {
            let other = if e.source().index() == node {
                e.target()
            } else {
                e.source()
            };
            (other.index(), *e.weight())
        })
    }

    /// All edges as `(from, to, weight)` triples, each undirected edge once.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.inner
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    /// Demand of a node. Panics if `node` is not part of the graph.
    pub fn demand(&self, node: usize) -> f64 {
        self.inner[NodeIndex::new(node)]
    }

    /// A copy of all demands indexed by node id.
    pub fn demands(&self) -> Vec<f64> {
        self.inner.node_weights().copied().collect()
    }

    pub fn depot(&self) -> usize {
        DEPOT
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Number of nodes, depot included.
    pub fn size(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn contains(&self, node: usize) -> bool {
        node < self.size()
    }

    /// Customer ids in ascending order.
    pub fn customers(&self) -> impl Iterator<Item = usize> {
        (DEPOT + 1)..self.size()
    }

    pub fn total_demand(&self) -> f64 {
        self.inner.node_weights().sum()
    }
}

/// Remaining demand per node, owned by a single repair or construction run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandLedger {
    remaining: Vec<f64>,
}

impl DemandLedger {
    /// A fresh ledger holding the full demand of every node.
    pub fn new(graph: &Graph) -> Self {
        DemandLedger {
            remaining: graph.demands(),
        }
    }

    pub fn from_demands(remaining: Vec<f64>) -> Self {
        DemandLedger { remaining }
    }

    /// Remaining demand of a node, zero for unknown ids.
    pub fn remaining(&self, node: usize) -> f64 {
        self.remaining.get(node).copied().unwrap_or(0.0)
    }

    /// Serve a node: returns its remaining demand and zeroes it.
    pub fn take(&mut self, node: usize) -> f64 {
        match self.remaining.get_mut(node) {
            Some(demand) => std::mem::take(demand),
            None => 0.0,
        }
    }

    /// True once every demand has been served.
    pub fn is_clear(&self) -> bool {
        self.remaining.iter().all(|&d| d == 0.0)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

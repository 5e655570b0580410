//! All-pairs shortest paths with first-hop pointers (Floyd–Warshall).
//!
//! The table is computed once per graph and is read-only afterwards, so a
//! single `ShortestPathTable` can be shared by reference between any number
//! of concurrently running heuristics.

use crate::graph::Graph;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One entry of the shortest-path table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// A path exists; `next_hop` is the first node after the origin.
    Reachable { distance: f64, next_hop: usize },
    Unreachable,
}

impl Cell {
    pub fn distance(&self) -> Option<f64> {
        match *self {
            Cell::Reachable { distance, .. } => Some(distance),
            Cell::Unreachable => None,
        }
    }

    pub fn next_hop(&self) -> Option<usize> {
        match *self {
            Cell::Reachable { next_hop, .. } => Some(next_hop),
            Cell::Unreachable => None,
        }
    }

    fn distance_or_infinity(&self) -> f64 {
        self.distance().unwrap_or(f64::INFINITY)
    }
}

/// Square matrix of shortest distances and next hops, stored row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortestPathTable {
    size: usize,
    cells: Vec<Cell>,
}

impl ShortestPathTable {
    /// Compute the table for a graph.
    pub fn calculate(graph: &Graph) -> Self {
        Self::from_edges(graph.size(), graph.edges())
    }

    /// Compute the table for `size` nodes connected by undirected edges.
    ///
    /// Edges referring to nodes outside `0..size` are ignored, and so are
    /// edges whose weight is not positive and finite.
    pub fn from_edges<I>(size: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let start = Instant::now();
        let mut cells = vec![Cell::Unreachable; size * size];

        for (a, b, weight) in edges {
            if a >= size || b >= size || !(weight.is_finite() && weight > 0.0) {
                continue;
            }
            for (from, to) in [(a, b), (b, a)] {
                let cell = &mut cells[from * size + to];
                if weight < cell.distance_or_infinity() {
                    *cell = Cell::Reachable {
                        distance: weight,
                        next_hop: to,
                    };
                }
            }
        }

        for i in 0..size {
            cells[i * size + i] = Cell::Reachable {
                distance: 0.0,
                next_hop: i,
            };
        }

        for k in 0..size {
            for i in 0..size {
                let (to_k, hop_to_k) = match cells[i * size + k] {
                    Cell::Reachable { distance, next_hop } => (distance, next_hop),
                    Cell::Unreachable => continue,
                };

                for j in 0..size {
                    let from_k = match cells[k * size + j] {
                        Cell::Reachable { distance, .. } => distance,
                        Cell::Unreachable => continue,
                    };

                    let candidate = to_k + from_k;
                    let cell = &mut cells[i * size + j];
                    if candidate < cell.distance_or_infinity() {
                        // Keep the first hop towards k, not k itself, so that
                        // paths can be rebuilt by following next hops.
                        *cell = Cell::Reachable {
                            distance: candidate,
                            next_hop: hop_to_k,
                        };
                    }
                }
            }
        }

        debug!(
            "Computed shortest paths for {} nodes in {:?}",
            size,
            start.elapsed()
        );

        ShortestPathTable { size, cells }
    }

    /// Number of nodes covered by the table.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The raw cell for an ordered pair, `Unreachable` for unknown ids.
    pub fn cell(&self, from: usize, to: usize) -> Cell {
        if from >= self.size || to >= self.size {
            return Cell::Unreachable;
        }
        self.cells[from * self.size + to]
    }

    /// Shortest distance between two nodes, `None` if no path exists.
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.cell(from, to).distance()
    }

    /// Nodes of the shortest path from `from` to `to`, excluding `from` and
    /// ending with `to`. Empty when `from == to`, `None` when unreachable.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        self.hops(from, to)
            .map(|hops| hops.map(|(node, _)| node).collect())
    }

    /// Lazily walk the shortest path from `from` to `to`, yielding each node
    /// together with the length of the hop leading to it.
    pub fn hops(&self, from: usize, to: usize) -> Option<Hops<'_>> {
        self.cell(from, to).next_hop()?;
        Some(Hops {
            table: self,
            current: from,
            target: to,
        })
    }
}

/// Iterator over the hops of a shortest path, see [`ShortestPathTable::hops`].
#[derive(Debug, Clone)]
pub struct Hops<'a> {
    table: &'a ShortestPathTable,
    current: usize,
    target: usize,
}

impl Hops<'_> {
    /// The node the walk currently stands on.
    pub fn position(&self) -> usize {
        self.current
    }
}

impl Iterator for Hops<'_> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.target {
            return None;
        }

        let next = self.table.cell(self.current, self.target).next_hop()?;
        let weight = self.table.distance(self.current, next)?;
        self.current = next;

        Some((next, weight))
    }
}

//! Random instance generation.
//!
//! A random walk over the nodes, starting at the depot, connects every node
//! the first time it is visited. This yields a uniform random spanning tree,
//! so the graph is always connected. Random extra edges are then added until
//! the requested edge count is reached. Edge lengths and demands are drawn
//! from normal distributions.

use crate::config::GeneratorConfig;
use crate::error::{CvrpError, CvrpResult};
use crate::graph::{EdgeSpec, Graph, DEPOT};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::collections::HashSet;

/// Generate a random instance, seeded from the configuration.
pub fn generate(config: &GeneratorConfig) -> CvrpResult<Graph> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generate_with(config, &mut rng)
}

/// Generate a random instance using the given random source.
pub fn generate_with<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> CvrpResult<Graph> {
    let size = config.size;
    if size == 0 {
        return Err(CvrpError::EmptyGraph);
    }
    config.validate()?;

    let edge_length = normal(config.edge_length_mean, config.edge_length_deviation, "edge length")?;
    let demand = normal(config.demand_mean, config.demand_deviation, "demand")?;

    let max_edges = size * (size - 1) / 2;
    let target_edges = config.edges.clamp(size - 1, max_edges);

    let mut edges = Vec::with_capacity(target_edges);
    let mut connected: HashSet<(usize, usize)> = HashSet::with_capacity(target_edges);
    let mut add_edge = |a: usize, b: usize, rng: &mut R, edges: &mut Vec<EdgeSpec>| {
        if a == b || !connected.insert((a.min(b), a.max(b))) {
            return false;
        }
        let weight = edge_length.sample(rng).abs().max(f64::EPSILON);
        edges.push(EdgeSpec::new(a, b, weight));
        true
    };

    let mut in_tree = vec![false; size];
    in_tree[DEPOT] = true;
    let mut missing = size - 1;
    let mut current = DEPOT;
    while missing > 0 {
        let next = rng.gen_range(0..size);
        if !in_tree[next] {
            add_edge(current, next, rng, &mut edges);
            in_tree[next] = true;
            missing -= 1;
        }
        current = next;
    }

    while edges.len() < target_edges {
        let a = rng.gen_range(0..size);
        let b = rng.gen_range(0..size);
        add_edge(a, b, rng, &mut edges);
    }

    // Negative draws are reflected and large ones clamped so that no single
    // customer exceeds the vehicle capacity.
    let demands = (0..size)
        .map(|node| {
            if node == DEPOT {
                0.0
            } else {
                demand.sample(rng).abs().min(config.capacity)
            }
        })
        .collect();

    debug!(
        "Generated instance with {} nodes and {} edges",
        size,
        edges.len()
    );

    Graph::new(
        format!("random-n{}-e{}", size, edges.len()),
        config.capacity,
        demands,
        &edges,
    )
}

fn normal(mean: f64, deviation: f64, what: &str) -> CvrpResult<Normal<f64>> {
    Normal::new(mean, deviation)
        .map_err(|e| CvrpError::InvalidConfig(format!("{} distribution: {}", what, e)))
}

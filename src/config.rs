//! Configuration parameters for instance generation and the search heuristics.

use crate::error::{CvrpError, CvrpResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Settings for the simulated annealing search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Geometric cooling factor, in (0, 1)
    pub lambda: f64,
    /// Temperature of the first iteration; the search stops at or below 1
    pub starting_temperature: f64,
    /// Baseline variant: probability of a swap instead of a relocate move
    pub swap_probability: f64,
    /// Assisted variant: probability that the relocated element is picked
    /// by the oracle instead of uniformly at random
    pub guided_probability: f64,
    /// Seed of the random source, `None` seeds from system entropy
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            lambda: 0.995,
            starting_temperature: 1000.0,
            swap_probability: 0.5,
            guided_probability: 0.5,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        AnnealingConfig::default()
    }

    /// Set the cooling factor.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Set the starting temperature.
    pub fn with_starting_temperature(mut self, temperature: f64) -> Self {
        self.starting_temperature = temperature;
        self
    }

    /// Set the swap probability of the baseline variant.
    pub fn with_swap_probability(mut self, probability: f64) -> Self {
        self.swap_probability = probability;
        self
    }

    /// Set the oracle-guided move probability of the assisted variant.
    pub fn with_guided_probability(mut self, probability: f64) -> Self {
        self.guided_probability = probability;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of iterations the cooling schedule allows, zero for an invalid
    /// schedule.
    pub fn iterations(&self) -> usize {
        if !(self.lambda > 0.0 && self.lambda < 1.0) || !self.starting_temperature.is_finite() {
            return 0;
        }

        // Replays the cooling so that rounding matches the search loop.
        let mut temperature = self.starting_temperature;
        let mut iterations = 0;
        while temperature > 1.0 {
            temperature *= self.lambda;
            iterations += 1;
        }
        iterations
    }

    pub fn validate(&self) -> CvrpResult<()> {
        if !(self.lambda > 0.0 && self.lambda < 1.0) {
            return Err(CvrpError::InvalidConfig(format!(
                "lambda must be in (0, 1), got {}",
                self.lambda
            )));
        }
        if !self.starting_temperature.is_finite() {
            return Err(CvrpError::InvalidConfig(format!(
                "starting temperature must be finite, got {}",
                self.starting_temperature
            )));
        }
        for (name, p) in [
            ("swap probability", self.swap_probability),
            ("guided probability", self.guided_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CvrpError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

/// Settings for random instance generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of nodes, depot included
    pub size: usize,
    /// Target number of undirected edges
    pub edges: usize,
    /// Mean of the edge length distribution
    pub edge_length_mean: f64,
    /// Standard deviation of the edge length distribution
    pub edge_length_deviation: f64,
    /// Mean of the customer demand distribution
    pub demand_mean: f64,
    /// Standard deviation of the customer demand distribution
    pub demand_deviation: f64,
    /// Vehicle capacity
    pub capacity: f64,
    /// Seed of the random source, `None` seeds from system entropy
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            size: 50,
            edges: 63,
            edge_length_mean: 150.0,
            edge_length_deviation: 25.0,
            demand_mean: 30.0,
            demand_deviation: 10.0,
            capacity: 100.0,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        GeneratorConfig::default()
    }

    /// Set the number of nodes.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the target number of edges.
    pub fn with_edges(mut self, edges: usize) -> Self {
        self.edges = edges;
        self
    }

    /// Set the edge length distribution.
    pub fn with_edge_length(mut self, mean: f64, deviation: f64) -> Self {
        self.edge_length_mean = mean;
        self.edge_length_deviation = deviation;
        self
    }

    /// Set the demand distribution.
    pub fn with_demand(mut self, mean: f64, deviation: f64) -> Self {
        self.demand_mean = mean;
        self.demand_deviation = deviation;
        self
    }

    /// Set the vehicle capacity.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that both distributions have a finite mean and a finite,
    /// non-negative deviation.
    pub fn validate(&self) -> CvrpResult<()> {
        for (name, mean, deviation) in [
            ("edge length", self.edge_length_mean, self.edge_length_deviation),
            ("demand", self.demand_mean, self.demand_deviation),
        ] {
            if !mean.is_finite() {
                return Err(CvrpError::InvalidConfig(format!(
                    "{} mean must be finite, got {}",
                    name, mean
                )));
            }
            if !deviation.is_finite() || deviation < 0.0 {
                return Err(CvrpError::InvalidConfig(format!(
                    "{} deviation must be finite and non-negative, got {}",
                    name, deviation
                )));
            }
        }
        Ok(())
    }
}

/// Complete run configuration, loadable from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub annealing: AnnealingConfig,
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file. Missing fields keep their
    /// default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CvrpResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }
}

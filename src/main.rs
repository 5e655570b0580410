use std::path::PathBuf;

use clap::Parser;
use log::info;

use cvrp_heuristics::config::Config;
use cvrp_heuristics::generator;
use cvrp_heuristics::graph::{Graph, Instance};
use cvrp_heuristics::oracle::{ScoreTable, ScoringOracle};
use cvrp_heuristics::utils::{print_report, save_report_json, save_result_log};
use cvrp_heuristics::CvrpSolver;

/// Greedy construction and simulated annealing for the CVRP on sparse graphs.
#[derive(Debug, Parser)]
#[command(name = "cvrp-heuristics", version, about)]
struct Cli {
    /// Instance file (JSON); a random instance is generated when omitted
    #[arg(short, long)]
    instance: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of nodes of a generated instance
    #[arg(long)]
    size: Option<usize>,

    /// Number of edges of a generated instance
    #[arg(long)]
    edges: Option<usize>,

    /// Vehicle capacity of a generated instance
    #[arg(long)]
    capacity: Option<f64>,

    /// Seed for instance generation and the searches
    #[arg(long)]
    seed: Option<u64>,

    /// Cooling factor of the annealing schedule
    #[arg(long)]
    lambda: Option<f64>,

    /// Starting temperature of the annealing schedule
    #[arg(long)]
    temperature: Option<f64>,

    /// Score matrix (JSON) for the oracle-assisted heuristics
    #[arg(long, conflicts_with = "proximity")]
    scores: Option<PathBuf>,

    /// Use shortest-path proximity as the oracle
    #[arg(long)]
    proximity: bool,

    /// Save the instance used for the run
    #[arg(long)]
    save_instance: Option<PathBuf>,

    /// Write the result log (size, then code,distance lines)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Run the searches on separate threads
    #[arg(long)]
    concurrent: bool,
}

impl Cli {
    fn config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::new(),
        };

        if let Some(size) = self.size {
            config.generator.size = size;
        }
        if let Some(edges) = self.edges {
            config.generator.edges = edges;
        }
        if let Some(capacity) = self.capacity {
            config.generator.capacity = capacity;
        }
        if let Some(seed) = self.seed {
            config.generator.seed = Some(seed);
            config.annealing.seed = Some(seed);
        }
        if let Some(lambda) = self.lambda {
            config.annealing.lambda = lambda;
        }
        if let Some(temperature) = self.temperature {
            config.annealing.starting_temperature = temperature;
        }

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config()?;
    config.annealing.validate()?;

    let graph = match &cli.instance {
        Some(path) => {
            info!("Loading instance from: {}", path.display());
            Graph::from_instance(Instance::from_file(path)?)?
        }
        None => {
            info!(
                "Generating instance with {} nodes and {} edges",
                config.generator.size, config.generator.edges
            );
            generator::generate(&config.generator)?
        }
    };
    info!(
        "Instance {}: {} nodes, {} edges, capacity {}",
        graph.name,
        graph.size(),
        graph.edge_count(),
        graph.capacity()
    );

    if let Some(path) = &cli.save_instance {
        graph.to_instance().save(path)?;
        info!("Saved instance to: {}", path.display());
    }

    let solver = CvrpSolver::new(graph, config.annealing.clone());
    info!(
        "Annealing schedule: {} iterations",
        solver.config.iterations()
    );

    let oracle = match (&cli.scores, cli.proximity) {
        (Some(path), _) => Some(ScoreTable::from_file(path)?),
        (None, true) => Some(ScoreTable::proximity(&solver.table)),
        (None, false) => None,
    };

    let report = if cli.concurrent {
        solver.run_concurrent(oracle.as_ref().map(|o| o as &(dyn ScoringOracle + Sync)))?
    } else {
        solver.run(oracle.as_ref().map(|o| o as &dyn ScoringOracle))?
    };

    print_report(&report, solver.graph.depot());

    if let Some(path) = &cli.log {
        save_result_log(&report, path)?;
        info!("Saved result log to: {}", path.display());
    }
    if let Some(path) = &cli.json {
        save_report_json(&report, path)?;
        info!("Saved report to: {}", path.display());
    }

    Ok(())
}

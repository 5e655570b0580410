//! Basic example of using the CVRP heuristics library.

use cvrp_heuristics::config::{AnnealingConfig, GeneratorConfig};
use cvrp_heuristics::generator::generate;
use cvrp_heuristics::graph::{Graph, Instance};
use cvrp_heuristics::oracle::{ScoreTable, ScoringOracle};
use cvrp_heuristics::utils::{format_duration, print_report, save_result_log};
use cvrp_heuristics::CvrpSolver;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load an instance from the command line or generate one
    let args: Vec<String> = env::args().collect();
    let graph = if args.len() > 1 {
        println!("Loading instance from: {}", &args[1]);
        Graph::from_instance(Instance::from_file(&args[1])?)?
    } else {
        let config = GeneratorConfig::new()
            .with_size(30)
            .with_edges(40)
            .with_seed(2024);
        generate(&config)?
    };
    println!(
        "Instance {} with {} customers and {} edges",
        graph.name,
        graph.size() - 1,
        graph.edge_count()
    );

    let config = AnnealingConfig::new()
        .with_lambda(0.995)
        .with_starting_temperature(1000.0)
        .with_seed(7);

    println!("Computing shortest paths");
    let solver = CvrpSolver::new(graph, config);

    // Shortest-path proximity stands in for a learned oracle
    let oracle = ScoreTable::proximity(&solver.table);

    println!("Running {} annealing iterations", solver.config.iterations());
    let report = solver.run(Some(&oracle as &dyn ScoringOracle))?;

    println!("Search completed in {}", format_duration(report.run_time));
    print_report(&report, solver.graph.depot());

    let output_path = format!("{}.log", report.name);
    println!("Saving result log to: {}", output_path);
    save_result_log(&report, &output_path)?;

    Ok(())
}

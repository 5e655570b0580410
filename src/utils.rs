//! Reporting helpers: formatting routes and writing result logs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use itertools::Itertools;

use crate::solution::{Route, Solution};
use crate::{Heuristic, RunReport};

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Format a route with one trip per line, e.g. `0 1 2 0` then `0 3 0`.
pub fn format_route(route: &Route, depot: usize) -> String {
    let trips = route.trips(depot);
    if trips.is_empty() {
        return route.nodes.iter().join(" ");
    }
    trips.iter().map(|trip| trip.iter().join(" ")).join("\n")
}

/// Format a solution under a heading naming the heuristic.
pub fn format_solution(heuristic: Heuristic, solution: &Solution, depot: usize) -> String {
    format!(
        "_______________________\n{}\nSOLUTION DISTANCE: {:.4}\n_______________________\n{}",
        heuristic.name().to_uppercase(),
        solution.distance,
        format_route(&solution.route, depot)
    )
}

/// Write the result log: the instance size on the first line, then one
/// `code,distance` line per heuristic.
pub fn write_result_log<W: Write>(writer: &mut W, report: &RunReport) -> std::io::Result<()> {
    writeln!(writer, "{}", report.size)?;
    for (heuristic, solution) in report.solutions() {
        writeln!(writer, "{},{:.4}", heuristic.code(), solution.distance)?;
    }
    Ok(())
}

/// Save the result log to a file.
pub fn save_result_log<P: AsRef<Path>>(report: &RunReport, path: P) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_result_log(&mut writer, report)?;
    writer.flush()
}

/// Save the full report as JSON.
pub fn save_report_json<P: AsRef<Path>>(report: &RunReport, path: P) -> crate::error::CvrpResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Print every solution of a report to standard output.
pub fn print_report(report: &RunReport, depot: usize) {
    println!("Instance: {} ({} nodes)", report.name, report.size);
    println!("Run time: {}", format_duration(report.run_time));
    for (heuristic, solution) in report.solutions() {
        println!("{}", format_solution(heuristic, solution, depot));
    }
}

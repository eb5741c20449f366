//! Cliptimizer -- frontier search CLI.
//!
//! Runs the milestone driver from the initial state, reporting pool sizes
//! as it goes, and prints the final Pareto frontier as one state line per
//! row (sorted by simulated time).
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --stride N      Milestone stride in sim-seconds (default: 25)
//!   --horizon N     Exclusive bound on timed milestones (default: 1100)
//!   --cull-every N  Cull interval in sim-seconds, 0 disables (default: 100)
//!   --opt-time T    Drop branches past this sim-time (default: 1026)
//!   --clips C       Clips ceiling for the final stage (default: 15000)
//!   --threads N     Worker threads, 0 = rayon default (default: 0)
//!   --output FILE   Write the frontier as JSONL to FILE
//!   --quiet         Suppress per-milestone progress lines

use std::cmp::Ordering;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use cliptimizer::record;
use cliptimizer::search::{self, SearchConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SearchConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--stride" => {
                i += 1;
                config.stride = args[i].parse().expect("invalid --stride value");
            }
            "--horizon" => {
                i += 1;
                config.horizon = args[i].parse().expect("invalid --horizon value");
            }
            "--cull-every" => {
                i += 1;
                config.cull_interval = args[i].parse().expect("invalid --cull-every value");
            }
            "--opt-time" => {
                i += 1;
                config.opt_time = args[i].parse().expect("invalid --opt-time value");
            }
            "--clips" => {
                i += 1;
                config.final_clips = args[i].parse().expect("invalid --clips value");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let start = Instant::now();
    let mut frontier = search::run_with_progress(&config, |report| {
        if !quiet {
            if report.culled {
                eprintln!(
                    "[{:8.2}s] t={:<7} pool {:>8} -> {:>8}",
                    start.elapsed().as_secs_f64(),
                    report.milestone,
                    report.advanced,
                    report.pool_size,
                );
            } else {
                eprintln!(
                    "[{:8.2}s] t={:<7} pool {:>8}",
                    start.elapsed().as_secs_f64(),
                    report.milestone,
                    report.pool_size,
                );
            }
        }
    });

    frontier.sort_by(|a, b| a.time().partial_cmp(&b.time()).unwrap_or(Ordering::Equal));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for state in &frontier {
        writeln!(out, "{}", state).expect("failed to write state line");
    }
    out.flush().expect("failed to flush stdout");

    let wins = frontier.iter().filter(|s| s.win()).count();
    if !quiet {
        match frontier.iter().find(|s| s.win()) {
            Some(first) => eprintln!(
                "frontier: {} states, {} wins, earliest at {}",
                frontier.len(),
                wins,
                first
            ),
            None => eprintln!("frontier: {} states, no wins", frontier.len()),
        }
    }

    if let Some(path) = output_path {
        let file =
            File::create(&path).unwrap_or_else(|e| panic!("failed to create {}: {}", path, e));
        let mut writer = BufWriter::new(file);
        record::write_jsonl(&frontier, &mut writer)
            .unwrap_or_else(|e| panic!("failed to write {}: {}", path, e));
        if !quiet {
            eprintln!("wrote {} records to {}", frontier.len(), path);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: cliptimizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --stride N      Milestone stride in sim-seconds (default: 25)");
    eprintln!("  --horizon N     Exclusive bound on timed milestones (default: 1100)");
    eprintln!("  --cull-every N  Cull interval in sim-seconds, 0 disables (default: 100)");
    eprintln!("  --opt-time T    Drop branches past this sim-time (default: 1026)");
    eprintln!("  --clips C       Clips ceiling for the final stage (default: 15000)");
    eprintln!("  --threads N     Worker threads, 0 = rayon default (default: 0)");
    eprintln!("  --output FILE   Write the frontier as JSONL to FILE");
    eprintln!("  --quiet         Suppress per-milestone progress lines");
}

//! Cooperative caching simulator CLI.
//!
//! This binary provides a single entry point for simulation runs. It performs:
//! 1. **Run:** Load a JSON configuration (or the defaults), apply overrides, run, report.
//! 2. **Config:** Print the effective default configuration as JSON.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use coopcache_core::config::Config;
use coopcache_core::sim::Simulator;
use coopcache_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "coopsim",
    author,
    version,
    about = "Cooperative caching simulator",
    long_about = "Simulate client caches backed by a shared coordinator and measure cost units and hit ratios.\n\nSet RUST_LOG=coopcache_core=trace to follow every hop.\n\nExamples:\n  coopsim run\n  coopsim run --config cluster.json --requests 50000 --seed 7\n  coopsim run --stats hits --stats cluster\n  coopsim config > cluster.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulation and print the statistics report.
    Run {
        /// JSON configuration file; built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the number of requests.
        #[arg(short, long)]
        requests: Option<usize>,

        /// Override the RNG seed.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Override the number of clients.
        #[arg(long)]
        clients: Option<usize>,

        /// Report sections to print (repeatable); all when omitted.
        #[arg(long = "stats", value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        sections: Vec<String>,
    },

    /// Print the default configuration as JSON.
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            requests,
            seed,
            clients,
            sections,
        } => cmd_run(config, requests, seed, clients, &sections),
        Commands::Config => cmd_config(),
    }
}

/// Loads configuration, applies overrides, runs the simulator and prints the report.
///
/// Exits with code 1 on an invalid configuration or a failed run.
fn cmd_run(
    path: Option<PathBuf>,
    requests: Option<usize>,
    seed: Option<u64>,
    clients: Option<usize>,
    sections: &[String],
) {
    let mut config = match path {
        Some(ref p) => Config::from_json_file(p).unwrap_or_else(|e| {
            eprintln!("Error loading {}: {e}", p.display());
            process::exit(1);
        }),
        None => Config::default(),
    };
    if let Some(n) = requests {
        config.workload.requests = n;
    }
    if let Some(s) = seed {
        config.workload.seed = s;
    }
    if let Some(n) = clients {
        config.client.count = n;
    }

    println!(
        "Configuration: {}",
        path.as_ref()
            .map_or_else(|| "default".to_owned(), |p| p.display().to_string())
    );
    println!(
        "  Clients: {} x {} slots  Coordinator: {} slots  Disk: {} blocks  Policy: {:?}",
        config.client.count,
        config.client.cache_size,
        config.coordinator.cache_size,
        config.coordinator.disk_size,
        config.client.policy
    );
    println!(
        "  Requests: {}  Seed: {}  Distribution: {:?}",
        config.workload.requests, config.workload.seed, config.workload.distribution
    );

    let mut sim = Simulator::new(&config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let outcome = sim.run().map(|_| ());
    sim.stats().print_sections(sections);
    if let Err(e) = outcome {
        eprintln!("\n[!] Run aborted: {e}");
        process::exit(1);
    }
}

/// Prints the default configuration as pretty JSON.
fn cmd_config() {
    match serde_json::to_string_pretty(&Config::default()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

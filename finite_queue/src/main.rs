use std::io::Write;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use finite_queue::scenarios::standard_pair;
use finite_queue::{ConfigError, FIRST_ARRIVAL_TIME, QueueParams, SimulationReport, simulate};

/// Finite-capacity multi-server queue simulation (G/G/c/K)
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Random seed shared by both configurations
    #[arg(long, short, default_value_t = 42)]
    seed: u64,

    /// Random draws allowed per run
    #[arg(long, default_value_t = 100_000)]
    max_draws: u64,

    /// System capacity (K) for both configurations
    #[arg(long, default_value_t = 5)]
    capacity: usize,

    /// Print the reports as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let args = Args::parse();

    let configs: Vec<QueueParams> = standard_pair(args.seed, args.max_draws)
        .into_iter()
        .map(|params| QueueParams {
            capacity: args.capacity,
            ..params
        })
        .collect();
    let reports = configs
        .iter()
        .map(simulate)
        .collect::<Result<Vec<SimulationReport>, ConfigError>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("========================================");
    println!("Finite Queue Simulation");
    println!("========================================");
    let (ia, st) = (configs[0].inter_arrival, configs[0].service);
    println!(
        "Inter-arrival ~ U[{}, {}], service ~ U[{}, {}], first arrival at t={}",
        ia.0, ia.1, st.0, st.1, FIRST_ARRIVAL_TIME
    );
    println!("Seed {}, {} draws per run", args.seed, args.max_draws);

    for report in &reports {
        report.print_summary();
    }
    Ok(())
}

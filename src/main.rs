use nbsim::{RunConfig, run_scenario, generate, save_initial, bench_modes};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Direct-summation N-body integrator")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Integrate the initial conditions and write the trajectory (default)
    Run {
        /// YAML run configuration; defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write a random initial-condition file
    Generate {
        /// Number of bodies
        #[arg(short, long, default_value_t = 1000)]
        number: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(short, long, default_value = "data.in")]
        output: PathBuf,
    },
    /// Time both update modes over a range of system sizes
    Bench {
        #[arg(short, long, default_value_t = 2)]
        turns: usize,
    },
}

// load here to keep main clean
fn load_config(path: Option<PathBuf>) -> Result<RunConfig> {
    match path {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Ok(RunConfig::from_yaml_file(&path)?)
        }
        None => Ok(RunConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command.unwrap_or(Command::Run { config: None }) {
        Command::Run { config } => {
            let cfg = load_config(config)?;
            let report = run_scenario(&cfg).context("simulation failed")?;
            println!("{report}");
        }
        Command::Generate { number, seed, output } => {
            let bodies = generate(number, seed);
            save_initial(&output, &bodies).context("failed to write initial conditions")?;
        }
        Command::Bench { turns } => {
            bench_modes(turns)?;
        }
    }

    Ok(())
}

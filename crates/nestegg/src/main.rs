mod demo;
mod io;
mod logging;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use jiff::civil::Date;
use nestegg_core::config::SimulatorConfig;
use nestegg_core::model::ScenarioProfile;
use nestegg_core::{MonteCarloConfig, StateReport, monte_carlo};

#[derive(Parser, Debug)]
#[command(name = "nestegg")]
#[command(about = "Year-by-year retirement projection for a two-person household")]
struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// First simulated date
    #[arg(long, default_value_t = demo::BEGINNING, global = true)]
    beginning: Date,

    /// Simulate until the youngest person reaches this age
    #[arg(long, default_value_t = 100, global = true)]
    end_age: i16,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate once and print the yearly states as JSON
    Run {
        /// YAML file of growth rates (defaults to steady market growth)
        #[arg(short, long)]
        growth_rates: Option<PathBuf>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Simulate many random scenarios and summarize final net worth
    MonteCarlo {
        #[arg(short, long, default_value_t = 100)]
        iterations: usize,

        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// YAML scenario profile (defaults to a wide grid on every category)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Write the summary here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn emit(json: &str, output: Option<&Path>) -> color_eyre::Result<()> {
    match output {
        Some(path) => {
            io::atomic_write(path, json)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level, args.log_file.as_deref())?;

    let config = SimulatorConfig::starting(args.beginning).with_end_age(args.end_age);
    let mut sim = demo::household(config)?;

    match args.command {
        Command::Run {
            growth_rates,
            output,
        } => {
            let rates = match growth_rates {
                Some(path) => io::load_growth_rates(&path)?,
                None => demo::default_rates(),
            };
            let states = sim.simulate(rates)?;
            let reports: Vec<StateReport> = states.iter().map(|s| s.report()).collect();
            emit(&serde_json::to_string_pretty(&reports)?, output.as_deref())?;
        }
        Command::MonteCarlo {
            iterations,
            seed,
            profile,
            output,
        } => {
            let profile = match profile {
                Some(path) => io::load_profile(&path)?,
                None => ScenarioProfile::wide_grid(),
            };
            let summary = monte_carlo(&mut sim, &profile, &MonteCarloConfig { iterations, seed })?;
            emit(&serde_json::to_string_pretty(&summary)?, output.as_deref())?;
        }
    }

    tracing::info!("done");
    Ok(())
}

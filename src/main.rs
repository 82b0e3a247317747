use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod storage;

use commands::{AlertsCommand, ConfigCommand, PlanCommand, WeightCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "scheda")]
#[command(version)]
#[command(about = "Follow a trainer-assigned workout plan", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the workout plan and its validity
    Plan(PlanCommand),

    /// Record and list exercise weights
    Weight(WeightCommand),

    /// Show the trainer's alerts
    Alerts(AlertsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheda=warn,scheda_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;

    match cli.command {
        Some(Commands::Plan(cmd)) => cmd.run()?,
        Some(Commands::Weight(cmd)) => cmd.run(&config)?,
        Some(Commands::Alerts(cmd)) => cmd.run()?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli.config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

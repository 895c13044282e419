mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "overlap", about = "Crop up to four images to their common overlap")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crop every image to the shared overlap and save plain and inverted results
    Process(commands::process::ProcessArgs),
    /// Show image placement and the overlap rectangle without cropping
    Intersect(commands::intersect::IntersectArgs),
    /// Drive a session from a script of load/move/drag/process steps
    Replay(commands::replay::ReplayArgs),
    /// Print or save the default session config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Intersect(args) => commands::intersect::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod status;

use app::App;

#[derive(Parser)]
#[command(name = "warbot")]
#[command(about = "A battle royale bot that posts one elimination per round")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Roster file, overrides the config
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Directory for generated pictures, overrides the config
    #[arg(short, long)]
    pictures: Option<PathBuf>,

    /// Log posts instead of sending them
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds on a schedule until the game ends
    Run {
        /// Hours between rounds, overrides the config
        #[arg(long)]
        interval_hours: Option<u64>,
    },
    /// Play a single round
    Round,
    /// Print the roster
    Status,
    /// Render the status picture without playing a round
    Render,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    if let Err(e) = warbot::error::logging::init_from_env() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Parse command line arguments
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => warbot::WarbotConfig::from_file(path)?,
        None => warbot::WarbotConfig::default(),
    };
    if let Some(roster) = cli.roster {
        config.battlefield.roster_path = roster;
    }
    if let Some(pictures) = cli.pictures {
        config.battlefield.picture_dir = Some(pictures);
    }
    if let Command::Run { interval_hours: Some(hours) } = &cli.command {
        config.schedule.interval_hours = *hours;
    }
    config.validate()?;

    let app = App::new(config, cli.dry_run);

    match cli.command {
        Command::Run { .. } => app.run().await,
        Command::Round => app.round().await,
        Command::Status => app.status(),
        Command::Render => app.render(),
    }
}

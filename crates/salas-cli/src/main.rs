use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "salas-cli", version, about = "Salas timetable sync CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronization triggers
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
    /// Sync bookkeeping and cache status
    Status,
    /// Cached event queries
    Events {
        #[command(subcommand)]
        action: commands::events::EventsAction,
    },
    /// Clear cached events and sync bookkeeping
    Reset,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Sync { action } => commands::sync::run(action),
        Commands::Status => commands::status::run(),
        Commands::Events { action } => commands::events::run(action),
        Commands::Reset => commands::reset::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

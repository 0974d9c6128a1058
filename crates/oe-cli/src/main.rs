//! Terminal frontend for Office Escape.

mod commands;
mod input;
mod terminal;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_SAVE: &str = "office-escape.json";

#[derive(Parser)]
#[command(
    name = "oe",
    about = "Office Escape: one evening, four ways it can end",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Play {
        /// Save file
        #[arg(short, long, default_value = DEFAULT_SAVE)]
        save: PathBuf,

        /// RNG seed for the typing challenge
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Show saved progress and the ending it currently leads to
    Status {
        /// Save file
        #[arg(short, long, default_value = DEFAULT_SAVE)]
        save: PathBuf,
    },

    /// Erase saved progress
    Reset {
        /// Save file
        #[arg(short, long, default_value = DEFAULT_SAVE)]
        save: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { save, seed } => commands::play::run(&save, seed).await,
        Commands::Status { save } => commands::status::run(&save),
        Commands::Reset { save } => commands::reset::run(&save),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

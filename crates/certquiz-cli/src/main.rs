//! certquiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "certquiz", version, about = "Certification practice quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a new test
    Take {
        /// Your name (prompted interactively when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Question bank JSON file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Results directory
        #[arg(long)]
        results: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List previous test results
    Results {
        /// Results directory
        #[arg(long)]
        results: Option<PathBuf>,

        /// Show the wrong-question review for recent results
        #[arg(long)]
        detailed: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate the question bank
    Validate {
        /// Question bank JSON file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("certquiz=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            name,
            bank,
            results,
            config,
        } => commands::take::execute(name, bank, results, config),
        Commands::Results {
            results,
            detailed,
            config,
        } => commands::results::execute(results, detailed, config),
        Commands::Validate { bank, config } => commands::validate::execute(bank, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

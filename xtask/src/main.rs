// Host tooling crate: unwrap/expect/panic acceptable outside driver code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod card_tables;
mod check;
mod doc;
mod step;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "RT5659 machine driver development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check no_std builds, logging backends, clippy and formatting
    Check,
    /// Run all tests (unit, integration, and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
    /// Assemble the card for a platform descriptor and print its tables
    Card {
        /// JSON platform descriptor; defaults are used when omitted
        #[arg(long)]
        descriptor: Option<std::path::PathBuf>,
        /// Print the card's debug log while assembling
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
        Commands::Card {
            descriptor,
            verbose,
        } => card_tables::run(descriptor.as_deref(), verbose),
    }
}

pub mod search;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// BYOB Search CLI
#[derive(Parser, Debug)]
#[command(name = "byob-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Search the web and get a cited answer from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one search-augmented answer
    Search(search::SearchArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search(args) => search::run_search(args).await,
    }
}

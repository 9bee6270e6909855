//! boatmock CLI - mock gateway for boat records and assets
//!
//! Subcommands:
//! - `serve`: run the HTTP gateway (readonly or writer variant)
//! - `list`: print the aggregated boat listing from a static root

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "boatmock",
    author,
    version,
    about = "Mock HTTP gateway serving boat records, images, and attachments from disk"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP gateway
    Serve(commands::serve::ServeArgs),
    /// Print the aggregated boat listing as JSON
    List(commands::list::ListArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the working directory before clap reads env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::List(args) => commands::run_list(args).await?,
    }
    Ok(())
}

//! Print the boat listing without starting a server

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use boatmock_core::scan_catalog;

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Static root containing data/boat
    #[arg(long, env = "BOATMOCK_ROOT")]
    pub root: Option<PathBuf>,
}

/// Scan the record directory and print the aggregated listing as JSON
pub async fn run_list(args: ListArgs) -> Result<()> {
    let data_dir = super::gateway_config(args.root).data_dir();

    let listing = scan_catalog(&data_dir)
        .await
        .with_context(|| format!("Failed to scan {}", data_dir.display()))?;

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

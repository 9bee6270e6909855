//! Command implementations for the boatmock CLI

use std::path::PathBuf;

use boatmock_core::GatewayConfig;

pub mod list;
pub mod serve;

pub use list::run_list;
pub use serve::run_serve;

/// Explicit `--root` wins, otherwise fall back to the environment
fn gateway_config(root: Option<PathBuf>) -> GatewayConfig {
    root.map(GatewayConfig::with_root).unwrap_or_default()
}

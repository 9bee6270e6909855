//! HTTP server command
//!
//! Runs one of the two mock gateways until Ctrl+C or SIGTERM.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use boatmock_server::{run_server, ServerConfig, Variant};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Which mock server to run (writer adds POST /save-boat)
    #[arg(long, value_enum, default_value_t = Variant::Readonly)]
    pub variant: Variant,

    /// Interface to bind to
    #[arg(long, env = "BOATMOCK_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on (default: 7001 for readonly, 5000 for writer)
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    /// Static root containing data/boat and static/{images,attachments}/boat
    #[arg(long, env = "BOATMOCK_ROOT")]
    pub root: Option<PathBuf>,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        let port = self.port.unwrap_or_else(|| self.variant.default_port());
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, port),
            variant: self.variant,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    let gateway = super::gateway_config(args.root);

    tracing::info!("Starting boatmock gateway on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(gateway, config).await.context("Server error")?;

    Ok(())
}

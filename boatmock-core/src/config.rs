//! Gateway configuration - storage layout and environment loading
//!
//! Configuration is loaded from environment variables:
//! - `BOATMOCK_ROOT`: Static root holding `data/` and `static/` (default: current directory)

use std::path::PathBuf;

/// Environment variable naming the static root
pub const ROOT_ENV: &str = "BOATMOCK_ROOT";

/// Storage layout for boat records and assets
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Static root directory (e.g., /srv/boatmock)
    pub root_dir: PathBuf,
}

impl GatewayConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let root_dir = std::env::var(ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self { root_dir }
    }

    /// Create config with explicit root directory
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Directory of boat record JSON files
    pub fn data_dir(&self) -> PathBuf {
        self.root_dir.join("data").join("boat")
    }

    /// Image tree, one subdirectory per boat id
    pub fn images_dir(&self) -> PathBuf {
        self.root_dir.join("static").join("images").join("boat")
    }

    /// Attachment tree, one subdirectory per boat id
    pub fn attachments_dir(&self) -> PathBuf {
        self.root_dir.join("static").join("attachments").join("boat")
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

//! Asset lookup for boat images and attachments
//!
//! Assets live under `<tree>/<boat id>/<file name>`. Both segments are
//! joined as given; callers are responsible for what they pass in.

use std::path::PathBuf;

use tokio::fs;

use crate::config::GatewayConfig;

/// The two asset trees served by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Attachment,
}

impl AssetKind {
    /// Error message returned when an asset of this kind is absent
    pub fn not_found_message(self) -> &'static str {
        match self {
            Self::Image => "Image not found",
            Self::Attachment => "Attachment not found",
        }
    }
}

impl GatewayConfig {
    /// Root directory of an asset tree
    pub fn asset_dir(&self, kind: AssetKind) -> PathBuf {
        match kind {
            AssetKind::Image => self.images_dir(),
            AssetKind::Attachment => self.attachments_dir(),
        }
    }

    /// Path of a single asset for a boat
    pub fn asset_path(&self, kind: AssetKind, boat_id: &str, name: &str) -> PathBuf {
        self.asset_dir(kind).join(boat_id).join(name)
    }

    /// Image path for a boat
    pub fn image_path(&self, boat_id: &str, name: &str) -> PathBuf {
        self.asset_path(AssetKind::Image, boat_id, name)
    }

    /// Attachment path for a boat
    pub fn attachment_path(&self, boat_id: &str, name: &str) -> PathBuf {
        self.asset_path(AssetKind::Attachment, boat_id, name)
    }
}

/// Resolve an asset to an existing regular file.
///
/// Returns `None` when nothing readable is there; lookup errors count as absence.
pub async fn locate_asset(
    config: &GatewayConfig,
    kind: AssetKind,
    boat_id: &str,
    name: &str,
) -> Option<PathBuf> {
    let path = config.asset_path(kind, boat_id, name);
    match fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => Some(path),
        _ => None,
    }
}

//! boatmock-core: filesystem layer for the boat data gateway
//!
//! Everything the HTTP layer needs from disk:
//! - `catalog`: aggregate boat record JSON files into one listing
//! - `assets`: resolve images and attachments by boat id
//! - `writer`: persist new records under generated names

pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod writer;

pub use assets::{locate_asset, AssetKind};
pub use catalog::{invalid_json_marker, scan_catalog, Listing};
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use writer::{is_empty_payload, save_record};

//! boatmock-server: HTTP gateway over static boat data
//!
//! Axum server with:
//! - `GET /` liveness banner
//! - `GET /boats` record listing
//! - `GET /images/...` and `GET /attachments/...` asset streaming
//! - `POST /save-boat` (writer variant)
//! - Permissive CORS, request tracing, graceful shutdown

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError, Variant};

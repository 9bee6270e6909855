//! Boat record endpoints
//!
//! - `GET /boats` aggregates every record file, rebuilt on each call
//! - `POST /save-boat` stores a new record (writer variant only)

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use boatmock_core::{is_empty_payload, save_record, scan_catalog, GatewayError};

use crate::error::ApiError;
use crate::server::AppState;

/// Content type declared on the listing, whatever axum would pick
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Reply when the save body is missing or empty
pub const NO_JSON_MESSAGE: &str = "Aucun JSON reçu";

/// Reply when a record was written
pub const SAVED_MESSAGE: &str = "JSON sauvegardé avec succès";

/// GET /boats - file name → record (or error marker)
async fn list_boats(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let listing = scan_catalog(&state.gateway.data_dir()).await?;
    let body = serde_json::to_vec(&listing).map_err(GatewayError::from)?;

    tracing::debug!(
        records = listing.len(),
        listing = %String::from_utf8_lossy(&body),
        "Boat listing built"
    );

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
        body,
    )
        .into_response())
}

/// POST /save-boat - write the body as a new record
async fn save_boat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request(NO_JSON_MESSAGE));
    }

    let payload: Value = serde_json::from_slice(&body).map_err(GatewayError::from)?;
    if is_empty_payload(&payload) {
        return Err(ApiError::bad_request(NO_JSON_MESSAGE));
    }

    save_record(&state.gateway.data_dir(), &payload).await?;

    Ok(Json(json!({ "message": SAVED_MESSAGE })))
}

/// Read-only boat routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/boats", get(list_boats))
}

/// Write route, mounted only by the writer variant
pub fn save_router() -> Router<Arc<AppState>> {
    Router::new().route("/save-boat", post(save_boat))
}

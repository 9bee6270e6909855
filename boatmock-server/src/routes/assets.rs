//! Image and attachment endpoints
//!
//! Files are streamed through `ServeFile`, which infers the content type
//! from the extension and handles range/conditional requests.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use boatmock_core::{locate_asset, AssetKind, GatewayConfig};

use crate::error::ApiError;
use crate::server::AppState;

/// GET /images/{id}/{image_name}
async fn get_image(
    State(state): State<Arc<AppState>>,
    Path((id, image_name)): Path<(String, String)>,
    request: Request,
) -> Response {
    serve_asset(&state.gateway, AssetKind::Image, &id, &image_name, request).await
}

/// GET /attachments/{id}/{attachment_name}
async fn get_attachment(
    State(state): State<Arc<AppState>>,
    Path((id, attachment_name)): Path<(String, String)>,
    request: Request,
) -> Response {
    tracing::info!(
        path = %state.gateway.attachment_path(&id, &attachment_name).display(),
        "Attachment requested"
    );
    serve_asset(
        &state.gateway,
        AssetKind::Attachment,
        &id,
        &attachment_name,
        request,
    )
    .await
}

async fn serve_asset(
    gateway: &GatewayConfig,
    kind: AssetKind,
    id: &str,
    name: &str,
    request: Request,
) -> Response {
    let Some(path) = locate_asset(gateway, kind, id, name).await else {
        return ApiError::NotFound {
            message: kind.not_found_message(),
        }
        .into_response();
    };

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

/// Asset routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/images/{id}/{image_name}", get(get_image))
        .route("/attachments/{id}/{attachment_name}", get(get_attachment))
}

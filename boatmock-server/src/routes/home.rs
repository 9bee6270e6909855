//! Liveness banner at the root path

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Root response
#[derive(Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

/// GET /
async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Mock server is running.",
    })
}

/// Home routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}

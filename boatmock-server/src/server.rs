//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS (any origin)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use boatmock_core::GatewayConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes;

/// Which of the two mock servers to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Listing and asset routes only
    #[default]
    Readonly,
    /// Adds `POST /save-boat`
    Writer,
}

impl Variant {
    /// Port used when none is configured
    pub fn default_port(self) -> u16 {
        match self {
            Self::Readonly => 7001,
            Self::Writer => 5000,
        }
    }

    pub fn allows_save(self) -> bool {
        matches!(self, Self::Writer)
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0 on the variant's port)
    pub bind_addr: SocketAddr,

    pub variant: Variant,
}

impl ServerConfig {
    /// All interfaces on the variant's default port
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], variant.default_port())),
            variant,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where records and assets live
    pub gateway: GatewayConfig,
}

/// Build the application router for a variant.
pub fn build_router(gateway: GatewayConfig, variant: Variant) -> Router {
    let mut app = Router::new()
        .merge(routes::home::router())
        .merge(routes::boats::router())
        .merge(routes::assets::router());

    if variant.allows_save() {
        app = app.merge(routes::boats::save_router());
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { gateway }))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let gateway = GatewayConfig::from_env();
/// run_server(gateway, ServerConfig::for_variant(Variant::Writer)).await?;
/// ```
pub async fn run_server(gateway: GatewayConfig, config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        root = %gateway.root_dir.display(),
        variant = ?config.variant,
        "Gateway config loaded"
    );

    let app = build_router(gateway, config.variant);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::warn!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::warn!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::routes::boats::{JSON_UTF8, NO_JSON_MESSAGE, SAVED_MESSAGE};

    fn gateway(temp: &TempDir) -> GatewayConfig {
        let gateway = GatewayConfig::with_root(temp.path());
        std::fs::create_dir_all(gateway.data_dir()).unwrap();
        gateway
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_save(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/save-boat")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 7001);
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.variant, Variant::Readonly);
    }

    #[test]
    fn writer_defaults_to_port_5000() {
        let config = ServerConfig::for_variant(Variant::Writer);
        assert_eq!(config.bind_addr.port(), 5000);
        assert!(config.variant.allows_save());
    }

    #[tokio::test]
    async fn test_home_endpoint() {
        let temp = TempDir::new().unwrap();
        let app = build_router(gateway(&temp), Variant::Readonly);

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Mock server is running."})
        );
    }

    #[tokio::test]
    async fn test_boats_listing() {
        let temp = TempDir::new().unwrap();
        let gateway = gateway(&temp);
        std::fs::write(gateway.data_dir().join("a.json"), r#"{"name": "Aurora"}"#).unwrap();
        std::fs::write(gateway.data_dir().join("b.json"), "not json").unwrap();
        std::fs::write(gateway.data_dir().join("readme.md"), "# boats").unwrap();
        let app = build_router(gateway, Variant::Readonly);

        let response = app.oneshot(get("/boats?page=2")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_UTF8);
        assert_eq!(
            body_json(response).await,
            json!({
                "a.json": {"name": "Aurora"},
                "b.json": {"error": "Invalid JSON format"}
            })
        );
    }

    #[tokio::test]
    async fn test_boats_listing_empty() {
        let temp = TempDir::new().unwrap();
        let app = build_router(gateway(&temp), Variant::Readonly);

        let response = app.oneshot(get("/boats")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_boats_listing_missing_directory_is_500() {
        let temp = TempDir::new().unwrap();
        let app = build_router(GatewayConfig::with_root(temp.path()), Variant::Readonly);

        let response = app.oneshot(get("/boats")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Failed to read directory"));
    }

    #[tokio::test]
    async fn test_image_served_with_exact_bytes() {
        let temp = TempDir::new().unwrap();
        let gateway = gateway(&temp);
        let dir = gateway.images_dir().join("12");
        std::fs::create_dir_all(&dir).unwrap();
        let png: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0xFF];
        std::fs::write(dir.join("bow.png"), png).unwrap();
        let app = build_router(gateway, Variant::Readonly);

        let response = app.oneshot(get("/images/12/bow.png")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(body_bytes(response).await, png);
    }

    #[tokio::test]
    async fn test_missing_image_is_404() {
        let temp = TempDir::new().unwrap();
        let app = build_router(gateway(&temp), Variant::Readonly);

        let response = app.oneshot(get("/images/12/missing.png")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Image not found"}));
    }

    #[tokio::test]
    async fn test_attachment_served_with_exact_bytes() {
        let temp = TempDir::new().unwrap();
        let gateway = gateway(&temp);
        let dir = gateway.attachments_dir().join("12");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("invoice.txt"), "total: 1200 EUR\n").unwrap();
        let app = build_router(gateway, Variant::Writer);

        let response = app.oneshot(get("/attachments/12/invoice.txt")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"total: 1200 EUR\n");
    }

    #[tokio::test]
    async fn test_attachment_path_logged_at_info() {
        let temp = TempDir::new().unwrap();
        let gateway = gateway(&temp);
        let expected = gateway.attachment_path("31", "hull-survey.pdf");
        let app = build_router(gateway, Variant::Readonly);

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = app
            .oneshot(get("/attachments/31/hull-survey.pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let output = logs.contents();
        assert!(output.contains("INFO"), "{output}");
        assert!(output.contains(&expected.display().to_string()), "{output}");
    }

    #[tokio::test]
    async fn test_missing_attachment_is_404() {
        let temp = TempDir::new().unwrap();
        let app = build_router(gateway(&temp), Variant::Readonly);

        let response = app
            .oneshot(get("/attachments/99/survey.pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Attachment not found"})
        );
    }

    #[tokio::test]
    async fn test_save_then_list_round_trip() {
        let temp = TempDir::new().unwrap();
        let app = build_router(gateway(&temp), Variant::Writer);

        let response = app
            .clone()
            .oneshot(post_save(r#"{"name": "Mistral", "ports": ["Brest", "Lorient"]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"message": SAVED_MESSAGE}));

        let response = app.oneshot(get("/boats")).await.unwrap();
        let listing = body_json(response).await;
        let records = listing.as_object().unwrap();
        assert_eq!(records.len(), 1);

        let (name, record) = records.iter().next().unwrap();
        let stem = name.strip_suffix(".json").unwrap();
        assert!(uuid::Uuid::parse_str(stem).is_ok());
        assert_eq!(record, &json!({"name": "Mistral", "ports": ["Brest", "Lorient"]}));
    }

    #[tokio::test]
    async fn test_save_without_body_is_400() {
        let temp = TempDir::new().unwrap();
        let gateway = gateway(&temp);
        let data_dir = gateway.data_dir();
        let app = build_router(gateway, Variant::Writer);

        for body in ["", "null", "{}", "[]"] {
            let response = app.clone().oneshot(post_save(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(body_json(response).await, json!({"error": NO_JSON_MESSAGE}));
        }

        assert_eq!(std::fs::read_dir(data_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_save_malformed_body_is_500() {
        let temp = TempDir::new().unwrap();
        let gateway = gateway(&temp);
        let data_dir = gateway.data_dir();
        let app = build_router(gateway, Variant::Writer);

        let response = app.oneshot(post_save(r#"{"name": "#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("JSON error"));
        assert_eq!(std::fs::read_dir(data_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_save_io_failure_is_500() {
        let temp = TempDir::new().unwrap();
        let app = build_router(GatewayConfig::with_root(temp.path()), Variant::Writer);

        let response = app.oneshot(post_save(r#"{"name": "Ghost"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("I/O error"));
    }

    #[tokio::test]
    async fn test_readonly_variant_has_no_save_route() {
        let temp = TempDir::new().unwrap();
        let app = build_router(gateway(&temp), Variant::Readonly);

        let response = app.oneshot(post_save(r#"{"name": "Nope"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let temp = TempDir::new().unwrap();
        let app = build_router(gateway(&temp), Variant::Readonly);

        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://boats.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

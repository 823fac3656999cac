//! Axum server setup
//!
//! Server skeleton with:
//! - Configured-origin CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use luxehome_core::config::ServerSection;

use super::routes;
use crate::state::AppState;

/// Listing photos arrive several at a time
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = configured origins only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// Origins allowed when not permissive
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let section = ServerSection::default();
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
            allowed_origins: section.allowed_origins,
        }
    }
}

impl ServerConfig {
    /// From the `[server]` config section.
    pub fn from_section(section: &ServerSection) -> Result<Self, ServerError> {
        let bind_addr = section
            .bind
            .parse()
            .map_err(|_| ServerError::InvalidBind(section.bind.clone()))?;
        Ok(Self {
            bind_addr,
            cors_permissive: section.cors_permissive,
            allowed_origins: section.allowed_origins.clone(),
        })
    }

    fn cors(&self) -> CorsLayer {
        if self.cors_permissive {
            tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
            return CorsLayer::permissive();
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::properties::router())
        .merge(routes::leads::router())
        .merge(routes::profiles::router())
        .merge(routes::dashboard::router())
        .merge(routes::ai::router())
        .merge(routes::mortgage::router())
        .merge(routes::amenities::router())
        .merge(routes::demo::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(config.cors())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(pool, auth, storage, model);
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config);

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
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid bind address '{0}'")]
    InvalidBind(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3030);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn config_from_section() {
        let section = ServerSection {
            bind: "0.0.0.0:8080".into(),
            cors_permissive: true,
            allowed_origins: vec![],
        };
        let config = ServerConfig::from_section(&section).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.cors_permissive);

        let bad = ServerSection {
            bind: "nowhere".into(),
            ..ServerSection::default()
        };
        assert!(matches!(
            ServerConfig::from_section(&bad),
            Err(ServerError::InvalidBind(_))
        ));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = test_support::app(test_support::state("50"));
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let app = test_support::app(test_support::state("50"));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }
}

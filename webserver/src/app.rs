use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::error_handling::HandleErrorLayer;
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{BoxError, Json, Router};
use serde_json::json;
use shared::snapshot::snapshot_path;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::handler::snapshot::{
    self as snapshot_handlers, LEGACY_SNAPSHOT_ROUTE, SNAPSHOT_ROUTE,
};

const HTTP_TIMEOUT: u64 = 60;

pub struct ApplicationServer;

impl ApplicationServer {
    pub fn router(config: &AppConfig) -> Router {
        let snapshot_file = ServeFile::new(snapshot_path(&config.public_dir));
        let static_files = ServeDir::new(&config.public_dir)
            .not_found_service(Self::handle_404.into_service());

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route(
                LEGACY_SNAPSHOT_ROUTE,
                get(snapshot_handlers::redirect_legacy_snapshot),
            )
            .route_service(SNAPSHOT_ROUTE, snapshot_file.clone())
            .route_service(SNAPSHOT_ROUTE.trim_end_matches('/'), snapshot_file)
            .route("/health", get(snapshot_handlers::health))
            .fallback_service(static_files)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(HandleErrorLayer::new(Self::handle_timeout_error))
                    .timeout(Duration::from_secs(HTTP_TIMEOUT))
                    .layer(cors),
            )
    }

    pub async fn serve(config: Arc<AppConfig>) -> anyhow::Result<()> {
        let router = Self::router(&config);

        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!(
            public_dir = %config.public_dir.display(),
            "Server running on http://{addr}"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }

    async fn handle_timeout_error(
        err: BoxError,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if err.is::<tower::timeout::error::Elapsed>() {
            (
                StatusCode::REQUEST_TIMEOUT,
                Json(json!({
                    "error":
                        format!(
                            "request took longer than the configured {} second timeout",
                            HTTP_TIMEOUT
                        )
                })),
            )
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": format!("unhandled internal error: {}", err)
                })),
            )
        }
    }

    async fn shutdown_signal() {
        if let Err(reason) = tokio::signal::ctrl_c().await {
            tracing::error!(%reason, "Error receiving interrupt signal");
            std::future::pending::<()>().await;
        }
        tracing::warn!("signal shutdown");
    }

    async fn handle_404() -> impl IntoResponse {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "errors": {
                    "message": vec![String::from("The requested resource does not exist on this server!")],
                }
            })),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use clap::Parser;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    const SNAPSHOT: &str = "{\n  \"coins\": [\n    {\n      \"name\": \"Alpha\",\n      \"address\": \"A1\",\n      \"balance\": \"1000.00\"\n    }\n  ]\n}";

    fn router_for(dir: &TempDir) -> Router {
        let public_dir = dir.path().to_string_lossy().to_string();
        let config =
            AppConfig::parse_from(["webserver", "--public-dir", &public_dir]);
        ApplicationServer::router(&config)
    }

    async fn send_get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_legacy_route_redirects_permanently() {
        let dir = TempDir::new().unwrap();

        let response = send_get(router_for(&dir), "/coins.json").await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/crowdfunding/balances/"
        );
    }

    #[tokio::test]
    async fn test_snapshot_route_serves_file_verbatim() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("coins.json"), SNAPSHOT).unwrap();

        let response = send_get(router_for(&dir), "/crowdfunding/balances/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, SNAPSHOT.as_bytes());
    }

    #[tokio::test]
    async fn test_snapshot_route_without_trailing_slash() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("coins.json"), SNAPSHOT).unwrap();

        let response = send_get(router_for(&dir), "/crowdfunding/balances").await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_snapshot_missing_before_first_pass() {
        let dir = TempDir::new().unwrap();

        let response = send_get(router_for(&dir), "/crowdfunding/balances/").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_files_are_served() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Crowdfunding</h1>")
            .unwrap();

        let response = send_get(router_for(&dir), "/index.html").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, "<h1>Crowdfunding</h1>".as_bytes());
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let dir = TempDir::new().unwrap();

        let response = send_get(router_for(&dir), "/nope.txt").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();

        let response = send_get(router_for(&dir), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, env!("CARGO_PKG_VERSION").as_bytes());
    }
}

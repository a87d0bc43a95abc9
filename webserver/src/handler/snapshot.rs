use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

pub const SNAPSHOT_ROUTE: &str = "/crowdfunding/balances/";
pub const LEGACY_SNAPSHOT_ROUTE: &str = "/coins.json";

pub async fn redirect_legacy_snapshot() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, SNAPSHOT_ROUTE)],
    )
}

pub async fn health() -> impl IntoResponse {
    env!("CARGO_PKG_VERSION")
}

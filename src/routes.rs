//! Router assembly.
//!
//! The server only hands out files: the bootstrap page and its assets from
//! the web directory, and the wasm bundle under `/pkg`. Anything else is a
//! plain-text 404 naming the missing file.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub fn app(config: &ServerConfig) -> Router {
    let web = ServeDir::new(&config.web_dir)
        .append_index_html_on_directories(true)
        .not_found_service(not_found.into_service());
    let pkg = ServeDir::new(&config.pkg_dir).not_found_service(not_found.into_service());

    Router::new()
        .route("/healthz", get(healthz))
        .route("/node_modules", get(not_found))
        .route("/node_modules/{*rest}", get(not_found))
        .nest_service("/pkg", pkg)
        .fallback_service(web)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn not_found(uri: Uri) -> (StatusCode, String) {
    let name = uri.path().rsplit('/').next().unwrap_or_default();
    tracing::debug!(path = uri.path(), "not found");
    (StatusCode::NOT_FOUND, format!("The file {name} could not be found."))
}

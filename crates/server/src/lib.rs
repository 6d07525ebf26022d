//! Showroom catalog server library.
//!
//! Exposes the router and startup steps so the binary and the integration
//! tests build the exact same application.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, extract::DefaultBodyLimit, middleware::from_fn, routing::get};
use thiserror::Error;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::db::seed::{self, SeedError};
use crate::services::AuthError;
use crate::services::uploads::UPLOADS_URL_PREFIX;
use crate::state::AppState;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to create default admin: {0}")]
    DefaultAdmin(#[from] AuthError),

    #[error("failed to seed catalog: {0}")]
    Seed(#[from] SeedError),
}

/// Seed the default admin account and, when enabled, the demo catalog.
///
/// # Errors
///
/// Returns an error if the default admin credentials are invalid or the
/// seed catalog cannot be loaded.
pub async fn bootstrap(state: &AppState) -> Result<(), BootstrapError> {
    let config = state.config();

    state
        .auth()
        .ensure_default_admin(&config.default_admin.username, &config.default_admin.password)
        .await?;

    if config.default_admin.uses_default_password() {
        tracing::warn!(
            username = %config.default_admin.username,
            "Default admin password in use; set SHOWROOM_ADMIN_PASSWORD"
        );
    }

    if config.seed.enabled && state.products().is_empty().await {
        let products = seed::load_catalog(config.seed.file.as_deref()).await?;
        seed::seed_products(state.products(), products).await?;
    }

    Ok(())
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let config = state.config();
    let session_layer = middleware::create_session_layer(config);
    let uploads = ServeDir::new(&config.uploads_dir);
    let body_limit = DefaultBodyLimit::max(config.max_upload_bytes);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service(UPLOADS_URL_PREFIX, uploads)
        .layer(body_limit)
        .layer(session_layer)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

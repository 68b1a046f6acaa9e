//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//! GET  /                                - Active view
//!
//! # Views
//! GET  /dashboard                       - Counts and sample data action
//! GET  /users                           - User grid
//! GET  /products                        - Product grid
//! GET  /recommendations                 - Recommendations for the selected user
//!
//! # Actions (303 redirect)
//! POST /users/{user_id}/recommendations - Fetch recommendations for a user
//! POST /recommendations                 - Same, user id from the form
//! POST /generate-data                   - Regenerate sample data
//!
//! GET  /static/*                        - Stylesheet
//! ```

pub mod actions;
pub mod pages;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::api::CatalogApi;
use crate::error::AppError;
use crate::state::AppState;

/// Directory served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the view and action routes.
pub fn routes<A: CatalogApi>() -> Router<AppState<A>> {
    Router::new()
        .route("/", get(pages::index::<A>))
        .route("/dashboard", get(pages::dashboard::<A>))
        .route("/users", get(pages::users::<A>))
        .route("/products", get(pages::products::<A>))
        .route(
            "/recommendations",
            get(pages::recommendations::<A>).post(actions::recommend_from_form::<A>),
        )
        .route(
            "/users/{user_id}/recommendations",
            post(actions::recommend_for_user::<A>),
        )
        .route("/generate-data", post(actions::generate_data::<A>))
}

/// Build the complete application: routes, health check, static files and
/// request tracing.
pub fn app<A: CatalogApi>(state: AppState<A>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

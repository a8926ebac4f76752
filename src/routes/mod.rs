use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{
        providers::{CompletionClient, MetadataProvider},
        SuggestionService,
    },
};

pub mod extract;
pub mod movies;
pub mod trailers;

/// Shared application state, built once at start-up
pub struct AppState {
    pub provider: Arc<dyn MetadataProvider>,
    pub suggestions: SuggestionService,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionClient>,
        max_tokens: u32,
        upstream_timeout: std::time::Duration,
    ) -> Self {
        let suggestions = SuggestionService::new(
            Arc::clone(&provider),
            completion,
            max_tokens,
            upstream_timeout,
        );
        Self {
            provider,
            suggestions,
        }
    }

    pub fn from_config(
        config: &Config,
        provider: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self::new(
            provider,
            completion,
            config.openai_max_tokens,
            config.upstream_timeout(),
        )
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies/search", get(movies::search))
        .route("/movies/discover", get(movies::discover))
        .route("/movies/suggestAndFetch", get(movies::suggest_and_fetch))
        .route("/movies/movie/:id", get(movies::get_movie))
        .route(
            "/movies/movie/:id/recommendations",
            get(movies::recommendations),
        )
        .route("/movie/:id/trailer", get(trailers::trailer))
}

/// CORS policy for the browser frontend
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

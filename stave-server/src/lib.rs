//! # Stave Server Library
//!
//! Component registry, render service and HTTP routes.
//! This library is used by both the binary and integration tests.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

pub mod components;
pub mod config;
pub mod demo;
pub mod error;
pub mod health;
pub mod metrics;
pub mod registry;
pub mod routes;
pub mod service;
pub mod stats;
pub mod validation;

pub use config::ServerConfig;
pub use error::ServerError;
pub use registry::ComponentRegistry;
pub use service::{RenderOutput, RenderService, ServiceConfig};

use validation::{ValidationError, MAX_PROPS_BYTES};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Render service shared by all handlers.
    pub service: Arc<RenderService>,
}

impl AppState {
    /// Wrap an existing render service.
    #[must_use]
    pub fn new(service: Arc<RenderService>) -> Self {
        Self { service }
    }

    /// State with the built-in components registered.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a built-in component name is rejected.
    pub fn with_builtins(config: ServiceConfig) -> Result<Self, ValidationError> {
        let registry = ComponentRegistry::new();
        components::register_builtins(&registry)?;
        metrics::set_registered_components(registry.len());
        Ok(Self::new(Arc::new(RenderService::new(
            Arc::new(registry),
            config,
        ))))
    }

    /// Get a reference to the render service.
    #[must_use]
    pub fn service(&self) -> &RenderService {
        &self.service
    }
}

/// Build the application router: pages, API, health probes, body limit and
/// HTTP metrics. The binary adds `/metrics`, CORS, request ids and tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(routes::index))
        .route("/simple", get(routes::simple))
        // Component API
        .route("/api/components", get(routes::list_components))
        .route("/api/components/{name}", get(routes::component_info))
        .route("/render/{name}", post(routes::render_html))
        .route("/api/render/{name}", post(routes::render_json))
        .route(
            "/api/stats",
            get(routes::get_stats).delete(routes::clear_stats),
        )
        // Health check endpoints (Kubernetes probes)
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness)) // Backward compatible
        .layer(RequestBodyLimitLayer::new(MAX_PROPS_BYTES))
        .layer(middleware::from_fn(metrics::track_http))
        .with_state(state)
}

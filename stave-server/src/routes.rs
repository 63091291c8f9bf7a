//! API route handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use stave_core::{props, HtmlSerializer, Props, RenderTree};
use uuid::Uuid;

use crate::demo;
use crate::error::ServerError;
use crate::metrics;
use crate::service::{ComponentInfo, RenderOutput, RenderService};
use crate::stats::ComponentStats;
use crate::validation::parse_props;
use crate::AppState;

/// Query parameters for `GET /simple`.
#[derive(Debug, Deserialize)]
pub struct SimpleQuery {
    /// Message shown by `SimpleTest`.
    pub message: Option<String>,
}

/// Response for `GET /api/components`.
#[derive(Debug, Serialize)]
pub struct ComponentList {
    /// Registered names, sorted.
    pub components: Vec<String>,
    /// Number of registered components.
    pub count: usize,
}

/// Response for `POST /api/render/{name}`.
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    /// Unique id of this render.
    pub render_id: Uuid,
    /// Rendered component name.
    pub component: String,
    /// Serialized markup.
    pub html: String,
    /// Tree snapshot.
    pub tree: RenderTree,
    /// Render time in milliseconds.
    pub elapsed_ms: f64,
    /// Whether the error box was rendered instead.
    pub fallback: bool,
}

impl From<RenderOutput> for RenderResponse {
    fn from(output: RenderOutput) -> Self {
        Self {
            render_id: output.render_id,
            component: output.component,
            html: output.html,
            tree: output.tree,
            elapsed_ms: output.elapsed.as_secs_f64() * 1000.0,
            fallback: output.fallback,
        }
    }
}

/// Response for `GET /api/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Whether statistics are being recorded.
    pub performance_monitoring: bool,
    /// Per-component statistics.
    pub components: BTreeMap<String, ComponentStats>,
}

/// Run `job` against the render service on the blocking pool; composition
/// is CPU-bound.
async fn blocking<T, F>(state: &AppState, job: F) -> Result<T, ServerError>
where
    T: Send + 'static,
    F: FnOnce(&RenderService) -> Result<T, ServerError> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || job(&service))
        .await
        .map_err(|e| ServerError::Task(e.to_string()))?
}

fn parse_body(body: &Bytes) -> Result<Props, ServerError> {
    parse_props(body).map_err(|e| {
        metrics::record_validation_failure(e.kind());
        ServerError::from(e)
    })
}

/// Demo dashboard page.
#[tracing::instrument(name = "index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let props = demo::dashboard_props(&demo::clock_time());
    let html = blocking(&state, move |service| service.render_html("UserList", props)).await?;
    Ok(Html(HtmlSerializer::document("User Management", &html)))
}

/// `SimpleTest` page with an optional `?message=`.
#[tracing::instrument(name = "simple", skip(state))]
pub async fn simple(
    State(state): State<AppState>,
    Query(query): Query<SimpleQuery>,
) -> Result<Html<String>, ServerError> {
    let props = props! { "message" => query.message };
    let html = blocking(&state, move |service| service.render_html("SimpleTest", props)).await?;
    Ok(Html(HtmlSerializer::document("Simple Test", &html)))
}

/// List registered components.
#[tracing::instrument(name = "list_components", skip(state))]
pub async fn list_components(State(state): State<AppState>) -> Json<ComponentList> {
    let components = state.service.list_components();
    Json(ComponentList {
        count: components.len(),
        components,
    })
}

/// Details and statistics for one component.
#[tracing::instrument(name = "component_info", skip(state))]
pub async fn component_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ComponentInfo>, ServerError> {
    state.service.component_info(&name).map(Json)
}

/// Render a component to an HTML fragment. The body is a JSON props object.
#[tracing::instrument(name = "render_html", skip(state, body), fields(body_len = body.len()))]
pub async fn render_html(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Html<String>, ServerError> {
    let props = parse_body(&body)?;
    let html = blocking(&state, move |service| service.render_html(&name, props)).await?;
    Ok(Html(html))
}

/// Render a component and return markup, tree snapshot and timing as JSON.
#[tracing::instrument(name = "render_json", skip(state, body), fields(body_len = body.len()))]
pub async fn render_json(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<RenderResponse>, ServerError> {
    let props = parse_body(&body)?;
    let output = blocking(&state, move |service| service.render(&name, props)).await?;
    Ok(Json(output.into()))
}

/// Current render statistics.
#[tracing::instrument(name = "get_stats", skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        performance_monitoring: state.service.config().performance_monitoring,
        components: state.service.render_stats(),
    })
}

/// Reset render statistics.
#[tracing::instrument(name = "clear_stats", skip(state))]
pub async fn clear_stats(State(state): State<AppState>) -> StatusCode {
    state.service.clear_stats();
    StatusCode::NO_CONTENT
}

//! Render service: name validation, lookup, timed composition and
//! serialization, plus statistics bookkeeping.
//!
//! ```text
//! name ─► validate ─► registry ─► Composer::render ─► HtmlSerializer
//!                                   │ (timed)
//!                                   ├─► RenderStats (if monitoring)
//!                                   └─► metrics + slow-render warning
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use stave_core::{
    props, Component, ComposeConfig, Composer, Element, HtmlSerializer, Node, Props, RenderError,
    RenderTree,
};
use uuid::Uuid;

use crate::error::ServerError;
use crate::metrics;
use crate::registry::ComponentRegistry;
use crate::stats::{ComponentStats, RenderStats};
use crate::validation::{validate_component_name, ValidationError};

/// Default slow-render warning threshold.
pub const DEFAULT_SLOW_RENDER: Duration = Duration::from_millis(1000);

/// Render service settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Composition settings.
    pub compose: ComposeConfig,
    /// Record per-component timing statistics.
    pub performance_monitoring: bool,
    /// Render an inline error box instead of failing the request.
    pub fallback_on_error: bool,
    /// Renders slower than this are logged at `warn`.
    pub slow_render_threshold: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            compose: ComposeConfig::default(),
            performance_monitoring: true,
            fallback_on_error: false,
            slow_render_threshold: DEFAULT_SLOW_RENDER,
        }
    }
}

/// The result of one successful render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Unique id for log correlation.
    pub render_id: Uuid,
    /// Registered name of the rendered component.
    pub component: String,
    /// The composed tree.
    pub tree: RenderTree,
    /// Serialized markup.
    pub html: String,
    /// Composition plus serialization time.
    pub elapsed: Duration,
    /// Whether `tree` is the error box rather than the component's output.
    pub fallback: bool,
}

/// Information about one registered component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentInfo {
    /// Registered name.
    pub name: String,
    /// Registered description.
    pub description: String,
    /// Whether the entry is a primitive tag rather than a composite.
    pub primitive: bool,
    /// Successful renders since the last clear.
    pub render_count: u64,
    /// Mean render time since the last clear.
    pub avg_render_time_ms: f64,
}

/// Renders registered components by name.
#[derive(Debug)]
pub struct RenderService {
    registry: Arc<ComponentRegistry>,
    composer: Composer,
    stats: RenderStats,
    config: ServiceConfig,
}

impl RenderService {
    /// Create a service over `registry`.
    #[must_use]
    pub fn new(registry: Arc<ComponentRegistry>, config: ServiceConfig) -> Self {
        Self {
            registry,
            composer: Composer::with_config(config.compose),
            stats: RenderStats::new(),
            config,
        }
    }

    /// The component registry.
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    /// Render the component registered as `name`.
    ///
    /// # Errors
    ///
    /// - [`ServerError::Validation`] if `name` is malformed.
    /// - [`ServerError::ComponentNotFound`] if nothing is registered as `name`.
    /// - [`ServerError::Render`] if composition fails and fallback is disabled.
    #[tracing::instrument(
        name = "render_component",
        skip(self, props),
        fields(render_id = tracing::field::Empty)
    )]
    pub fn render(&self, name: &str, props: Props) -> Result<RenderOutput, ServerError> {
        validate_component_name(name).map_err(|e| self.rejected(&e))?;
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| ServerError::ComponentNotFound(name.to_string()))?;

        let render_id = Uuid::new_v4();
        tracing::Span::current().record("render_id", tracing::field::display(render_id));

        let start = Instant::now();
        let result = self
            .composer
            .render(&entry.component, props)
            .map(|tree| (HtmlSerializer::render(&tree), tree));
        let elapsed = start.elapsed();

        match result {
            Ok((html, tree)) => {
                self.finish(name, "ok", elapsed);
                tracing::debug!(
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    elements = tree.element_count(),
                    "rendered component"
                );
                Ok(RenderOutput {
                    render_id,
                    component: name.to_string(),
                    tree,
                    html,
                    elapsed,
                    fallback: false,
                })
            }
            Err(source) if self.config.fallback_on_error => {
                metrics::record_render(name, "fallback", elapsed.as_secs_f64());
                tracing::warn!(kind = source.kind(), "rendering error box: {source}");
                let tree = self
                    .composer
                    .compose(error_box(&source))
                    .map_err(|source| ServerError::Render {
                        component: name.to_string(),
                        source,
                    })?;
                Ok(RenderOutput {
                    render_id,
                    component: name.to_string(),
                    html: HtmlSerializer::render(&tree),
                    tree,
                    elapsed,
                    fallback: true,
                })
            }
            Err(source) => {
                metrics::record_render(name, source.kind(), elapsed.as_secs_f64());
                Err(ServerError::Render {
                    component: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Render `name` and return only the markup.
    ///
    /// # Errors
    ///
    /// Same as [`RenderService::render`].
    pub fn render_html(&self, name: &str, props: Props) -> Result<String, ServerError> {
        self.render(name, props).map(|output| output.html)
    }

    /// Registered component names, sorted.
    #[must_use]
    pub fn list_components(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Registration details and statistics for `name`.
    ///
    /// # Errors
    ///
    /// - [`ServerError::Validation`] if `name` is malformed.
    /// - [`ServerError::ComponentNotFound`] if nothing is registered as `name`.
    pub fn component_info(&self, name: &str) -> Result<ComponentInfo, ServerError> {
        validate_component_name(name).map_err(|e| self.rejected(&e))?;
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| ServerError::ComponentNotFound(name.to_string()))?;
        let stats = self.stats.get(name);

        Ok(ComponentInfo {
            name: name.to_string(),
            description: entry.description,
            primitive: entry.component.is_primitive(),
            render_count: stats.map_or(0, |s| s.count),
            avg_render_time_ms: stats.map_or(0.0, |s| s.avg_time_ms),
        })
    }

    /// Per-component statistics, ordered by name.
    #[must_use]
    pub fn render_stats(&self) -> BTreeMap<String, ComponentStats> {
        self.stats.snapshot()
    }

    /// Reset all statistics.
    pub fn clear_stats(&self) {
        self.stats.clear();
        tracing::info!("render statistics cleared");
    }

    fn finish(&self, name: &str, outcome: &str, elapsed: Duration) {
        metrics::record_render(name, outcome, elapsed.as_secs_f64());
        if self.config.performance_monitoring {
            self.stats.record(name, elapsed);
        }
        if elapsed > self.config.slow_render_threshold {
            metrics::record_slow_render(name);
            tracing::warn!(
                component = name,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                threshold_ms = self.config.slow_render_threshold.as_secs_f64() * 1000.0,
                "slow component render"
            );
        }
    }

    fn rejected(&self, error: &ValidationError) -> ServerError {
        metrics::record_validation_failure(error.kind());
        ServerError::Validation(error.clone())
    }
}

/// Inline error box shown in place of a component that failed to render.
fn error_box(error: &RenderError) -> Node {
    let style = props! {
        "color" => "red",
        "padding" => "10px",
        "border" => "1px solid red",
        "backgroundColor" => "#ffe6e6",
    };
    Node::Element(Element {
        component: Component::tag("div"),
        props: props! { "className" => "stave-error", "style" => style },
        children: vec![Node::text(format!("Component Error: {error}"))],
    })
}

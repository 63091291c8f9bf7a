//! Error types for element building and composition.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while building or composing a tree.
///
/// Rendering is a pure computation: the same inputs fail the same way every
/// time, so none of these are worth retrying.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The component reference is neither a valid tag nor a callable.
    #[error("Invalid component reference: {0}")]
    InvalidRef(String),

    /// A children entry has a value type that cannot be rendered.
    #[error("Invalid child: {0}")]
    InvalidChild(String),

    /// Expansion nested deeper than the configured bound.
    #[error("Composition depth exceeded while expanding <{component}> (limit {limit})")]
    CompositionDepthExceeded {
        /// Name of the component being expanded when the bound was hit.
        component: String,
        /// The configured depth limit.
        limit: usize,
    },

    /// Tree snapshot serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RenderError {
    /// Short, stable label for this error kind (used in logs and metrics).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRef(_) => "invalid_ref",
            Self::InvalidChild(_) => "invalid_child",
            Self::CompositionDepthExceeded { .. } => "depth_exceeded",
            Self::Serialization(_) => "serialization",
        }
    }
}

//! Server error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stave_core::RenderError;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the render service and HTTP handlers.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Request input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No component is registered under the requested name.
    #[error("component '{0}' not found")]
    ComponentNotFound(String),

    /// Building or composing the component failed.
    #[error("failed to render component '{component}': {source}")]
    Render {
        /// Component that was being rendered.
        component: String,
        /// Underlying composition error.
        #[source]
        source: RenderError,
    },

    /// A blocking render task panicked or was cancelled.
    #[error("render task failed: {0}")]
    Task(String),
}

impl ServerError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(ValidationError::PropsTooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ComponentNotFound(_) => StatusCode::NOT_FOUND,
            Self::Render { source, .. } => match source {
                RenderError::InvalidRef(_) | RenderError::InvalidChild(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                RenderError::CompositionDepthExceeded { .. } | RenderError::Serialization(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short, stable label for response bodies and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ComponentNotFound(_) => "not_found",
            Self::Render { source, .. } => source.kind(),
            Self::Task(_) => "internal",
        }
    }
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Stable error kind.
    pub kind: &'static str,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "{self}");
        } else {
            tracing::debug!(kind = self.kind(), "{self}");
        }
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::from(ValidationError::ComponentNameEmpty).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::from(ValidationError::PropsTooLarge).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ServerError::ComponentNotFound("X".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::Render {
                component: "X".into(),
                source: RenderError::InvalidChild("map".into()),
            }
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServerError::Render {
                component: "X".into(),
                source: RenderError::CompositionDepthExceeded {
                    component: "X".into(),
                    limit: 4,
                },
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_passes_through_render_errors() {
        let err = ServerError::Render {
            component: "X".into(),
            source: RenderError::InvalidRef("bad tag".into()),
        };

        assert_eq!(err.kind(), "invalid_ref");
        assert!(err.to_string().contains("'X'"));
    }

    #[test]
    fn test_into_response_status() {
        let response = ServerError::ComponentNotFound("Missing".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

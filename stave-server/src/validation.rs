//! Input validation for untrusted data.
//!
//! Component names and props arrive from HTTP clients and MUST be validated
//! before they reach the registry or the composer.

use stave_core::Props;
use thiserror::Error;

/// Maximum length for component names.
pub const MAX_COMPONENT_NAME_LEN: usize = 64;
/// Maximum size of a serialized props body.
pub const MAX_PROPS_BYTES: usize = 1_048_576; // 1MB

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Component name is empty.
    #[error("component name is empty")]
    ComponentNameEmpty,
    /// Component name exceeds maximum length.
    #[error("component name too long (max {MAX_COMPONENT_NAME_LEN} chars)")]
    ComponentNameTooLong,
    /// Component name is not an identifier.
    #[error("invalid component name: {0:?}")]
    ComponentNameInvalidChars(String),
    /// Props body exceeds maximum size.
    #[error("props too large (max {MAX_PROPS_BYTES} bytes)")]
    PropsTooLarge,
    /// Props body is not valid JSON.
    #[error("props are not valid JSON: {0}")]
    PropsMalformed(String),
    /// Props body is JSON but not an object.
    #[error("props must be an object, got {0}")]
    PropsNotObject(&'static str),
}

impl ValidationError {
    /// Label used for the validation failure metric.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ComponentNameEmpty
            | Self::ComponentNameTooLong
            | Self::ComponentNameInvalidChars(_) => "component_name",
            Self::PropsTooLarge | Self::PropsMalformed(_) | Self::PropsNotObject(_) => "props",
        }
    }
}

/// Validate a component name.
///
/// Valid names:
/// - 1-64 characters
/// - ASCII letter or underscore first, then ASCII letters, digits or underscores
///
/// Path separators, dots and whitespace are therefore always rejected.
///
/// # Errors
///
/// Returns [`ValidationError::ComponentNameEmpty`] if the name is empty.
/// Returns [`ValidationError::ComponentNameTooLong`] if the name exceeds 64 characters.
/// Returns [`ValidationError::ComponentNameInvalidChars`] if the name is not an identifier.
pub fn validate_component_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::ComponentNameEmpty);
    }
    if name.len() > MAX_COMPONENT_NAME_LEN {
        return Err(ValidationError::ComponentNameTooLong);
    }
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !head_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::ComponentNameInvalidChars(name.to_string()));
    }
    Ok(())
}

/// Parse a request body into a props bag.
///
/// An empty body or JSON `null` yields an empty bag.
///
/// # Errors
///
/// Returns [`ValidationError::PropsTooLarge`] if the body exceeds 1MB.
/// Returns [`ValidationError::PropsMalformed`] if the body is not JSON.
/// Returns [`ValidationError::PropsNotObject`] if the JSON is not an object.
pub fn parse_props(body: &[u8]) -> Result<Props, ValidationError> {
    if body.len() > MAX_PROPS_BYTES {
        return Err(ValidationError::PropsTooLarge);
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Props::new());
    }
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::PropsMalformed(e.to_string()))?;
    props_from_value(value)
}

/// Convert an already-parsed JSON value into a props bag.
///
/// # Errors
///
/// Returns [`ValidationError::PropsNotObject`] unless `value` is an object or `null`.
pub fn props_from_value(value: serde_json::Value) -> Result<Props, ValidationError> {
    use serde_json::Value;

    match value {
        Value::Object(map) => Ok(Props::from(map)),
        Value::Null => Ok(Props::new()),
        Value::Bool(_) => Err(ValidationError::PropsNotObject("boolean")),
        Value::Number(_) => Err(ValidationError::PropsNotObject("number")),
        Value::String(_) => Err(ValidationError::PropsNotObject("string")),
        Value::Array(_) => Err(ValidationError::PropsNotObject("array")),
    }
}

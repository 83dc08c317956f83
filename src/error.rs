//! Error types for GeoJSON access.

use thiserror::Error;

/// Errors raised while parsing or accessing a GeoJSON object
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// Input text is not valid JSON or its root is not an object
    #[error("failed to parse GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field is absent or has the wrong shape
    #[error("field `{field}` {reason}")]
    Field {
        field: &'static str,
        reason: &'static str,
    },

    /// The operation needs a different top-level `type`
    #[error("GeoJSON object is not of type {expected}")]
    Type {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("GeoJSON root must be a JSON object")]
    NotObject,
}

impl GeoJsonError {
    pub(crate) fn missing(field: &'static str) -> Self {
        GeoJsonError::Field {
            field,
            reason: "is missing",
        }
    }

    pub(crate) fn malformed(field: &'static str, reason: &'static str) -> Self {
        GeoJsonError::Field { field, reason }
    }
}

pub type Result<T, E = GeoJsonError> = std::result::Result<T, E>;

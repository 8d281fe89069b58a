//! Error types for level and tuning loading.

use std::fmt;
use std::io;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, NuttyError>;

/// Errors that can occur while loading levels, tuning, or building bodies.
#[derive(Debug)]
pub enum NuttyError {
    /// Reading a file failed.
    Io(io::Error),
    /// A level or tuning document is not valid JSON for its schema.
    Json(serde_json::Error),
    /// A required object layer is absent from the level.
    MissingLayer(String),
    /// An object has a shape the layer does not accept.
    UnexpectedShape {
        layer: String,
        object_id: u32,
        expected: &'static str,
    },
    /// A tuning value is out of range.
    InvalidTuning { field: &'static str, value: f32 },
}

impl fmt::Display for NuttyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NuttyError::Io(e) => write!(f, "i/o error: {}", e),
            NuttyError::Json(e) => write!(f, "invalid json: {}", e),
            NuttyError::MissingLayer(name) => write!(f, "level has no object layer named '{}'", name),
            NuttyError::UnexpectedShape {
                layer,
                object_id,
                expected,
            } => write!(
                f,
                "object {} in layer '{}' is not a {}",
                object_id, layer, expected
            ),
            NuttyError::InvalidTuning { field, value } => {
                write!(f, "tuning value '{}' is out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for NuttyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NuttyError::Io(e) => Some(e),
            NuttyError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NuttyError {
    fn from(e: io::Error) -> Self {
        NuttyError::Io(e)
    }
}

impl From<serde_json::Error> for NuttyError {
    fn from(e: serde_json::Error) -> Self {
        NuttyError::Json(e)
    }
}

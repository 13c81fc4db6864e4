//! Error types shared by the runtime
//!
//! Each concern gets its own enum so callers can tell an asset that never
//! loaded apart from a surface that stopped drawing. Illegal Go moves are
//! *not* errors; see [`crate::go::MoveOutcome`].

use thiserror::Error;

/// A single asset failed to load. Never aborts the rest of the batch.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset '{id}': {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("asset '{id}' is not a readable image: {reason}")]
    Decode { id: String, reason: String },

    #[error("asset '{0}' was not found")]
    NotFound(String),
}

/// The host drawing surface rejected a command.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render backend error: {0}")]
    Backend(String),

    #[error("no texture uploaded for image '{0}'")]
    MissingTexture(String),
}

impl From<String> for RenderError {
    fn from(message: String) -> Self {
        RenderError::Backend(message)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A frame could not be completed.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("frame draw failed: {0}")]
    Render(#[from] RenderError),
}

pub type RenderResult = Result<(), RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_from_string() {
        let err: RenderError = "canvas lost".to_string().into();
        assert_eq!(err.to_string(), "render backend error: canvas lost");
    }

    #[test]
    fn test_engine_error_wraps_render_error() {
        let err = EngineError::from(RenderError::MissingTexture("./img/black.png".into()));
        assert!(err.to_string().contains("./img/black.png"));
    }
}

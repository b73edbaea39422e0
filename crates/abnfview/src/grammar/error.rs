//! Load error types for grammar and metadata files.

use std::path::PathBuf;

use thiserror::Error;

/// An error that occurred while loading a grammar.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The grammar file does not exist.
    #[error("grammar not found: '{path}'")]
    NotFound { path: PathBuf },

    /// File I/O error when reading a grammar file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON is malformed or describes a construct outside the grammar
    /// vocabulary (unknown node type, unsupported base, missing field).
    #[error("invalid grammar at {line}:{column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
}

impl LoadError {
    /// Builds a [`LoadError::Json`] from a `serde_json` error, splitting the
    /// location out of the message.
    pub(crate) fn from_json(err: &serde_json::Error) -> Self {
        let text = err.to_string();
        let message = match text.rfind(" at line ") {
            Some(pos) => text[..pos].to_string(),
            None => text,
        };
        LoadError::Json {
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}

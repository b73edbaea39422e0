//! Error types for the grammar compilers.

use thiserror::Error;

use crate::grammar::NodeKind;

/// An error that occurred while rendering a rule.
///
/// Rendering is pure, so the same input always fails the same way; none of
/// these are retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A construct appeared where the grammar vocabulary does not allow it.
    /// Indicates a mismatch between the upstream parser and this crate.
    #[error("malformed {kind} in rule '{rule}': {message}")]
    MalformedConstruct {
        rule: String,
        kind: NodeKind,
        message: String,
    },

    /// The definition tree nests deeper than the configured limit.
    #[error("rule '{rule}' nests deeper than {limit} levels")]
    MaxDepthExceeded { rule: String, limit: usize },

    /// A single-rule render named a rule the grammar does not declare.
    #[error("rule not found: '{name}'")]
    UnknownRule { name: String },
}

//! Grammar and dependency-metadata loading.

use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use super::ast::Grammar;
use super::error::LoadError;
use crate::types::DependencyMetadata;

/// Parse grammar JSON as emitted by the upstream ABNF parser.
pub fn parse_grammar(json: &str) -> Result<Grammar, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::from_json(&e))
}

/// Read and parse a grammar JSON file.
pub fn load_grammar(path: &Path) -> Result<Grammar, LoadError> {
    let content = read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let grammar = parse_grammar(&content)?;
    debug!(path = %path.display(), rules = grammar.len(), "loaded grammar");
    Ok(grammar)
}

/// Parse dependency-metadata JSON.
pub fn parse_metadata(json: &str) -> Result<DependencyMetadata, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::from_json(&e))
}

/// Read dependency metadata from `path`.
///
/// Metadata is optional: a missing, unreadable or malformed file yields empty
/// metadata, under which every rule classifies as native.
pub fn load_metadata(path: &Path) -> DependencyMetadata {
    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no dependency metadata");
            return DependencyMetadata::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read dependency metadata");
            return DependencyMetadata::default();
        }
    };
    match parse_metadata(&content) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed dependency metadata");
            DependencyMetadata::default()
        }
    }
}

//! Parsed ABNF grammars.
//!
//! Raw ABNF text is parsed by an external tool; this module provides the
//! AST that tool's JSON output deserializes into, plus loaders for grammar
//! and dependency-metadata files.

pub mod ast;
pub mod error;
mod load;

pub use ast::*;
pub use error::LoadError;
pub use load::{load_grammar, load_metadata, parse_grammar, parse_metadata};

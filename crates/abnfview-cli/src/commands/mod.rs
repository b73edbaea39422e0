//! CLI command implementations.

mod inspect;
mod render;

use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use abnfview::grammar::{load_metadata, parse_grammar};
use abnfview::{DependencyMetadata, Grammar};
use miette::miette;
use owo_colors::{OwoColorize, Stream};

use crate::output::GrammarDiagnostic;

pub use inspect::{run_inspect, InspectArgs};
pub use render::{run_render, RenderArgs};

/// Read and parse a grammar file.
///
/// A missing grammar is not a failure of the tool: it prints a not-found
/// message and returns `None` so the caller can exit with `NOINPUT`.
pub(crate) fn read_grammar(path: &Path) -> miette::Result<Option<Grammar>> {
    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let message = format!("Grammar not found: {}", path.display());
            eprintln!(
                "{}",
                message.if_supports_color(Stream::Stderr, |t| t.red())
            );
            return Ok(None);
        }
        Err(e) => return Err(miette!("Failed to read grammar {}: {}", path.display(), e)),
    };

    match parse_grammar(&content) {
        Ok(grammar) => Ok(Some(grammar)),
        Err(e) => Err(GrammarDiagnostic::from_load_error(path, &content, &e).into()),
    }
}

/// Read a grammar for a command, or the exit code to stop with: `NOINPUT`
/// when the file is missing, `DATAERR` after printing a load diagnostic.
pub(crate) fn open_grammar(path: &Path) -> Result<Grammar, i32> {
    match read_grammar(path) {
        Ok(Some(grammar)) => Ok(grammar),
        Ok(None) => Err(exitcode::NOINPUT),
        Err(report) => {
            eprintln!("{report:?}");
            Err(exitcode::DATAERR)
        }
    }
}

/// Read dependency metadata, or empty metadata when no path is given.
pub(crate) fn read_metadata(path: Option<&PathBuf>) -> DependencyMetadata {
    path.map(|p| load_metadata(p)).unwrap_or_default()
}

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Where a rule's definition comes from, relative to the grammar being
/// rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Provenance {
    /// Defined in this grammar.
    Native,
    /// Imported unchanged from `source`.
    Imported { source: String },
    /// Extends the definition found in `source`.
    Extended { source: String },
}

impl Provenance {
    /// The foreign grammar identifier, or `None` for native rules.
    pub fn source(&self) -> Option<&str> {
        match self {
            Provenance::Native => None,
            Provenance::Imported { source } | Provenance::Extended { source } => Some(source),
        }
    }

    /// Returns true for rules defined in this grammar.
    pub fn is_native(&self) -> bool {
        matches!(self, Provenance::Native)
    }
}

impl Display for Provenance {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Provenance::Native => f.write_str("native"),
            Provenance::Imported { source } => write!(f, "imported from {source}"),
            Provenance::Extended { source } => write!(f, "extends {source}"),
        }
    }
}

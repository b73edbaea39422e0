//! Cross-reference resolution: where does a rule's definition come from?

use crate::types::{DependencyMetadata, Provenance};

/// Classifies `rule` against the grammar's dependency metadata.
///
/// Lookup is case-insensitive. An extension takes precedence over an import
/// of the same name; a name in neither map is native.
///
/// # Example
///
/// ```
/// use abnfview::{DependencyMetadata, Provenance, classify};
///
/// let metadata = DependencyMetadata::new().with_import("DIGIT", "RFC5234");
/// assert_eq!(
///     classify("digit", &metadata),
///     Provenance::Imported { source: "RFC5234".to_string() }
/// );
/// assert_eq!(classify("year", &metadata), Provenance::Native);
/// ```
pub fn classify(rule: &str, metadata: &DependencyMetadata) -> Provenance {
    if let Some(source) = metadata.extension_source(rule) {
        return Provenance::Extended {
            source: source.to_string(),
        };
    }
    if let Some(source) = metadata.import_source(rule) {
        return Provenance::Imported {
            source: source.to_string(),
        };
    }
    Provenance::Native
}

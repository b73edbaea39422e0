use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;

/// Cross-grammar dependency metadata for one grammar.
///
/// Records which rule names are imported unchanged from another grammar and
/// which extend a definition from another grammar. Rule names are stored
/// uppercased, since ABNF rule names are case-insensitive.
///
/// # Example
///
/// ```
/// use abnfview::DependencyMetadata;
///
/// let metadata = DependencyMetadata::new()
///     .with_import("ALPHA", "RFC5234")
///     .with_extension("token", "RFC7230");
///
/// assert_eq!(metadata.import_source("alpha"), Some("RFC5234"));
/// assert_eq!(metadata.extension_source("TOKEN"), Some("RFC7230"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMetadata")]
pub struct DependencyMetadata {
    /// Uppercased rule name to the grammar it is imported from.
    imports: HashMap<String, String>,
    /// Uppercased rule name to the grammar it extends.
    extends: HashMap<String, String>,
}

impl DependencyMetadata {
    /// Create empty metadata: every rule is native.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `rule` is imported from `source`.
    ///
    /// The first source recorded for a rule wins.
    pub fn with_import(mut self, rule: &str, source: impl Into<String>) -> Self {
        self.imports
            .entry(rule.to_uppercase())
            .or_insert_with(|| source.into());
        self
    }

    /// Records that every name in `rules` is imported from `source`.
    pub fn with_imports_from<'a>(
        mut self,
        source: &str,
        rules: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        for rule in rules {
            self = self.with_import(rule, source);
        }
        self
    }

    /// Records that `rule` extends the definition in `source`.
    pub fn with_extension(mut self, rule: &str, source: impl Into<String>) -> Self {
        self.extends
            .entry(rule.to_uppercase())
            .or_insert_with(|| source.into());
        self
    }

    /// The grammar `rule` is imported from, if any.
    pub fn import_source(&self, rule: &str) -> Option<&str> {
        self.imports.get(&rule.to_uppercase()).map(String::as_str)
    }

    /// The grammar `rule` extends, if any.
    pub fn extension_source(&self, rule: &str) -> Option<&str> {
        self.extends.get(&rule.to_uppercase()).map(String::as_str)
    }

    /// Returns true if no imports or extensions are recorded.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.extends.is_empty()
    }
}

/// Metadata as it appears on disk.
#[derive(Deserialize)]
struct RawMetadata {
    #[serde(default)]
    imports: IndexMap<String, ImportEntry>,
    #[serde(default)]
    extends: IndexMap<String, String>,
}

/// The upstream tool has written imports both ways round.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportEntry {
    /// `"RULE": "RFC1234"`
    Source(String),
    /// `"RFC1234": ["RULE", ...]`
    Rules(Vec<String>),
}

impl From<RawMetadata> for DependencyMetadata {
    fn from(raw: RawMetadata) -> Self {
        let mut metadata = DependencyMetadata::new();
        for (key, entry) in raw.imports {
            metadata = match entry {
                ImportEntry::Source(source) => metadata.with_import(&key, source),
                ImportEntry::Rules(rules) => {
                    metadata.with_imports_from(&key, rules.iter().map(String::as_str))
                }
            };
        }
        for (rule, source) in raw.extends {
            metadata = metadata.with_extension(&rule, source);
        }
        metadata
    }
}

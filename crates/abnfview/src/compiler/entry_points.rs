//! Detection of rules no other rule refers to.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::grammar::Grammar;

/// The rules of a grammar that are never referenced from within it.
///
/// These are the grammar's entry points and get a complex diagram. Names are
/// stored uppercased in declared order; lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPoints {
    names: IndexSet<String>,
}

impl EntryPoints {
    /// Builds a set from explicit names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            names: names.into_iter().map(str::to_uppercase).collect(),
        }
    }

    /// Returns true if `name` is an entry point, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_uppercase())
    }

    /// Uppercased entry-point names in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Finds every declared rule that is not the target of any reference edge.
///
/// Names are compared uppercased. Computed once per grammar; it only selects
/// diagram kind and never affects the annotated text.
pub fn find_entry_points(grammar: &Grammar) -> EntryPoints {
    let referenced: HashSet<String> = grammar
        .referenced_names()
        .into_iter()
        .map(str::to_uppercase)
        .collect();
    EntryPoints::from_names(
        grammar
            .defs
            .keys()
            .map(String::as_str)
            .filter(|name| !referenced.contains(&name.to_uppercase())),
    )
}

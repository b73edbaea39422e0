//! Table formatting utilities for CLI output.

use abnfview::Provenance;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};

/// Summary of a single rule.
pub struct RuleSummary {
    /// Declared rule name.
    pub name: String,
    /// Where the rule's definition comes from.
    pub provenance: Provenance,
    /// Whether no other rule references this one.
    pub entry_point: bool,
}

/// Format rule summaries as an ASCII table.
pub fn format_rule_table(rules: &[RuleSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rule", "Provenance", "Source", "Entry point"]);

    for rule in rules {
        let kind = match &rule.provenance {
            Provenance::Native => Cell::new("native"),
            Provenance::Imported { .. } => Cell::new("imported").fg(Color::Cyan),
            Provenance::Extended { .. } => Cell::new("extends").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&rule.name),
            kind,
            Cell::new(rule.provenance.source().unwrap_or("-")),
            Cell::new(if rule.entry_point { "yes" } else { "" }),
        ]);
    }

    table
}

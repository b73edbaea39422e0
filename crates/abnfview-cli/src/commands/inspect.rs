//! Implementation of the `abnfview inspect` command.

use std::path::PathBuf;

use abnfview::{DependencyMetadata, Grammar, Provenance, classify, find_entry_points};
use clap::Args;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use super::{open_grammar, read_metadata};
use crate::output::table::{format_rule_table, RuleSummary};

/// Arguments for the inspect command.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Grammar JSON produced by the ABNF parser
    pub grammar: PathBuf,

    /// Dependency metadata JSON listing imported and extended rules
    #[arg(long)]
    pub deps: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one rule.
#[derive(Debug, Serialize)]
struct RuleJson<'a> {
    name: &'a str,
    provenance: &'a Provenance,
    entry_point: bool,
}

/// Summarize every rule of `grammar`, in declared order.
fn summarize(grammar: &Grammar, metadata: &DependencyMetadata) -> Vec<RuleSummary> {
    let entry_points = find_entry_points(grammar);
    grammar
        .defs
        .iter()
        .map(|(key, node)| {
            let name = node.rule_name().unwrap_or(key).to_string();
            RuleSummary {
                provenance: classify(&name, metadata),
                entry_point: entry_points.contains(&name),
                name,
            }
        })
        .collect()
}

/// Run the inspect command.
pub fn run_inspect(args: InspectArgs) -> Result<i32> {
    let grammar = match open_grammar(&args.grammar) {
        Ok(grammar) => grammar,
        Err(code) => return Ok(code),
    };
    let metadata = read_metadata(args.deps.as_ref());
    let summaries = summarize(&grammar, &metadata);

    if args.json {
        let json_data: Vec<RuleJson<'_>> = summaries
            .iter()
            .map(|s| RuleJson {
                name: &s.name,
                provenance: &s.provenance,
                entry_point: s.entry_point,
            })
            .collect();
        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        println!("{}", format_rule_table(&summaries));
        let entry_points = summaries.iter().filter(|s| s.entry_point).count();
        println!(
            "\n{} rule(s), {} entry point(s)",
            summaries.len(),
            entry_points
        );
    }

    Ok(exitcode::OK)
}

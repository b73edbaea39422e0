//! Implementation of the `abnfview render` command.

use std::path::PathBuf;

use abnfview::compiler::DEFAULT_MAX_DEPTH;
use abnfview::{
    Decorator, DiagramPolicy, HtmlDecorator, Layout, LinkStyle, PlainDecorator, RenderOptions,
    Renderer, Rendering,
};
use clap::ValueEnum;
use miette::IntoDiagnostic;
use tracing::debug;

use super::{open_grammar, read_metadata};

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Grammar JSON produced by the ABNF parser
    pub grammar: PathBuf,

    /// Dependency metadata JSON listing imported and extended rules
    #[arg(long)]
    pub deps: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Render only this rule (case-insensitive)
    #[arg(long)]
    pub rule: Option<String>,

    /// Which rules get a diagram
    #[arg(long, value_enum, default_value_t = DiagramsArg::SkipForeign, env = "ABNFVIEW_DIAGRAMS")]
    pub diagrams: DiagramsArg,

    /// Arrangement of listings and diagrams in HTML output
    #[arg(long, value_enum, default_value_t = LayoutArg::Interleaved)]
    pub layout: LayoutArg,

    /// Do not label diagrams with their rule name
    #[arg(long)]
    pub no_labels: bool,

    /// How links into other grammars are built
    #[arg(long, value_enum, default_value_t = LinkStyleArg::RfcNumber, env = "ABNFVIEW_LINK_STYLE")]
    pub link_style: LinkStyleArg,

    /// Maximum nesting depth of a rule definition
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Output formats for the render command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Listings in `<pre>` blocks with inline diagram scripts
    Html,
    /// Plain ABNF listing without markup or diagrams
    Text,
    /// Per-rule text, provenance and diagram tree as JSON
    Json,
    /// One railroad-diagrams expression per diagram
    Railroad,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DiagramsArg {
    SkipForeign,
    Always,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    Interleaved,
    Grouped,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LinkStyleArg {
    RfcNumber,
    Verbatim,
}

impl From<DiagramsArg> for DiagramPolicy {
    fn from(arg: DiagramsArg) -> Self {
        match arg {
            DiagramsArg::SkipForeign => DiagramPolicy::SkipForeign,
            DiagramsArg::Always => DiagramPolicy::Always,
        }
    }
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Interleaved => Layout::Interleaved,
            LayoutArg::Grouped => Layout::Grouped,
        }
    }
}

impl From<LinkStyleArg> for LinkStyle {
    fn from(arg: LinkStyleArg) -> Self {
        match arg {
            LinkStyleArg::RfcNumber => LinkStyle::RfcNumber,
            LinkStyleArg::Verbatim => LinkStyle::Verbatim,
        }
    }
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions::builder()
            .diagram_policy(self.diagrams.into())
            .label_diagrams(!self.no_labels)
            .max_depth(self.max_depth)
            .link_style(self.link_style.into())
            .layout(self.layout.into())
            .build()
    }
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let grammar = match open_grammar(&args.grammar) {
        Ok(grammar) => grammar,
        Err(code) => return Ok(code),
    };
    let metadata = read_metadata(args.deps.as_ref());
    let options = args.options();

    let html = HtmlDecorator::new(options.link_style);
    let decorator: &dyn Decorator = match args.format {
        OutputFormat::Text => &PlainDecorator,
        OutputFormat::Html | OutputFormat::Json | OutputFormat::Railroad => &html,
    };

    let layout = options.layout;
    let renderer = Renderer::new(&grammar, &metadata, options);
    let result = match &args.rule {
        Some(name) => renderer.render_rule(name, decorator).map(|rule| Rendering {
            rules: vec![rule],
            layout,
        }),
        None => renderer.render(decorator),
    };

    let rendering = match result {
        Ok(rendering) => rendering,
        Err(e) => {
            if args.format == OutputFormat::Json {
                let output = serde_json::json!({ "error": e.to_string() });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output).into_diagnostic()?
                );
            } else {
                eprintln!("Render error: {}", e);
            }
            return Ok(exitcode::DATAERR);
        }
    };
    debug!(rules = rendering.rules.len(), "rendered grammar");

    match args.format {
        OutputFormat::Html => print!("{}", rendering.to_html()),
        OutputFormat::Text => print!("{}", rendering.text()),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&rendering).into_diagnostic()?
            );
        }
        OutputFormat::Railroad => print!("{}", rendering.railroad_script()),
    }
    Ok(exitcode::OK)
}

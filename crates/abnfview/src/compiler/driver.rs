//! Per-grammar orchestration of the text and diagram compilers.

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::compiler::context::{DEFAULT_MAX_DEPTH, RenderContext};
use crate::compiler::decorator::{Decorator, HtmlDecorator, LinkStyle, escape_attr};
use crate::compiler::diagram::DiagramCompiler;
use crate::compiler::entry_points::{EntryPoints, find_entry_points};
use crate::compiler::resolver::classify;
use crate::compiler::text::TextCompiler;
use crate::compiler::RenderError;
use crate::grammar::{Grammar, Node};
use crate::types::{DependencyMetadata, DiagramNode, Provenance};

/// Which rules get a locally rendered diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramPolicy {
    /// Only native rules. An imported or extended rule's diagram belongs to
    /// its source grammar.
    #[default]
    SkipForeign,
    /// Every rule, whatever its provenance.
    Always,
}

/// How text and diagrams are arranged in combined output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Each rule's text followed by its diagram.
    #[default]
    Interleaved,
    /// All text, then all diagrams.
    Grouped,
}

/// Configuration for rendering a grammar.
///
/// # Example
///
/// ```
/// use abnfview::{DiagramPolicy, RenderOptions};
///
/// let options = RenderOptions::builder()
///     .diagram_policy(DiagramPolicy::Always)
///     .label_diagrams(false)
///     .build();
/// assert_eq!(options.max_depth, 256);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct RenderOptions {
    /// Which rules get a diagram.
    #[builder(default)]
    pub diagram_policy: DiagramPolicy,

    /// Prefix each diagram with a comment naming its rule.
    #[builder(default = true)]
    pub label_diagrams: bool,

    /// Maximum nesting depth of a definition tree.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// How links into other grammars are built.
    #[builder(default)]
    pub link_style: LinkStyle,

    /// Arrangement of combined output.
    #[builder(default)]
    pub layout: Layout,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::builder().build()
    }
}

/// One rule's rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRule {
    /// The rule's declared name.
    pub name: String,
    pub provenance: Provenance,
    /// Whether no other rule in the grammar references this one.
    pub entry_point: bool,
    /// Decorated ABNF text.
    pub text: String,
    /// The diagram, unless skipped by [`DiagramPolicy`].
    pub diagram: Option<DiagramNode>,
}

/// A whole grammar's rendering, rules in declared order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendering {
    pub rules: Vec<RenderedRule>,
    #[serde(skip)]
    pub layout: Layout,
}

impl Rendering {
    /// All decorated text, each rule followed by a blank line.
    pub fn text(&self) -> String {
        self.rules
            .iter()
            .map(|rule| format!("{}\n\n", rule.text))
            .collect()
    }

    /// Every rendered diagram, in declared order.
    pub fn diagrams(&self) -> impl Iterator<Item = &DiagramNode> {
        self.rules.iter().filter_map(|rule| rule.diagram.as_ref())
    }

    /// Railroad-diagrams script source: one expression per diagram.
    pub fn railroad_script(&self) -> String {
        self.diagrams().map(|d| format!("{d}\n")).collect()
    }

    /// An HTML fragment: listings in `<pre>` blocks and diagrams as inline
    /// scripts that draw in place, arranged per [`Layout`].
    pub fn to_html(&self) -> String {
        let listing = |rule: &RenderedRule| {
            format!(
                "<pre class=\"abnf\" data-rule=\"{}\">{}</pre>\n",
                escape_attr(&rule.name),
                rule.text
            )
        };
        let script = |rule: &RenderedRule| {
            rule.diagram
                .as_ref()
                .map(|d| format!("<script>{d}.addTo();</script>\n"))
                .unwrap_or_default()
        };
        match self.layout {
            Layout::Interleaved => self
                .rules
                .iter()
                .map(|rule| listing(rule) + &script(rule))
                .collect(),
            Layout::Grouped => {
                let listings: String = self.rules.iter().map(listing).collect();
                let scripts: String = self.rules.iter().map(script).collect();
                listings + &scripts
            }
        }
    }
}

/// Renders the rules of one grammar.
///
/// Entry points are computed once on construction; each rule is then
/// compiled independently, in declared order.
pub struct Renderer<'a> {
    grammar: &'a Grammar,
    metadata: &'a DependencyMetadata,
    options: RenderOptions,
    entry_points: EntryPoints,
}

impl<'a> Renderer<'a> {
    pub fn new(
        grammar: &'a Grammar,
        metadata: &'a DependencyMetadata,
        options: RenderOptions,
    ) -> Self {
        let entry_points = find_entry_points(grammar);
        debug!(
            rules = grammar.len(),
            entry_points = entry_points.len(),
            "prepared grammar for rendering"
        );
        Self {
            grammar,
            metadata,
            options,
            entry_points,
        }
    }

    pub fn entry_points(&self) -> &EntryPoints {
        &self.entry_points
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every rule with `decorator`.
    pub fn render(&self, decorator: &dyn Decorator) -> Result<Rendering, RenderError> {
        let rules = self
            .grammar
            .rules()
            .map(|rule| self.render_node(rule, decorator))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Rendering {
            rules,
            layout: self.options.layout,
        })
    }

    /// Render the single rule named `name`, ignoring case.
    pub fn render_rule(
        &self,
        name: &str,
        decorator: &dyn Decorator,
    ) -> Result<RenderedRule, RenderError> {
        let rule = self
            .grammar
            .get(name)
            .ok_or_else(|| RenderError::UnknownRule {
                name: name.to_string(),
            })?;
        self.render_node(rule, decorator)
    }

    fn render_node(
        &self,
        rule: &Node,
        decorator: &dyn Decorator,
    ) -> Result<RenderedRule, RenderError> {
        let Node::Rule { name, .. } = rule else {
            return Err(RenderContext::new("", self.options.max_depth)
                .malformed(rule.kind(), "expected a rule definition at the top level"));
        };
        let text = TextCompiler::new(self.metadata, decorator)
            .with_grammar(self.grammar)
            .with_max_depth(self.options.max_depth)
            .render(rule)?;
        let name = name.clone();
        let provenance = classify(&name, self.metadata);
        let diagram = if provenance.is_native() || self.options.diagram_policy == DiagramPolicy::Always
        {
            let diagram = DiagramCompiler::new(&self.entry_points)
                .with_grammar(self.grammar)
                .with_label(self.options.label_diagrams)
                .with_max_depth(self.options.max_depth)
                .render(rule)?;
            Some(diagram)
        } else {
            trace!(rule = %name, %provenance, "skipping diagram for foreign rule");
            None
        };
        trace!(rule = %name, "rendered rule");
        Ok(RenderedRule {
            entry_point: self.entry_points.contains(&name),
            name,
            provenance,
            text,
            diagram,
        })
    }
}

/// Render a whole grammar as HTML-decorated text plus diagrams.
pub fn render_grammar(
    grammar: &Grammar,
    metadata: &DependencyMetadata,
    options: RenderOptions,
) -> Result<Rendering, RenderError> {
    let decorator = HtmlDecorator::new(options.link_style);
    Renderer::new(grammar, metadata, options).render(&decorator)
}

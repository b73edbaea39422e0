//! Diagram compiler: folds a rule definition into a railroad diagram tree.

use crate::compiler::context::{DEFAULT_MAX_DEPTH, RenderContext};
use crate::compiler::entry_points::EntryPoints;
use crate::compiler::RenderError;
use crate::grammar::{Base, Grammar, Node, NodeKind, Repeat};
use crate::types::DiagramNode;

/// Render one rule definition as a diagram tree.
///
/// Entry-point rules become a [`DiagramNode::ComplexDiagram`], all others a
/// [`DiagramNode::Diagram`]. Either is prefixed with a comment carrying the
/// rule's name.
///
/// # Errors
///
/// Returns [`RenderError::MalformedConstruct`] if `rule` is not a
/// [`Node::Rule`], contains a nested rule, or has a numeric terminal with no
/// value.
pub fn render_diagram(rule: &Node, entry_points: &EntryPoints) -> Result<DiagramNode, RenderError> {
    DiagramCompiler::new(entry_points).render(rule)
}

/// Diagram compiler with its configuration.
pub struct DiagramCompiler<'a> {
    entry_points: &'a EntryPoints,
    /// When set, references link to the referenced rule's declared spelling.
    grammar: Option<&'a Grammar>,
    /// Prefix each diagram with a comment naming its rule.
    label: bool,
    max_depth: usize,
}

impl<'a> DiagramCompiler<'a> {
    pub fn new(entry_points: &'a EntryPoints) -> Self {
        Self {
            entry_points,
            grammar: None,
            label: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Resolve reference anchors against the rules declared in `grammar`.
    pub fn with_grammar(mut self, grammar: &'a Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    pub fn with_label(mut self, label: bool) -> Self {
        self.label = label;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render one rule definition.
    pub fn render(&self, rule: &Node) -> Result<DiagramNode, RenderError> {
        let Node::Rule { name, def } = rule else {
            return Err(RenderContext::new("", self.max_depth)
                .malformed(rule.kind(), "expected a rule definition at the top level"));
        };
        let mut ctx = RenderContext::new(name, self.max_depth);
        let body = self.node(def, &mut ctx)?;
        let items = if self.label {
            vec![DiagramNode::comment(name.as_str()), body]
        } else {
            vec![body]
        };
        if self.entry_points.contains(name) {
            Ok(DiagramNode::complex_diagram(items))
        } else {
            Ok(DiagramNode::diagram(items))
        }
    }

    fn node(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<DiagramNode, RenderError> {
        ctx.descend()?;
        let kind = node.kind();
        let rendered = match node {
            Node::Rule { .. } => {
                return Err(ctx.malformed(kind, "rule definitions cannot be nested"));
            }
            Node::CaseSensitiveString { text, base }
            | Node::CaseInsensitiveString { text, base } => {
                DiagramNode::terminal(terminal_text(text, *base, kind, ctx)?)
            }
            Node::Range { first, last, base } => {
                DiagramNode::terminal(base.encode_range(*first, *last))
            }
            Node::Prose { text } => DiagramNode::terminal(format!("<{text}>")),
            Node::RuleRef { name } => {
                DiagramNode::non_terminal_to(name.as_str(), self.anchor_for(name))
            }
            Node::Concatenation { elements } => DiagramNode::sequence(self.nodes(elements, ctx)?),
            Node::Alternation { alts } => DiagramNode::choice(self.nodes(alts, ctx)?),
            Node::Group { alt } => DiagramNode::group(self.node(alt, ctx)?),
            Node::Repetition { el, rep } => self.repetition(el, *rep, ctx)?,
        };
        ctx.ascend();
        Ok(rendered)
    }

    fn nodes(
        &self,
        nodes: &[Node],
        ctx: &mut RenderContext<'_>,
    ) -> Result<Vec<DiagramNode>, RenderError> {
        nodes.iter().map(|node| self.node(node, ctx)).collect()
    }

    /// `{0,1}` is optional; anything else loops, labelled with its bounds
    /// since the loop itself cannot show an upper limit.
    fn repetition(
        &self,
        el: &Node,
        rep: Repeat,
        ctx: &mut RenderContext<'_>,
    ) -> Result<DiagramNode, RenderError> {
        // Parentheses around a repeated element are syntax, not a visual group.
        let el = match el {
            Node::Group { alt } => alt.as_ref(),
            other => other,
        };
        let item = self.node(el, ctx)?;
        if rep.is_optional() {
            return Ok(DiagramNode::optional(item));
        }
        let label = DiagramNode::comment(rep.label());
        if rep.min == 0 {
            Ok(DiagramNode::zero_or_more(item, label))
        } else {
            Ok(DiagramNode::one_or_more(item, label))
        }
    }

    fn anchor_for<'n>(&'n self, name: &'n str) -> &'n str {
        self.grammar
            .and_then(|grammar| grammar.declared_name(name))
            .unwrap_or(name)
    }
}

/// `%x41` for numeric terminals, `"text"` otherwise. A numeric terminal
/// shows only its first character's code.
fn terminal_text(
    text: &str,
    base: Option<Base>,
    kind: NodeKind,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    match base {
        Some(base) => base
            .encode_first(text)
            .ok_or_else(|| ctx.malformed(kind, "numeric terminal has no value")),
        None => Ok(format!("\"{text}\"")),
    }
}

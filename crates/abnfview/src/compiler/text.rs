//! Annotated-text compiler: serializes a rule definition back to ABNF,
//! decorated for styling and cross-linking.

use crate::compiler::context::{DEFAULT_MAX_DEPTH, RenderContext};
use crate::compiler::decorator::Decorator;
use crate::compiler::resolver::classify;
use crate::compiler::RenderError;
use crate::grammar::{Base, Grammar, Node, NodeKind, Repeat};
use crate::types::DependencyMetadata;

/// Render one rule definition as decorated ABNF text.
///
/// The declared name is classified against `metadata`: imported and
/// extended rules get a provenance comment and a link to their source
/// grammar. References link to same-page anchors regardless of provenance.
///
/// # Errors
///
/// Returns [`RenderError::MalformedConstruct`] if `rule` is not a
/// [`Node::Rule`], contains a nested rule, or has a numeric terminal with no
/// value.
pub fn render_text(
    rule: &Node,
    metadata: &DependencyMetadata,
    decorator: &dyn Decorator,
) -> Result<String, RenderError> {
    TextCompiler::new(metadata, decorator).render(rule)
}

/// Text compiler with its configuration.
pub struct TextCompiler<'a> {
    metadata: &'a DependencyMetadata,
    decorator: &'a dyn Decorator,
    /// When set, references link to the referenced rule's declared spelling.
    grammar: Option<&'a Grammar>,
    max_depth: usize,
}

impl<'a> TextCompiler<'a> {
    pub fn new(metadata: &'a DependencyMetadata, decorator: &'a dyn Decorator) -> Self {
        Self {
            metadata,
            decorator,
            grammar: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Resolve reference anchors against the rules declared in `grammar`.
    pub fn with_grammar(mut self, grammar: &'a Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render one rule definition.
    pub fn render(&self, rule: &Node) -> Result<String, RenderError> {
        let Node::Rule { name, def } = rule else {
            return Err(RenderContext::new("", self.max_depth)
                .malformed(rule.kind(), "expected a rule definition at the top level"));
        };
        let mut ctx = RenderContext::new(name, self.max_depth);
        let provenance = classify(name, self.metadata);
        let decl = self.decorator.rule_name_decl(name, &provenance);
        let body = self.node(def, &mut ctx)?;
        Ok(self.decorator.wrap(NodeKind::Rule, format!("{decl} = {body}")))
    }

    fn node(&self, node: &Node, ctx: &mut RenderContext<'_>) -> Result<String, RenderError> {
        ctx.descend()?;
        let d = self.decorator;
        let kind = node.kind();
        let rendered = match node {
            Node::Rule { .. } => {
                return Err(ctx.malformed(kind, "rule definitions cannot be nested"));
            }
            Node::CaseSensitiveString { text, base } => {
                d.wrap(kind, self.literal(text, *base, "%s", kind, ctx)?)
            }
            Node::CaseInsensitiveString { text, base } => {
                d.wrap(kind, self.literal(text, *base, "", kind, ctx)?)
            }
            Node::Range { first, last, base } => {
                d.wrap(kind, d.escape(&base.encode_range(*first, *last)))
            }
            Node::Prose { text } => d.wrap(kind, d.escape(&format!("<{text}>"))),
            Node::RuleRef { name } => d.rule_name_ref(name, self.anchor_for(name)),
            Node::Concatenation { elements } => d.wrap(kind, self.join(elements, " ", ctx)?),
            Node::Alternation { alts } => d.wrap(kind, self.join(alts, " / ", ctx)?),
            Node::Group { alt } => d.wrap(kind, format!("({})", self.node(alt, ctx)?)),
            Node::Repetition { el, rep } => d.wrap(kind, self.repetition(el, *rep, ctx)?),
        };
        ctx.ascend();
        Ok(rendered)
    }

    /// A quoted literal, or its numeric encoding when `base` is present.
    fn literal(
        &self,
        text: &str,
        base: Option<Base>,
        prefix: &str,
        kind: NodeKind,
        ctx: &RenderContext<'_>,
    ) -> Result<String, RenderError> {
        match base {
            Some(base) => base
                .encode_text(text)
                .map(|encoded| self.decorator.escape(&encoded))
                .ok_or_else(|| ctx.malformed(kind, "numeric terminal has no value")),
            None => Ok(self.decorator.escape(&format!("{prefix}\"{text}\""))),
        }
    }

    fn join(
        &self,
        nodes: &[Node],
        separator: &str,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, RenderError> {
        let parts = nodes
            .iter()
            .map(|node| self.node(node, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(separator))
    }

    /// `[el]` for optional elements, otherwise the repeat prefix then `el`.
    fn repetition(
        &self,
        el: &Node,
        rep: Repeat,
        ctx: &mut RenderContext<'_>,
    ) -> Result<String, RenderError> {
        if rep.is_optional() {
            // Brackets already group, so a parenthesized child is unwrapped.
            let inner = match el {
                Node::Group { alt } => self.node(alt, ctx)?,
                other => self.node(other, ctx)?,
            };
            return Ok(format!("[{inner}]"));
        }
        Ok(format!("{}{}", rep.abnf_prefix(), self.node(el, ctx)?))
    }

    fn anchor_for<'n>(&'n self, name: &'n str) -> &'n str {
        self.grammar
            .and_then(|grammar| grammar.declared_name(name))
            .unwrap_or(name)
    }
}

//! Decorators turn the text compiler's ABNF pieces into styled output.
//!
//! Every construct is wrapped through [`Decorator::wrap`], keyed by its
//! [`NodeKind`]; rule names get dedicated hooks for declaration and reference
//! sites so they can carry anchors and cross-grammar links.

use serde::{Deserialize, Serialize};

use crate::grammar::NodeKind;
use crate::types::Provenance;

/// Styling and linking for annotated ABNF text.
pub trait Decorator {
    /// Wraps the serialization of one construct.
    fn wrap(&self, kind: NodeKind, inner: String) -> String;

    /// Escapes literal grammar text for the output medium.
    fn escape(&self, text: &str) -> String;

    /// Renders a rule name at its declaration site, including any provenance
    /// comment line.
    fn rule_name_decl(&self, name: &str, provenance: &Provenance) -> String;

    /// Renders a rule name at a reference site. `target` is the anchor of
    /// the referenced rule.
    fn rule_name_ref(&self, name: &str, target: &str) -> String;
}

/// The styling class for each construct.
pub fn construct_class(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Rule => "rule",
        NodeKind::CaseSensitiveString => "case-sensitive-string",
        NodeKind::CaseInsensitiveString => "case-insensitive-string",
        NodeKind::Range => "range",
        NodeKind::Prose => "prose",
        NodeKind::RuleRef => "rulename",
        NodeKind::Concatenation => "concatenation",
        NodeKind::Alternation => "alternation",
        NodeKind::Group => "group",
        NodeKind::Repetition => "repetition",
    }
}

/// How links to another grammar's rendering are built from its identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStyle {
    /// `RFC1234` links to `?1234`: grammars are selected by RFC number.
    #[default]
    RfcNumber,
    /// `RFC1234` links to `?RFC1234`.
    Verbatim,
}

impl LinkStyle {
    /// The query string selecting `source`'s rendering.
    pub fn grammar_href(self, source: &str) -> String {
        match self {
            LinkStyle::RfcNumber => {
                let number = source
                    .get(..3)
                    .filter(|prefix| prefix.eq_ignore_ascii_case("rfc"))
                    .and_then(|_| source.get(3..))
                    .filter(|rest| !rest.is_empty())
                    .unwrap_or(source);
                format!("?{number}")
            }
            LinkStyle::Verbatim => format!("?{source}"),
        }
    }

    /// The link to `rule`'s anchor inside `source`'s rendering.
    pub fn rule_href(self, source: &str, rule: &str) -> String {
        format!("{}#{rule}", self.grammar_href(source))
    }
}

fn provenance_verb(provenance: &Provenance) -> &'static str {
    match provenance {
        Provenance::Native => "",
        Provenance::Imported { .. } => "Imported from",
        Provenance::Extended { .. } => "Extends",
    }
}

/// HTML output: spans classed per construct, `<dfn>` anchors at declarations
/// and links at references.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDecorator {
    link_style: LinkStyle,
}

impl HtmlDecorator {
    pub fn new(link_style: LinkStyle) -> Self {
        Self { link_style }
    }
}

impl Decorator for HtmlDecorator {
    fn wrap(&self, kind: NodeKind, inner: String) -> String {
        format!("<span class='{}'>{inner}</span>", construct_class(kind))
    }

    fn escape(&self, text: &str) -> String {
        escape_html(text)
    }

    fn rule_name_decl(&self, name: &str, provenance: &Provenance) -> String {
        let anchor = format!(
            "<dfn id=\"{}\">{}</dfn>",
            escape_attr(name),
            escape_html(name)
        );
        let Some(source) = provenance.source() else {
            return anchor;
        };
        let grammar_href = escape_attr(&self.link_style.grammar_href(source));
        let rule_href = escape_attr(&self.link_style.rule_href(source, name));
        format!(
            "<span class='comment'>; {} <a href=\"{grammar_href}\">{}</a></span>\n<a href=\"{rule_href}\">{anchor}</a>",
            provenance_verb(provenance),
            escape_html(source),
        )
    }

    fn rule_name_ref(&self, name: &str, target: &str) -> String {
        format!(
            "<a href=\"#{}\">{}</a>",
            escape_attr(target),
            escape_html(name)
        )
    }
}

/// Bare ABNF: no markup, provenance as an ABNF comment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDecorator;

impl Decorator for PlainDecorator {
    fn wrap(&self, _kind: NodeKind, inner: String) -> String {
        inner
    }

    fn escape(&self, text: &str) -> String {
        text.to_string()
    }

    fn rule_name_decl(&self, name: &str, provenance: &Provenance) -> String {
        match provenance.source() {
            Some(source) => format!("; {} {source}\n{name}", provenance_verb(provenance)),
            None => name.to_string(),
        }
    }

    fn rule_name_ref(&self, name: &str, _target: &str) -> String {
        name.to_string()
    }
}

/// Escapes text content for HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escapes a value for a quoted HTML attribute.
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc_number_strips_prefix_case_insensitively() {
        assert_eq!(LinkStyle::RfcNumber.grammar_href("RFC1234"), "?1234");
        assert_eq!(LinkStyle::RfcNumber.grammar_href("rfc5234"), "?5234");
        assert_eq!(LinkStyle::RfcNumber.grammar_href("rfc"), "?rfc");
        assert_eq!(LinkStyle::RfcNumber.grammar_href("ISO8601"), "?ISO8601");
    }

    #[test]
    fn verbatim_keeps_identifier() {
        assert_eq!(
            LinkStyle::Verbatim.rule_href("RFC1234", "token"),
            "?RFC1234#token"
        );
    }

    #[test]
    fn escape_html_leaves_quotes_in_text() {
        assert_eq!(escape_html("<a & \"b\">"), "&lt;a &amp; \"b\"&gt;");
    }

    #[test]
    fn escape_attr_quotes() {
        assert_eq!(escape_attr("a\"b'c"), "a&quot;b&#39;c");
    }
}

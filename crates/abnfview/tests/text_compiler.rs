//! Tests for the annotated-text compiler.

use abnfview::compiler::TextCompiler;
use abnfview::grammar::{Base, NodeKind, Repeat, parse_grammar};
use abnfview::{
    DependencyMetadata, HtmlDecorator, LinkStyle, Node, PlainDecorator, RenderError, render_text,
};

fn rule(name: &str, def: Node) -> Node {
    Node::Rule {
        name: name.to_string(),
        def: Box::new(def),
    }
}

fn reference(name: &str) -> Node {
    Node::RuleRef {
        name: name.to_string(),
    }
}

fn literal(text: &str) -> Node {
    Node::CaseInsensitiveString {
        text: text.to_string(),
        base: None,
    }
}

fn numeric(text: &str, base: Base) -> Node {
    Node::CaseSensitiveString {
        text: text.to_string(),
        base: Some(base),
    }
}

fn repeat(el: Node, min: u32, max: Option<u32>) -> Node {
    Node::Repetition {
        el: Box::new(el),
        rep: Repeat { min, max },
    }
}

fn group(alt: Node) -> Node {
    Node::Group { alt: Box::new(alt) }
}

/// `rule = "a" *("b" / "c")`
fn sample_rule() -> Node {
    rule(
        "rule",
        Node::Concatenation {
            elements: vec![
                literal("a"),
                repeat(
                    group(Node::Alternation {
                        alts: vec![literal("b"), literal("c")],
                    }),
                    0,
                    None,
                ),
            ],
        },
    )
}

fn plain(node: &Node) -> String {
    render_text(node, &DependencyMetadata::default(), &PlainDecorator).unwrap()
}

// =========================================================================
// ABNF serialization
// =========================================================================

#[test]
fn plain_text_round_trips_surface_syntax() {
    assert_eq!(plain(&sample_rule()), r#"rule = "a" *("b" / "c")"#);
}

#[test]
fn optional_renders_in_brackets() {
    let node = rule(
        "opt",
        repeat(
            group(Node::Alternation {
                alts: vec![literal("x"), literal("y")],
            }),
            0,
            Some(1),
        ),
    );
    assert_eq!(plain(&node), r#"opt = ["x" / "y"]"#);
}

#[test]
fn repeat_prefixes() {
    let cases = [
        (2, Some(2), "r = 2x"),
        (1, None, "r = 1*x"),
        (0, None, "r = *x"),
        (0, Some(5), "r = *5x"),
        (2, Some(5), "r = 2*5x"),
    ];
    for (min, max, expected) in cases {
        let node = rule("r", repeat(reference("x"), min, max));
        assert_eq!(plain(&node), expected, "bounds {min}..{max:?}");
    }
}

#[test]
fn numeric_terminals_use_base_letter() {
    assert_eq!(plain(&rule("a", numeric("A", Base::Hexadecimal))), "a = %x41");
    assert_eq!(plain(&rule("a", numeric("A", Base::Decimal))), "a = %d65");
    assert_eq!(plain(&rule("a", numeric("A", Base::Binary))), "a = %b1000001");
    assert_eq!(
        plain(&rule("crlf", numeric("\r\n", Base::Hexadecimal))),
        "crlf = %xd.a"
    );
}

#[test]
fn case_sensitive_literal_has_prefix() {
    let node = rule(
        "kw",
        Node::CaseSensitiveString {
            text: "Ab".to_string(),
            base: None,
        },
    );
    assert_eq!(plain(&node), r#"kw = %s"Ab""#);
}

#[test]
fn range_and_prose() {
    let node = rule(
        "x",
        Node::Alternation {
            alts: vec![
                Node::Range {
                    first: 0x30,
                    last: 0x39,
                    base: Base::Hexadecimal,
                },
                Node::Prose {
                    text: "see RFC 3986".to_string(),
                },
            ],
        },
    );
    assert_eq!(plain(&node), "x = %x30-39 / <see RFC 3986>");
}

// =========================================================================
// HTML decoration
// =========================================================================

#[test]
fn html_wraps_every_construct() {
    let text = render_text(
        &sample_rule(),
        &DependencyMetadata::default(),
        &HtmlDecorator::default(),
    )
    .unwrap();
    assert_eq!(
        text,
        concat!(
            "<span class='rule'><dfn id=\"rule\">rule</dfn> = ",
            "<span class='concatenation'>",
            "<span class='case-insensitive-string'>\"a\"</span> ",
            "<span class='repetition'>*<span class='group'>(",
            "<span class='alternation'>",
            "<span class='case-insensitive-string'>\"b\"</span> / ",
            "<span class='case-insensitive-string'>\"c\"</span>",
            "</span>)</span></span></span></span>"
        )
    );
}

#[test]
fn html_escapes_prose() {
    let node = rule(
        "p",
        Node::Prose {
            text: "any <b>".to_string(),
        },
    );
    let text = render_text(&node, &DependencyMetadata::default(), &HtmlDecorator::default())
        .unwrap();
    assert!(text.contains("<span class='prose'>&lt;any &lt;b&gt;&gt;</span>"));
}

#[test]
fn references_link_regardless_of_provenance() {
    let metadata = DependencyMetadata::new().with_import("DIGIT", "RFC5234");
    let node = rule("year", repeat(reference("DIGIT"), 4, Some(4)));
    let text = render_text(&node, &metadata, &HtmlDecorator::default()).unwrap();
    assert!(text.contains("<a href=\"#DIGIT\">DIGIT</a>"));
    assert!(!text.contains("comment"));
}

#[test]
fn references_link_to_declared_spelling() {
    let grammar = parse_grammar(
        r#"{"defs": {
            "DATE": {"type": "rule", "name": "date", "def": {"type": "ruleref", "name": "DIGIT"}},
            "DIGIT": {"type": "rule", "name": "digit", "def": {"type": "range", "first": 48, "last": 57, "base": 16}}
        }}"#,
    )
    .unwrap();
    let metadata = DependencyMetadata::default();
    let decorator = HtmlDecorator::default();
    let text = TextCompiler::new(&metadata, &decorator)
        .with_grammar(&grammar)
        .render(grammar.get("date").unwrap())
        .unwrap();
    assert!(text.contains("<a href=\"#digit\">DIGIT</a>"));
}

// =========================================================================
// Provenance annotations
// =========================================================================

#[test]
fn native_declaration_is_self_anchor_only() {
    let text = render_text(
        &rule("date", reference("year")),
        &DependencyMetadata::default(),
        &HtmlDecorator::default(),
    )
    .unwrap();
    assert!(text.starts_with("<span class='rule'><dfn id=\"date\">date</dfn> = "));
    assert!(!text.contains("comment"));
}

#[test]
fn extended_rule_gets_comment_and_source_link() {
    let metadata = DependencyMetadata::new().with_extension("token", "RFC1234");
    let text = render_text(
        &rule("token", reference("tchar")),
        &metadata,
        &HtmlDecorator::default(),
    )
    .unwrap();
    assert_eq!(
        text,
        concat!(
            "<span class='rule'>",
            "<span class='comment'>; Extends <a href=\"?1234\">RFC1234</a></span>\n",
            "<a href=\"?1234#token\"><dfn id=\"token\">token</dfn></a>",
            " = <a href=\"#tchar\">tchar</a></span>"
        )
    );
}

#[test]
fn imported_rule_with_verbatim_links() {
    let metadata = DependencyMetadata::new().with_import("ALPHA", "RFC5234");
    let node = rule(
        "ALPHA",
        Node::Range {
            first: 0x41,
            last: 0x5a,
            base: Base::Hexadecimal,
        },
    );
    let text = render_text(&node, &metadata, &HtmlDecorator::new(LinkStyle::Verbatim)).unwrap();
    assert!(text.contains("; Imported from <a href=\"?RFC5234\">RFC5234</a>"));
    assert!(text.contains("<a href=\"?RFC5234#ALPHA\"><dfn id=\"ALPHA\">ALPHA</dfn></a>"));
}

#[test]
fn plain_provenance_comment() {
    let metadata = DependencyMetadata::new().with_import("DIGIT", "RFC5234");
    let node = rule(
        "DIGIT",
        Node::Range {
            first: 0x30,
            last: 0x39,
            base: Base::Hexadecimal,
        },
    );
    assert_eq!(
        render_text(&node, &metadata, &PlainDecorator).unwrap(),
        "; Imported from RFC5234\nDIGIT = %x30-39"
    );
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn top_level_must_be_rule() {
    let err = render_text(
        &literal("x"),
        &DependencyMetadata::default(),
        &PlainDecorator,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RenderError::MalformedConstruct {
            kind: NodeKind::CaseInsensitiveString,
            ..
        }
    ));
}

#[test]
fn nested_rule_is_malformed() {
    let node = rule("outer", rule("inner", literal("x")));
    let err = render_text(&node, &DependencyMetadata::default(), &PlainDecorator).unwrap_err();
    assert_eq!(
        err,
        RenderError::MalformedConstruct {
            rule: "outer".to_string(),
            kind: NodeKind::Rule,
            message: "rule definitions cannot be nested".to_string(),
        }
    );
}

#[test]
fn empty_numeric_terminal_is_malformed() {
    let node = rule("e", numeric("", Base::Hexadecimal));
    let err = render_text(&node, &DependencyMetadata::default(), &PlainDecorator).unwrap_err();
    assert!(err.to_string().contains("numeric terminal has no value"));
}

#[test]
fn deep_nesting_is_bounded() {
    let mut node = literal("x");
    for _ in 0..10 {
        node = group(node);
    }
    let metadata = DependencyMetadata::default();
    let err = TextCompiler::new(&metadata, &PlainDecorator)
        .with_max_depth(5)
        .render(&rule("deep", node))
        .unwrap_err();
    assert_eq!(
        err,
        RenderError::MaxDepthExceeded {
            rule: "deep".to_string(),
            limit: 5,
        }
    );
}

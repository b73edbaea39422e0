//! Tests for the railroad diagram compiler.

use abnfview::compiler::DiagramCompiler;
use abnfview::grammar::{Base, NodeKind, Repeat, parse_grammar};
use abnfview::{DiagramNode, EntryPoints, Node, RenderError, render_diagram};
use insta::assert_snapshot;

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

fn repeat(el: Node, min: u32, max: Option<u32>) -> Node {
    Node::Repetition {
        el: Box::new(el),
        rep: Repeat { min, max },
    }
}

fn group(alt: Node) -> Node {
    Node::Group { alt: Box::new(alt) }
}

fn no_entry_points() -> EntryPoints {
    EntryPoints::default()
}

/// The diagram body of `def` rendered as rule `r`.
fn body_of(def: Node) -> DiagramNode {
    let diagram = render_diagram(&rule("r", def), &no_entry_points()).unwrap();
    diagram.body().cloned().unwrap()
}

// =========================================================================
// Root diagrams
// =========================================================================

#[test]
fn entry_point_gets_complex_diagram() {
    let entry_points = EntryPoints::from_names(["rule"]);
    let diagram = render_diagram(
        &rule(
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
        ),
        &entry_points,
    )
    .unwrap();
    assert!(matches!(diagram, DiagramNode::ComplexDiagram { .. }));
    assert_snapshot!(
        diagram.to_string(),
        @r#"ComplexDiagram(Comment("rule"), Sequence(Terminal("\"a\""), ZeroOrMore(Choice(0, Terminal("\"b\""), Terminal("\"c\"")), Comment("0-∞"))))"#
    );
}

#[test]
fn referenced_rule_gets_plain_diagram() {
    let entry_points = EntryPoints::from_names(["top"]);
    let diagram = render_diagram(&rule("digit", literal("0")), &entry_points).unwrap();
    assert_eq!(
        diagram,
        DiagramNode::diagram(vec![
            DiagramNode::comment("digit"),
            DiagramNode::terminal("\"0\""),
        ])
    );
}

#[test]
fn entry_point_match_ignores_case() {
    let entry_points = EntryPoints::from_names(["DATE"]);
    let diagram = render_diagram(&rule("date", literal("x")), &entry_points).unwrap();
    assert!(matches!(diagram, DiagramNode::ComplexDiagram { .. }));
}

#[test]
fn label_can_be_disabled() {
    let entry_points = no_entry_points();
    let diagram = DiagramCompiler::new(&entry_points)
        .with_label(false)
        .render(&rule("r", literal("x")))
        .unwrap();
    assert_eq!(
        diagram,
        DiagramNode::diagram(vec![DiagramNode::terminal("\"x\"")])
    );
}

// =========================================================================
// Constructs
// =========================================================================

#[test]
fn terminals() {
    assert_eq!(
        body_of(Node::CaseSensitiveString {
            text: "\r\n".to_string(),
            base: Some(Base::Hexadecimal),
        }),
        DiagramNode::terminal("%xd")
    );
    assert_eq!(
        body_of(Node::Range {
            first: 0x61,
            last: 0x7a,
            base: Base::Hexadecimal,
        }),
        DiagramNode::terminal("%x61-7a")
    );
    assert_eq!(
        body_of(Node::Prose {
            text: "host name".to_string(),
        }),
        DiagramNode::terminal("<host name>")
    );
}

#[test]
fn reference_links_to_anchor() {
    assert_snapshot!(
        body_of(reference("DIGIT")).to_string(),
        @r##"NonTerminal("DIGIT", {href: "#DIGIT"})"##
    );
}

#[test]
fn numeric_terminal_shows_first_character() {
    assert_eq!(
        body_of(Node::CaseSensitiveString {
            text: "AB".to_string(),
            base: Some(Base::Hexadecimal),
        }),
        DiagramNode::terminal("%x41")
    );
    assert_eq!(
        body_of(Node::CaseInsensitiveString {
            text: "A".to_string(),
            base: Some(Base::Decimal),
        }),
        DiagramNode::terminal("%d65")
    );
}

#[test]
fn reference_links_to_declared_spelling() {
    let grammar = parse_grammar(
        r#"{"defs": {
            "DATE": {"type": "rule", "name": "date", "def": {"type": "ruleref", "name": "digit"}},
            "DIGIT": {"type": "rule", "name": "DIGIT", "def": {"type": "prose", "str": "d"}}
        }}"#,
    )
    .unwrap();
    let entry_points = no_entry_points();
    let diagram = DiagramCompiler::new(&entry_points)
        .with_grammar(&grammar)
        .render(grammar.get("date").unwrap())
        .unwrap();
    assert_eq!(
        diagram.body(),
        Some(&DiagramNode::NonTerminal {
            name: "digit".to_string(),
            href: "#DIGIT".to_string(),
        })
    );
}

#[test]
fn undeclared_reference_keeps_written_spelling() {
    let grammar = parse_grammar(r#"{"defs": {}}"#).unwrap();
    let entry_points = no_entry_points();
    let diagram = DiagramCompiler::new(&entry_points)
        .with_grammar(&grammar)
        .render(&rule("r", reference("Alpha")))
        .unwrap();
    assert_eq!(diagram.body(), Some(&DiagramNode::non_terminal("Alpha")));
}

#[test]
fn standalone_group_is_kept() {
    let body = body_of(Node::Concatenation {
        elements: vec![
            literal("a"),
            group(Node::Alternation {
                alts: vec![literal("b"), literal("c")],
            }),
        ],
    });
    assert_snapshot!(
        body.to_string(),
        @r#"Sequence(Terminal("\"a\""), Group(Choice(0, Terminal("\"b\""), Terminal("\"c\""))))"#
    );
}

// =========================================================================
// Repetition
// =========================================================================

#[test]
fn zero_or_one_is_optional_without_label() {
    assert_eq!(
        body_of(repeat(reference("x"), 0, Some(1))),
        DiagramNode::optional(DiagramNode::non_terminal("x"))
    );
}

#[test]
fn loops_carry_bounds_label() {
    let cases = [
        (0, None, DiagramNode::zero_or_more as fn(_, _) -> _, "0-∞"),
        (0, Some(4), DiagramNode::zero_or_more, "0-4"),
        (1, None, DiagramNode::one_or_more, "1-∞"),
        (1, Some(1), DiagramNode::one_or_more, "1"),
        (3, Some(3), DiagramNode::one_or_more, "3"),
        (2, Some(5), DiagramNode::one_or_more, "2-5"),
    ];
    for (min, max, build, label) in cases {
        assert_eq!(
            body_of(repeat(reference("x"), min, max)),
            build(DiagramNode::non_terminal("x"), DiagramNode::comment(label)),
            "bounds {min}..{max:?}"
        );
    }
}

#[test]
fn repeated_group_is_unwrapped() {
    let body = body_of(repeat(
        group(Node::Concatenation {
            elements: vec![literal(","), reference("item")],
        }),
        1,
        None,
    ));
    assert_snapshot!(
        body.to_string(),
        @r##"OneOrMore(Sequence(Terminal("\",\""), NonTerminal("item", {href: "#item"})), Comment("1-∞"))"##
    );

    let optional = body_of(repeat(group(reference("item")), 0, Some(1)));
    assert_eq!(
        optional,
        DiagramNode::optional(DiagramNode::non_terminal("item"))
    );
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn top_level_must_be_rule() {
    let err = render_diagram(&reference("x"), &no_entry_points()).unwrap_err();
    assert!(matches!(
        err,
        RenderError::MalformedConstruct {
            kind: NodeKind::RuleRef,
            ..
        }
    ));
}

#[test]
fn nested_rule_is_malformed() {
    let def = Node::Alternation {
        alts: vec![literal("a"), rule("inner", literal("b"))],
    };
    let err = render_diagram(&rule("outer", def), &no_entry_points()).unwrap_err();
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
    let def = Node::CaseSensitiveString {
        text: String::new(),
        base: Some(Base::Decimal),
    };
    let err = render_diagram(&rule("e", def), &no_entry_points()).unwrap_err();
    assert!(matches!(
        err,
        RenderError::MalformedConstruct {
            kind: NodeKind::CaseSensitiveString,
            ..
        }
    ));
}

#[test]
fn deep_nesting_is_bounded() {
    let mut def = reference("leaf");
    for _ in 0..20 {
        def = Node::Concatenation {
            elements: vec![def],
        };
    }
    let entry_points = no_entry_points();
    let err = DiagramCompiler::new(&entry_points)
        .with_max_depth(8)
        .render(&rule("deep", def))
        .unwrap_err();
    assert_eq!(
        err,
        RenderError::MaxDepthExceeded {
            rule: "deep".to_string(),
            limit: 8,
        }
    );
}

// =========================================================================
// Serialization
// =========================================================================

#[test]
fn script_expression_escapes_angle_brackets() {
    let body = body_of(Node::Prose {
        text: "</script>".to_string(),
    });
    assert!(!body.to_string().contains('<'));
    assert_snapshot!(
        body.to_string(),
        @r#"Terminal("\u003c\u003c/script>>")"#
    );
}

#[test]
fn json_tree_is_tagged_by_type() {
    let diagram = render_diagram(
        &rule("r", repeat(reference("x"), 0, Some(1))),
        &EntryPoints::from_names(["r"]),
    )
    .unwrap();
    let json = serde_json::to_value(&diagram).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "ComplexDiagram",
            "items": [
                {"type": "Comment", "text": "r"},
                {"type": "Optional", "item": {
                    "type": "NonTerminal", "name": "x", "href": "#x"
                }}
            ]
        })
    );
}

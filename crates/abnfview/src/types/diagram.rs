use std::fmt::{Display, Error as FmtError, Formatter, Result as FmtResult};

use serde::Serialize;

/// A railroad diagram node, handed to an external diagram renderer.
///
/// The vocabulary matches the railroad-diagrams JavaScript library. `Display`
/// produces the constructor-call expression that library evaluates, and the
/// `Serialize` impl produces a JSON tree tagged by `type`.
///
/// # Example
///
/// ```
/// use abnfview::DiagramNode;
///
/// let node = DiagramNode::sequence(vec![
///     DiagramNode::terminal("\"a\""),
///     DiagramNode::non_terminal("digit"),
/// ]);
/// assert_eq!(
///     node.to_string(),
///     r##"Sequence(Terminal("\"a\""), NonTerminal("digit", {href: "#digit"}))"##
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum DiagramNode {
    /// An ordinary diagram.
    Diagram { items: Vec<DiagramNode> },
    /// A diagram drawn with entry/exit markers for top-level rules.
    ComplexDiagram { items: Vec<DiagramNode> },
    /// A terminal box.
    Terminal { text: String },
    /// A reference box linking to another rule.
    NonTerminal { name: String, href: String },
    /// A choice; `default` is the index of the straight-through branch.
    Choice {
        default: usize,
        branches: Vec<DiagramNode>,
    },
    /// Items in sequence.
    Sequence { items: Vec<DiagramNode> },
    /// A visually grouped item.
    Group { item: Box<DiagramNode> },
    /// An item that may be skipped.
    Optional { item: Box<DiagramNode> },
    /// An item repeated zero or more times; `repeat` labels the loop.
    ZeroOrMore {
        item: Box<DiagramNode>,
        repeat: Box<DiagramNode>,
    },
    /// An item repeated one or more times; `repeat` labels the loop.
    OneOrMore {
        item: Box<DiagramNode>,
        repeat: Box<DiagramNode>,
    },
    /// Free text.
    Comment { text: String },
}

impl DiagramNode {
    pub fn diagram(items: Vec<DiagramNode>) -> Self {
        DiagramNode::Diagram { items }
    }

    pub fn complex_diagram(items: Vec<DiagramNode>) -> Self {
        DiagramNode::ComplexDiagram { items }
    }

    pub fn terminal(text: impl Into<String>) -> Self {
        DiagramNode::Terminal { text: text.into() }
    }

    /// A reference to `name`, linking to the same-page anchor `#name`.
    pub fn non_terminal(name: impl Into<String>) -> Self {
        let name = name.into();
        let href = format!("#{name}");
        DiagramNode::NonTerminal { name, href }
    }

    /// A reference shown as `name` that links to the anchor `#target`.
    pub fn non_terminal_to(name: impl Into<String>, target: &str) -> Self {
        DiagramNode::NonTerminal {
            name: name.into(),
            href: format!("#{target}"),
        }
    }

    /// A choice whose first branch is the default path.
    pub fn choice(branches: Vec<DiagramNode>) -> Self {
        DiagramNode::Choice {
            default: 0,
            branches,
        }
    }

    pub fn sequence(items: Vec<DiagramNode>) -> Self {
        DiagramNode::Sequence { items }
    }

    pub fn group(item: DiagramNode) -> Self {
        DiagramNode::Group {
            item: Box::new(item),
        }
    }

    pub fn optional(item: DiagramNode) -> Self {
        DiagramNode::Optional {
            item: Box::new(item),
        }
    }

    pub fn zero_or_more(item: DiagramNode, repeat: DiagramNode) -> Self {
        DiagramNode::ZeroOrMore {
            item: Box::new(item),
            repeat: Box::new(repeat),
        }
    }

    pub fn one_or_more(item: DiagramNode, repeat: DiagramNode) -> Self {
        DiagramNode::OneOrMore {
            item: Box::new(item),
            repeat: Box::new(repeat),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        DiagramNode::Comment { text: text.into() }
    }

    /// The constructor name used by the railroad-diagrams library.
    pub fn constructor(&self) -> &'static str {
        match self {
            DiagramNode::Diagram { .. } => "Diagram",
            DiagramNode::ComplexDiagram { .. } => "ComplexDiagram",
            DiagramNode::Terminal { .. } => "Terminal",
            DiagramNode::NonTerminal { .. } => "NonTerminal",
            DiagramNode::Choice { .. } => "Choice",
            DiagramNode::Sequence { .. } => "Sequence",
            DiagramNode::Group { .. } => "Group",
            DiagramNode::Optional { .. } => "Optional",
            DiagramNode::ZeroOrMore { .. } => "ZeroOrMore",
            DiagramNode::OneOrMore { .. } => "OneOrMore",
            DiagramNode::Comment { .. } => "Comment",
        }
    }

    /// Returns true for the two root diagram kinds.
    pub fn is_diagram(&self) -> bool {
        matches!(
            self,
            DiagramNode::Diagram { .. } | DiagramNode::ComplexDiagram { .. }
        )
    }

    /// The rendered definition inside a root diagram, skipping its label
    /// comment. Returns `None` for non-root nodes.
    pub fn body(&self) -> Option<&DiagramNode> {
        match self {
            DiagramNode::Diagram { items } | DiagramNode::ComplexDiagram { items } => items.last(),
            _ => None,
        }
    }
}

/// Writes `text` as a double-quoted JavaScript string literal.
///
/// `<` is written as `\u003c` so the expression can sit inside an inline
/// `<script>` element without closing it.
fn write_quoted(f: &mut Formatter<'_>, text: &str) -> FmtResult {
    let literal = serde_json::to_string(text).map_err(|_| FmtError)?;
    f.write_str(&literal.replace('<', "\\u003c"))
}

fn write_list(f: &mut Formatter<'_>, items: &[DiagramNode]) -> FmtResult {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for DiagramNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}(", self.constructor())?;
        match self {
            DiagramNode::Diagram { items }
            | DiagramNode::ComplexDiagram { items }
            | DiagramNode::Sequence { items } => write_list(f, items)?,
            DiagramNode::Terminal { text } | DiagramNode::Comment { text } => {
                write_quoted(f, text)?;
            }
            DiagramNode::NonTerminal { name, href } => {
                write_quoted(f, name)?;
                f.write_str(", {href: ")?;
                write_quoted(f, href)?;
                f.write_str("}")?;
            }
            DiagramNode::Choice { default, branches } => {
                write!(f, "{default}")?;
                if !branches.is_empty() {
                    f.write_str(", ")?;
                }
                write_list(f, branches)?;
            }
            DiagramNode::Group { item } | DiagramNode::Optional { item } => write!(f, "{item}")?,
            DiagramNode::ZeroOrMore { item, repeat } | DiagramNode::OneOrMore { item, repeat } => {
                write!(f, "{item}, {repeat}")?;
            }
        }
        f.write_str(")")
    }
}

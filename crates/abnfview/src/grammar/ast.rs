//! Public AST types for parsed ABNF grammars.
//!
//! The shapes mirror the JSON emitted by the upstream ABNF parser, so a
//! grammar can be loaded with plain `serde` deserialization. The tree is never
//! mutated after loading; the compilers only fold over it.

use std::fmt::{Display, Formatter, Result as FmtResult};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed grammar: rule definitions in declared order plus every reference
/// edge between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// Rule definitions keyed by rule name, in declared order.
    pub defs: IndexMap<String, Node>,
    /// Every rule reference appearing in the grammar, as reported by the
    /// parser. May be empty, in which case [`Grammar::referenced_names`]
    /// walks the definitions instead.
    #[serde(default)]
    pub refs: Vec<RuleRef>,
}

/// A reference edge: some rule refers to `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRef {
    pub name: String,
}

/// One node of a rule definition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// A named top-level definition: `name = def`.
    Rule { name: String, def: Box<Node> },

    /// A case-sensitive literal (`%s"abc"`), or a numeric terminal when
    /// `base` is present.
    #[serde(alias = "caseSensitveString")]
    CaseSensitiveString {
        #[serde(rename = "str")]
        text: String,
        #[serde(default)]
        base: Option<Base>,
    },

    /// A case-insensitive literal (`"abc"`), or a numeric terminal when
    /// `base` is present.
    #[serde(alias = "caseInsensitveString")]
    CaseInsensitiveString {
        #[serde(rename = "str")]
        text: String,
        #[serde(default)]
        base: Option<Base>,
    },

    /// A numeric character range: `%x30-39`.
    Range { first: u32, last: u32, base: Base },

    /// Free-text placeholder: `<some prose>`.
    Prose {
        #[serde(rename = "str")]
        text: String,
    },

    /// A reference to another rule, matched case-insensitively.
    #[serde(rename = "ruleref")]
    RuleRef { name: String },

    /// Sequential composition.
    Concatenation { elements: Vec<Node> },

    /// Choice between alternatives, in order.
    Alternation { alts: Vec<Node> },

    /// Explicit parenthesized grouping.
    Group { alt: Box<Node> },

    /// Repeated occurrence of `el`.
    Repetition { el: Box<Node>, rep: Repeat },
}

/// The variant tag of a [`Node`], used to key per-construct tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Rule,
    CaseSensitiveString,
    CaseInsensitiveString,
    Range,
    Prose,
    RuleRef,
    Concatenation,
    Alternation,
    Group,
    Repetition,
}

impl NodeKind {
    /// The tag this kind carries in grammar JSON.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Rule => "rule",
            NodeKind::CaseSensitiveString => "caseSensitiveString",
            NodeKind::CaseInsensitiveString => "caseInsensitiveString",
            NodeKind::Range => "range",
            NodeKind::Prose => "prose",
            NodeKind::RuleRef => "ruleref",
            NodeKind::Concatenation => "concatenation",
            NodeKind::Alternation => "alternation",
            NodeKind::Group => "group",
            NodeKind::Repetition => "repetition",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.tag())
    }
}

impl Node {
    /// Returns the variant tag of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Rule { .. } => NodeKind::Rule,
            Node::CaseSensitiveString { .. } => NodeKind::CaseSensitiveString,
            Node::CaseInsensitiveString { .. } => NodeKind::CaseInsensitiveString,
            Node::Range { .. } => NodeKind::Range,
            Node::Prose { .. } => NodeKind::Prose,
            Node::RuleRef { .. } => NodeKind::RuleRef,
            Node::Concatenation { .. } => NodeKind::Concatenation,
            Node::Alternation { .. } => NodeKind::Alternation,
            Node::Group { .. } => NodeKind::Group,
            Node::Repetition { .. } => NodeKind::Repetition,
        }
    }

    /// The declared name if this node is a [`Node::Rule`].
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Node::Rule { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Collects the names of every [`Node::RuleRef`] beneath this node, in
    /// preorder.
    ///
    /// Walks with an explicit stack so arbitrarily deep trees cannot overflow.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::RuleRef { name } => names.push(name.as_str()),
                Node::Rule { def, .. } => stack.push(def),
                Node::Group { alt } => stack.push(alt),
                Node::Repetition { el, .. } => stack.push(el),
                Node::Concatenation { elements: children }
                | Node::Alternation { alts: children } => {
                    stack.extend(children.iter().rev());
                }
                Node::CaseSensitiveString { .. }
                | Node::CaseInsensitiveString { .. }
                | Node::Range { .. }
                | Node::Prose { .. } => {}
            }
        }
        names
    }
}

impl Grammar {
    /// Looks up a definition by rule name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.defs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, node)| node)
    }

    /// Returns the spelling a rule was declared with, if it is declared.
    ///
    /// Falls back to the map key when the definition is not a rule node.
    pub fn declared_name(&self, name: &str) -> Option<&str> {
        self.defs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, node)| node.rule_name().unwrap_or(key))
    }

    /// Iterates over the rule definitions in declared order.
    pub fn rules(&self) -> impl Iterator<Item = &Node> {
        self.defs.values()
    }

    /// Returns the number of declared rules.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns true if the grammar declares no rules.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Names targeted by reference edges.
    ///
    /// Uses the parser-supplied edge list when present; otherwise derives the
    /// edges by walking every definition.
    pub fn referenced_names(&self) -> Vec<&str> {
        if !self.refs.is_empty() {
            return self.refs.iter().map(|r| r.name.as_str()).collect();
        }
        self.defs.values().flat_map(Node::referenced_names).collect()
    }
}

/// Repetition bounds. `max` of `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeat {
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
}

impl Repeat {
    /// Bounds `{0,1}`: the element is optional.
    pub fn is_optional(&self) -> bool {
        self.min == 0 && self.max == Some(1)
    }

    /// Bounds where `min == max`.
    pub fn is_exact(&self) -> bool {
        self.max == Some(self.min)
    }

    /// Human-readable summary of the bounds: `2`, `1-3`, or `0-∞`.
    pub fn label(&self) -> String {
        match self.max {
            Some(max) if max == self.min => self.min.to_string(),
            Some(max) => format!("{}-{}", self.min, max),
            None => format!("{}-∞", self.min),
        }
    }

    /// ABNF repeat prefix: `2`, `1*`, `*`, `*5`, `2*5`.
    pub fn abnf_prefix(&self) -> String {
        if self.is_exact() {
            return self.min.to_string();
        }
        let min = if self.min == 0 {
            String::new()
        } else {
            self.min.to_string()
        };
        let max = self.max.map(|m| m.to_string()).unwrap_or_default();
        format!("{min}*{max}")
    }
}

/// Numeric base of a numeric terminal or range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Base {
    Binary,
    Decimal,
    Hexadecimal,
}

impl Base {
    /// The radix: 2, 10 or 16.
    pub fn radix(self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }

    /// The ABNF base letter: `b`, `d` or `x`.
    pub fn letter(self) -> char {
        match self {
            Base::Binary => 'b',
            Base::Decimal => 'd',
            Base::Hexadecimal => 'x',
        }
    }

    /// Formats `value` in this base with lowercase digits and no prefix.
    pub fn digits(self, value: u32) -> String {
        match self {
            Base::Binary => format!("{value:b}"),
            Base::Decimal => value.to_string(),
            Base::Hexadecimal => format!("{value:x}"),
        }
    }

    /// Encodes the characters of `text` as an ABNF numeric terminal:
    /// `%x41`, or `%xd.a` for several characters.
    ///
    /// Returns `None` when `text` is empty.
    pub fn encode_text(self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        let codes: Vec<String> = text.chars().map(|c| self.digits(u32::from(c))).collect();
        Some(format!("%{}{}", self.letter(), codes.join(".")))
    }

    /// Encodes the first character of `text`: `%x41` for `"AB"`.
    ///
    /// Returns `None` when `text` is empty.
    pub fn encode_first(self, text: &str) -> Option<String> {
        let first = text.chars().next()?;
        Some(format!("%{}{}", self.letter(), self.digits(u32::from(first))))
    }

    /// Encodes an inclusive range: `%x30-39`.
    pub fn encode_range(self, first: u32, last: u32) -> String {
        format!(
            "%{}{}-{}",
            self.letter(),
            self.digits(first),
            self.digits(last)
        )
    }
}

impl TryFrom<u32> for Base {
    type Error = String;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        match radix {
            2 => Ok(Base::Binary),
            10 => Ok(Base::Decimal),
            16 => Ok(Base::Hexadecimal),
            other => Err(format!("unsupported numeric base {other}, expected 2, 10 or 16")),
        }
    }
}

impl From<Base> for u32 {
    fn from(base: Base) -> Self {
        base.radix()
    }
}

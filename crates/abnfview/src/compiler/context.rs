//! Recursion state carried through a single rule's compilation.

use crate::compiler::RenderError;
use crate::grammar::NodeKind;

/// Default nesting limit for definition trees.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tracks which rule is being compiled and how deep the fold has descended.
///
/// Both compilers thread one of these through their recursion so that a
/// pathologically deep tree fails with [`RenderError::MaxDepthExceeded`]
/// instead of exhausting the stack.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// Name of the rule being compiled, for error messages.
    rule: &'a str,
    /// Current nesting depth.
    depth: usize,
    /// Maximum allowed depth.
    max_depth: usize,
}

impl<'a> RenderContext<'a> {
    /// Create a context for compiling `rule`.
    pub fn new(rule: &'a str, max_depth: usize) -> Self {
        Self {
            rule,
            depth: 0,
            max_depth,
        }
    }

    /// Name of the rule being compiled.
    pub fn rule(&self) -> &str {
        self.rule
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter one level of nesting.
    pub fn descend(&mut self) -> Result<(), RenderError> {
        if self.depth >= self.max_depth {
            return Err(RenderError::MaxDepthExceeded {
                rule: self.rule.to_string(),
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level of nesting.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Builds a [`RenderError::MalformedConstruct`] for the current rule.
    pub fn malformed(&self, kind: NodeKind, message: impl Into<String>) -> RenderError {
        RenderError::MalformedConstruct {
            rule: self.rule.to_string(),
            kind,
            message: message.into(),
        }
    }
}

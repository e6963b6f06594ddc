//! Whitespace policies and the per-element policy stack

use crate::event::Attributes;
use std::fmt;

/// How whitespace inside an element is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhitespacePolicy {
    /// Text flow: single spaces between words are meaningful
    Inline,
    /// Structural element: whitespace at its boundaries is discarded
    Block,
    /// Whitespace is passed through verbatim, for the whole subtree
    Preserve,
}

impl fmt::Display for WhitespacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WhitespacePolicy::Inline => "inline",
            WhitespacePolicy::Block => "block",
            WhitespacePolicy::Preserve => "preserve",
        })
    }
}

/// Decision for a whitespace run outside preserved content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhitespaceProcessing {
    /// Rendered as a single space
    Collapse,
    /// Not rendered
    Remove,
}

impl fmt::Display for WhitespaceProcessing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WhitespaceProcessing::Collapse => "collapse",
            WhitespaceProcessing::Remove => "remove",
        })
    }
}

/// Element types that know their own whitespace policy
pub trait WhitespaceCollapsing {
    fn whitespace_policy(&self, attributes: &Attributes) -> WhitespacePolicy;
}

/// Policies of the open elements, innermost last
///
/// Pushing under a preserving ancestor always pushes `Preserve`.
#[derive(Debug, Clone, Default)]
pub struct PolicyStack {
    policies: Vec<WhitespacePolicy>,
}

impl PolicyStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy in effect for text at the current level, `Block` at top level
    #[inline]
    pub fn current(&self) -> WhitespacePolicy {
        self.policies.last().copied().unwrap_or(WhitespacePolicy::Block)
    }

    /// Push an element's declared policy, returning the resolved one
    pub fn push(&mut self, declared: WhitespacePolicy) -> WhitespacePolicy {
        let resolved = match self.policies.last() {
            Some(WhitespacePolicy::Preserve) => WhitespacePolicy::Preserve,
            _ => declared,
        };
        self.policies.push(resolved);
        resolved
    }

    /// Pop the innermost element's resolved policy
    ///
    /// An unbalanced end event pops nothing and reports `Block`.
    pub fn pop(&mut self) -> WhitespacePolicy {
        self.policies.pop().unwrap_or(WhitespacePolicy::Block)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.policies.len()
    }
}

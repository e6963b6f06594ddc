//! Collapse-or-remove decisions for whitespace runs
//!
//! Interior runs always collapse. Edge runs are removed unless they follow
//! text in the current line of inline content, in which case the decision
//! waits for the next event:
//!
//! ```text
//!                   text
//!   pending run ---------------------> collapse
//!        |      block boundary, end
//!        +---------------------------> remove
//!        |      inline boundary
//!        +---------------------------> still pending
//! ```
//!
//! At most one run is pending; a second edge run arriving while one is
//! pending is removed.

use super::policy::{WhitespacePolicy, WhitespaceProcessing};
use super::segment::Location;

/// Classification state carried between events
#[derive(Debug, Default)]
pub struct Classifier {
    /// Text was emitted since the last block boundary
    inline_text: bool,
    pending: Option<String>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a run is waiting for its decision
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Classify a run, or hold it and return `None`
    pub fn whitespace(&mut self, run: &str, location: Location) -> Option<WhitespaceProcessing> {
        match location {
            Location::Between => Some(WhitespaceProcessing::Collapse),
            _ if self.inline_text && self.pending.is_none() => {
                self.pending = Some(run.to_string());
                None
            }
            _ => Some(WhitespaceProcessing::Remove),
        }
    }

    /// Text arrived; returns the pending run, which collapses
    pub fn text(&mut self) -> Option<String> {
        self.inline_text = true;
        self.pending.take()
    }

    /// An element boundary arrived; returns a pending run that is removed
    ///
    /// Inline and preserve boundaries leave the pending run in place.
    pub fn boundary(&mut self, policy: WhitespacePolicy) -> Option<String> {
        match policy {
            WhitespacePolicy::Block => {
                self.inline_text = false;
                self.pending.take()
            }
            WhitespacePolicy::Inline | WhitespacePolicy::Preserve => None,
        }
    }

    /// The stream ended; returns a pending run that is removed
    pub fn finish(&mut self) -> Option<String> {
        self.inline_text = false;
        self.pending.take()
    }
}

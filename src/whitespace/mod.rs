//! Rendering-aware whitespace classification
//!
//! Turns a parsing event stream into a stream where every event carries the
//! whitespace policy in effect and every whitespace run that a renderer would
//! touch is isolated and marked collapse or remove:
//!
//! ```text
//! <p> Hello   <b>big</b> world </p>
//!
//! [block [remove:·] [Hello] [collapse:···] [inline [big] inline] [collapse:·] [world] [remove:·] block]
//! ```
//!
//! Stages:
//! - JoinText: merges adjacent text so source chunking never matters
//! - Segments: splits text into text and whitespace runs with their location
//! - Classifier: decides collapse or remove, holding back at most one run
//! - MapWhitespace: drives the above and tracks the policy stack

mod classify;
mod join;
mod mapping;
mod policy;
mod segment;

pub use classify::Classifier;
pub use join::JoinText;
pub use mapping::MapWhitespace;
pub use policy::{PolicyStack, WhitespaceCollapsing, WhitespacePolicy, WhitespaceProcessing};
pub use segment::{Location, Segment, Segments};

use crate::event::ParsingEvent;

/// Event of a whitespace-classified stream
#[derive(Debug, Clone, PartialEq)]
pub enum WhitespaceParsingEvent<E> {
    /// Parsing event with the policy in effect: the element's own policy for
    /// begin and end, the enclosing policy for text
    Event(ParsingEvent<E>, WhitespacePolicy),
    /// Whitespace run isolated from surrounding text
    Whitespace(String, WhitespaceProcessing),
}

impl<E> WhitespaceParsingEvent<E> {
    /// The wrapped parsing event, if any
    pub fn event(&self) -> Option<&ParsingEvent<E>> {
        match self {
            WhitespaceParsingEvent::Event(event, _) => Some(event),
            WhitespaceParsingEvent::Whitespace(..) => None,
        }
    }
}

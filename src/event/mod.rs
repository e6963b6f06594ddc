//! Parsing events
//!
//! Every stage of a pipeline consumes and produces a lazy, single-pass
//! sequence of `Result<ParsingEvent<E>>` in document order. Over a complete
//! stream, begin and end events are balanced and properly nested.
//!
//! ```text
//! <p class="x">Hi <b>there</b></p>
//!
//! BeginDocument
//! Begin(p, {class: x})
//! Text("Hi ")
//! Begin(b, {})
//! Text("there")
//! End(b)
//! End(p)
//! EndDocument
//! ```

mod attributes;
mod element;
mod html;

pub use attributes::Attributes;
pub use element::{DecodeElement, XmlElement};
pub use html::HtmlElement;

use crate::error::Result;

/// A single event of a parsed document
#[derive(Debug, Clone, PartialEq)]
pub enum ParsingEvent<E> {
    BeginDocument,
    /// Start of an element, with its attributes
    Begin(E, Attributes),
    /// End of an element
    End(E),
    /// Character data with references decoded
    Text(String),
    EndDocument,
}

impl<E> ParsingEvent<E> {
    /// Text content, if this is a text event
    #[inline]
    pub fn text(&self) -> Option<&str> {
        match self {
            ParsingEvent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Element of a begin or end event
    #[inline]
    pub fn element(&self) -> Option<&E> {
        match self {
            ParsingEvent::Begin(element, _) | ParsingEvent::End(element) => Some(element),
            _ => None,
        }
    }

    /// Change in element nesting depth caused by this event
    #[inline]
    pub(crate) fn depth_delta(&self) -> isize {
        match self {
            ParsingEvent::Begin(..) => 1,
            ParsingEvent::End(..) => -1,
            _ => 0,
        }
    }

    /// Convert the element type, keeping everything else
    pub fn map_element<T>(self, f: impl FnOnce(E) -> T) -> ParsingEvent<T> {
        match self {
            ParsingEvent::BeginDocument => ParsingEvent::BeginDocument,
            ParsingEvent::Begin(element, attributes) => ParsingEvent::Begin(f(element), attributes),
            ParsingEvent::End(element) => ParsingEvent::End(f(element)),
            ParsingEvent::Text(text) => ParsingEvent::Text(text),
            ParsingEvent::EndDocument => ParsingEvent::EndDocument,
        }
    }
}

/// A stream of parsing events over elements of type [`EventStream::Element`]
///
/// Implemented for every iterator yielding `Result<ParsingEvent<E>>`, so the
/// element type is nameable in bounds and closures passed to stage
/// constructors get their argument types inferred.
pub trait EventStream: Iterator {
    type Element;

    /// Same as `Iterator::next`, typed as an event
    fn next_event(&mut self) -> Option<Result<ParsingEvent<Self::Element>>>;
}

impl<I, E> EventStream for I
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
{
    type Element = E;

    #[inline]
    fn next_event(&mut self) -> Option<Result<ParsingEvent<E>>> {
        self.next()
    }
}

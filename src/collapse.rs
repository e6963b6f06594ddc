//! Folding classified streams back into plain parsing events
//!
//! - Parsing events pass through
//! - Collapse whitespace becomes a single space
//! - Remove whitespace disappears
//! - Linebreaks become their separator text
//!
//! Adjacent text is then merged, so the output of [`Collapse`] is a plain
//! event stream with rendered text. Collapsing that output again changes
//! nothing.

use crate::error::Result;
use crate::event::ParsingEvent;
use crate::linebreak::LinebreakParsingEvent;
use crate::whitespace::{JoinText, WhitespaceParsingEvent, WhitespaceProcessing};

/// Events that fold into at most one parsing event
pub trait Collapsible {
    type Element;

    fn collapse(self) -> Option<ParsingEvent<Self::Element>>;
}

impl<E> Collapsible for ParsingEvent<E> {
    type Element = E;

    #[inline]
    fn collapse(self) -> Option<ParsingEvent<E>> {
        Some(self)
    }
}

impl<E> Collapsible for WhitespaceParsingEvent<E> {
    type Element = E;

    fn collapse(self) -> Option<ParsingEvent<E>> {
        match self {
            WhitespaceParsingEvent::Event(event, _) => Some(event),
            WhitespaceParsingEvent::Whitespace(_, WhitespaceProcessing::Collapse) => {
                Some(ParsingEvent::Text(" ".to_string()))
            }
            WhitespaceParsingEvent::Whitespace(_, WhitespaceProcessing::Remove) => None,
        }
    }
}

impl<E> Collapsible for LinebreakParsingEvent<E> {
    type Element = E;

    fn collapse(self) -> Option<ParsingEvent<E>> {
        match self {
            LinebreakParsingEvent::Event(event, _) => Some(event),
            LinebreakParsingEvent::Whitespace(run, processing) => {
                WhitespaceParsingEvent::Whitespace(run, processing).collapse()
            }
            LinebreakParsingEvent::Linebreak(separator) => Some(ParsingEvent::Text(separator)),
        }
    }
}

/// Per-event fold, before adjacent text is merged
pub struct Fold<I> {
    upstream: I,
}

impl<I> Fold<I> {
    pub fn new(upstream: I) -> Self {
        Fold { upstream }
    }
}

impl<I, T> Iterator for Fold<I>
where
    I: Iterator<Item = Result<T>>,
    T: Collapsible,
{
    type Item = Result<ParsingEvent<T::Element>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.upstream.next()? {
                Ok(event) => {
                    if let Some(folded) = event.collapse() {
                        return Some(Ok(folded));
                    }
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Folded stream with adjacent text merged
pub type Collapse<I, E> = JoinText<Fold<I>, E>;

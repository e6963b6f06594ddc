//! Linebreaks at block boundaries
//!
//! Layered on a whitespace-classified stream. The first block boundary after
//! some text marks a break as due; the break is placed right before that
//! boundary once more text arrives. Breaks therefore only ever separate text:
//! none before the first text, none after the last, never two in a row.
//!
//! ```text
//! <p>One</p><p>Two</p>   =>   [block [One] [↩] block] [block [Two] block]
//! ```

use crate::error::Result;
use crate::event::{Attributes, ParsingEvent};
use crate::whitespace::{WhitespaceParsingEvent, WhitespacePolicy, WhitespaceProcessing};
use std::collections::VecDeque;

/// Event of a stream with linebreaks inserted
#[derive(Debug, Clone, PartialEq)]
pub enum LinebreakParsingEvent<E> {
    Event(ParsingEvent<E>, WhitespacePolicy),
    Whitespace(String, WhitespaceProcessing),
    /// Separator rendered between two blocks of text
    Linebreak(String),
}

impl<E> From<WhitespaceParsingEvent<E>> for LinebreakParsingEvent<E> {
    fn from(event: WhitespaceParsingEvent<E>) -> Self {
        match event {
            WhitespaceParsingEvent::Event(event, policy) => LinebreakParsingEvent::Event(event, policy),
            WhitespaceParsingEvent::Whitespace(run, processing) => {
                LinebreakParsingEvent::Whitespace(run, processing)
            }
        }
    }
}

/// Inserts linebreaks before block boundaries that separate text
///
/// The separator comes from the block element whose boundary triggered the
/// break, together with the attributes of its begin event.
pub struct MapLinebreaks<I, E, F> {
    upstream: I,
    separator: F,
    /// Open elements, innermost last
    open: Vec<(E, Attributes)>,
    /// Text was emitted since the last break
    inline_text: bool,
    /// Separator of the break waiting for more text
    pending: Option<String>,
    /// Events behind the pending break
    queue: VecDeque<LinebreakParsingEvent<E>>,
    done: bool,
}

impl<I, E, F> MapLinebreaks<I, E, F>
where
    I: Iterator<Item = Result<WhitespaceParsingEvent<E>>>,
    E: Clone,
    F: FnMut(&E, &Attributes) -> String,
{
    pub fn new(upstream: I, separator: F) -> Self {
        MapLinebreaks {
            upstream,
            separator,
            open: Vec::new(),
            inline_text: false,
            pending: None,
            queue: VecDeque::new(),
            done: false,
        }
    }

    /// Note a block boundary of `element`
    fn block_boundary(&mut self, element: &E, attributes: &Attributes) {
        if self.pending.is_none() && self.inline_text {
            self.pending = Some((self.separator)(element, attributes));
            self.inline_text = false;
        }
    }

    fn process(&mut self, event: WhitespaceParsingEvent<E>) {
        match &event {
            WhitespaceParsingEvent::Event(ParsingEvent::Begin(element, attributes), policy) => {
                self.open.push((element.clone(), attributes.clone()));
                if *policy == WhitespacePolicy::Block {
                    self.block_boundary(element, attributes);
                }
            }
            WhitespaceParsingEvent::Event(ParsingEvent::End(element), policy) => {
                let attributes = self.open.pop().map(|(_, attributes)| attributes).unwrap_or_default();
                if *policy == WhitespacePolicy::Block {
                    self.block_boundary(element, &attributes);
                }
            }
            WhitespaceParsingEvent::Event(ParsingEvent::Text(_), _) => {
                if let Some(separator) = self.pending.take() {
                    self.queue.push_front(LinebreakParsingEvent::Linebreak(separator));
                }
                self.inline_text = true;
            }
            _ => {}
        }
        self.queue.push_back(event.into());
    }

    /// Number of leading queue entries that may be emitted
    fn releasable(&self) -> usize {
        if self.pending.is_some() {
            0
        } else {
            self.queue.len()
        }
    }
}

impl<I, E, F> Iterator for MapLinebreaks<I, E, F>
where
    I: Iterator<Item = Result<WhitespaceParsingEvent<E>>>,
    E: Clone,
    F: FnMut(&E, &Attributes) -> String,
{
    type Item = Result<LinebreakParsingEvent<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.releasable() > 0 || self.done {
                if let Some(event) = self.queue.pop_front() {
                    return Some(Ok(event));
                }
            }
            if self.done {
                return None;
            }

            match self.upstream.next() {
                Some(Ok(event)) => self.process(event),
                Some(Err(err)) => {
                    self.done = true;
                    self.queue.clear();
                    self.pending = None;
                    return Some(Err(err));
                }
                None => {
                    // A break due at the end separates nothing
                    self.done = true;
                    self.pending = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use WhitespacePolicy::{Block, Inline};

    type Out = LinebreakParsingEvent<&'static str>;

    fn begin(name: &'static str, policy: WhitespacePolicy) -> WhitespaceParsingEvent<&'static str> {
        WhitespaceParsingEvent::Event(ParsingEvent::Begin(name, Attributes::new()), policy)
    }

    fn end(name: &'static str, policy: WhitespacePolicy) -> WhitespaceParsingEvent<&'static str> {
        WhitespaceParsingEvent::Event(ParsingEvent::End(name), policy)
    }

    fn text(t: &str) -> WhitespaceParsingEvent<&'static str> {
        WhitespaceParsingEvent::Event(ParsingEvent::Text(t.to_string()), Block)
    }

    fn remove(run: &str) -> WhitespaceParsingEvent<&'static str> {
        WhitespaceParsingEvent::Whitespace(run.to_string(), WhitespaceProcessing::Remove)
    }

    fn breaks(events: Vec<WhitespaceParsingEvent<&'static str>>) -> Vec<Out> {
        MapLinebreaks::new(events.into_iter().map(Ok), |element, _| {
            if *element == "h1" { "\n\n".to_string() } else { "\n".to_string() }
        })
        .collect::<Result<_>>()
        .unwrap()
    }

    fn linebreak(separator: &str) -> Out {
        LinebreakParsingEvent::Linebreak(separator.to_string())
    }

    #[test]
    fn test_break_between_paragraphs() {
        assert_eq!(
            breaks(vec![begin("p", Block), text("One"), end("p", Block), begin("p", Block), text("Two"), end("p", Block)]),
            vec![
                begin("p", Block).into(),
                text("One").into(),
                linebreak("\n"),
                end("p", Block).into(),
                begin("p", Block).into(),
                text("Two").into(),
                end("p", Block).into(),
            ]
        );
    }

    #[test]
    fn test_no_leading_break() {
        let out = breaks(vec![begin("div", Block), begin("p", Block), text("x"), end("p", Block), end("div", Block)]);
        assert!(!out.iter().any(|e| matches!(e, LinebreakParsingEvent::Linebreak(_))));
    }

    #[test]
    fn test_inline_boundaries_do_not_break() {
        let out = breaks(vec![text("a"), begin("span", Inline), text("b"), end("span", Inline), text("c")]);
        assert!(!out.iter().any(|e| matches!(e, LinebreakParsingEvent::Linebreak(_))));
    }

    #[test]
    fn test_separator_from_triggering_element() {
        let out = breaks(vec![begin("h1", Block), text("Title"), end("h1", Block), begin("p", Block), text("Body"), end("p", Block)]);
        assert_eq!(out.iter().filter(|e| matches!(e, LinebreakParsingEvent::Linebreak(_))).count(), 1);
        assert!(out.contains(&linebreak("\n\n")));
    }

    #[test]
    fn test_break_placed_before_whitespace_and_boundaries() {
        assert_eq!(
            breaks(vec![text("a"), remove(" "), begin("div", Block), remove("  "), text("b")]),
            vec![
                text("a").into(),
                remove(" ").into(),
                linebreak("\n"),
                begin("div", Block).into(),
                remove("  ").into(),
                text("b").into(),
            ]
        );
    }

    #[test]
    fn test_attributes_available_at_end() {
        let events = vec![
            WhitespaceParsingEvent::Event(ParsingEvent::Begin("p", Attributes::from([("data-sep", " | ")])), Block),
            text("x"),
            end("p", Block),
            text("y"),
        ];
        let out: Vec<Out> = MapLinebreaks::new(events.into_iter().map(Ok), |_, attrs| {
            attrs.get("data-sep").unwrap_or("\n").to_string()
        })
        .collect::<Result<_>>()
        .unwrap();
        assert!(out.contains(&linebreak(" | ")));
    }

    #[test]
    fn test_error_discards_queued_events() {
        let events = vec![Ok(text("a")), Ok(end("p", Block)), Err(Error::callback("boom"))];
        let out: Vec<Result<Out>> = MapLinebreaks::new(events.into_iter(), |_, _| "\n".to_string()).collect();
        assert_eq!(out.len(), 2);
        assert!(matches!(out[1], Err(Error::Callback(_))));
    }
}

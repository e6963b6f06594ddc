//! Folding over element subtrees

use crate::error::{Error, Result};
use crate::event::{Attributes, ParsingEvent};

/// The content of one element, read from the shared upstream
///
/// Yields the events between a begin and its matching end, both excluded.
/// An upstream error ends the subtree and is reported by the reduction.
pub struct Subtree<'a, I> {
    upstream: &'a mut I,
    depth: isize,
    error: Option<Error>,
    done: bool,
}

impl<'a, I> Subtree<'a, I> {
    fn new(upstream: &'a mut I) -> Self {
        Subtree {
            upstream,
            depth: 1,
            error: None,
            done: false,
        }
    }
}

impl<I, E> Subtree<'_, I>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
{
    /// Skip whatever the callback left unread
    fn finish(mut self) -> Result<()> {
        self.by_ref().for_each(drop);
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<I, E> Iterator for Subtree<'_, I>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
{
    type Item = ParsingEvent<E>;

    fn next(&mut self) -> Option<ParsingEvent<E>> {
        if self.done {
            return None;
        }
        match self.upstream.next() {
            Some(Ok(event)) => {
                self.depth += event.depth_delta();
                if self.depth == 0 {
                    self.done = true;
                    return None;
                }
                Some(event)
            }
            Some(Err(err)) => {
                self.error = Some(err);
                self.done = true;
                None
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Fold `f` over every outermost element of `upstream`
///
/// `f` gets the accumulator, the element, its attributes and the element's
/// content. Content left unread is skipped before the next element, so
/// elements nested inside one already reduced are never offered to `f`.
/// Events outside any element are ignored.
pub fn reduce_elements<I, E, B, F>(mut upstream: I, init: B, mut f: F) -> Result<B>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
    F: FnMut(B, E, Attributes, &mut Subtree<'_, I>) -> Result<B>,
{
    let mut acc = init;
    while let Some(event) = upstream.next() {
        let ParsingEvent::Begin(element, attributes) = event? else {
            continue;
        };

        let mut subtree = Subtree::new(&mut upstream);
        match f(acc, element, attributes, &mut subtree) {
            Ok(reduced) => {
                subtree.finish()?;
                acc = reduced;
            }
            // An upstream error came first
            Err(err) => return Err(subtree.error.take().unwrap_or(err)),
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type Event = ParsingEvent<&'static str>;

    fn begin(name: &'static str) -> Event {
        ParsingEvent::Begin(name, Attributes::new())
    }

    fn text(t: &str) -> Event {
        ParsingEvent::Text(t.to_string())
    }

    fn document() -> Vec<Event> {
        vec![
            ParsingEvent::BeginDocument,
            text("ignored"),
            begin("h1"),
            text("Title"),
            ParsingEvent::End("h1"),
            begin("p"),
            text("first"),
            begin("b"),
            text("bold"),
            ParsingEvent::End("b"),
            ParsingEvent::End("p"),
            ParsingEvent::EndDocument,
        ]
    }

    #[test]
    fn test_reduces_outermost_elements() {
        let reduced = reduce_elements(document().into_iter().map(Ok), Vec::new(), |mut acc, element, _, subtree| {
            let content: Vec<String> = subtree.filter_map(|event| event.text().map(str::to_string)).collect();
            acc.push(format!("{}={}", element, content.join("+")));
            Ok(acc)
        })
        .unwrap();

        assert_eq!(reduced, vec!["h1=Title", "p=first+bold"]);
    }

    #[test]
    fn test_unread_content_is_skipped() {
        let reduced = reduce_elements(document().into_iter().map(Ok), Vec::new(), |mut acc, element, _, subtree| {
            let first = subtree.next();
            acc.push((element, first));
            Ok(acc)
        })
        .unwrap();

        assert_eq!(reduced, vec![("h1", Some(text("Title"))), ("p", Some(text("first")))]);
    }

    #[test]
    fn test_upstream_error_inside_element() {
        let events = vec![Ok(begin("p")), Ok(text("a")), Err(Error::callback("boom")), Ok(ParsingEvent::End("p"))];
        let mut calls = 0;
        let result = reduce_elements(events.into_iter(), 0usize, |acc, _, _, subtree| {
            calls += 1;
            Ok(acc + subtree.count())
        });

        assert!(matches!(result, Err(Error::Callback(_))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_callback_error_ends_reduction() {
        let mut seen = Vec::new();
        let result = reduce_elements(document().into_iter().map(Ok), (), |_, element, _, _| {
            seen.push(element);
            Err(Error::callback("stop"))
        });

        assert!(matches!(result, Err(Error::Callback(_))));
        assert_eq!(seen, vec!["h1"]);
    }
}

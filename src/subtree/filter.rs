use super::predicate::ElementPredicate;
use crate::error::Result;
use crate::event::ParsingEvent;
use log::trace;
use std::marker::PhantomData;

/// Drops every subtree whose root fails the predicate
///
/// Subtrees that pass are filtered again at each nested level.
pub struct Filter<I, E, P> {
    upstream: I,
    predicate: P,
    /// Depth inside the subtree being skipped, zero when emitting
    skipping: usize,
    /// Events dropped so far in that subtree
    skipped: usize,
    done: bool,
    _element: PhantomData<fn() -> E>,
}

impl<I, E, P> Filter<I, E, P> {
    pub fn new(upstream: I, predicate: P) -> Self {
        Filter {
            upstream,
            predicate,
            skipping: 0,
            skipped: 0,
            done: false,
            _element: PhantomData,
        }
    }
}

impl<I, E, P> Iterator for Filter<I, E, P>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
    P: ElementPredicate<E>,
{
    type Item = Result<ParsingEvent<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let event = match self.upstream.next() {
                Some(Ok(event)) => event,
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    return None;
                }
            };

            if self.skipping > 0 {
                self.skipped += 1;
                match event {
                    ParsingEvent::Begin(..) => self.skipping += 1,
                    ParsingEvent::End(_) => self.skipping -= 1,
                    _ => {}
                }
                if self.skipping == 0 {
                    trace!("skipped subtree of {} events", self.skipped);
                }
                continue;
            }

            if let ParsingEvent::Begin(element, attributes) = &event {
                match self.predicate.test(element, attributes) {
                    Ok(true) => {}
                    Ok(false) => {
                        self.skipping = 1;
                        self.skipped = 1;
                        continue;
                    }
                    Err(err) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                }
            }

            return Some(Ok(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::event::Attributes;
    use crate::subtree::predicate::{Fallible, Infallible};
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
            begin("body"),
            begin("nav"),
            begin("a"),
            text("home"),
            ParsingEvent::End("a"),
            ParsingEvent::End("nav"),
            begin("p"),
            text("keep"),
            begin("nav"),
            text("inner"),
            ParsingEvent::End("nav"),
            ParsingEvent::End("p"),
            ParsingEvent::End("body"),
            ParsingEvent::EndDocument,
        ]
    }

    #[test]
    fn test_drops_subtrees_at_every_level() {
        let filtered: Vec<Event> = Filter::new(
            document().into_iter().map(Ok),
            Infallible(|element: &&'static str, _: &Attributes| *element != "nav"),
        )
        .collect::<Result<_>>()
        .unwrap();

        assert_eq!(
            filtered,
            vec![
                ParsingEvent::BeginDocument,
                begin("body"),
                begin("p"),
                text("keep"),
                ParsingEvent::End("p"),
                ParsingEvent::End("body"),
                ParsingEvent::EndDocument,
            ]
        );
    }

    #[test]
    fn test_predicate_sees_only_unskipped_begins() {
        let mut seen = Vec::new();
        let _ = Filter::new(
            document().into_iter().map(Ok),
            Infallible(|element: &&'static str, _: &Attributes| {
                seen.push(*element);
                *element != "nav"
            }),
        )
        .count();
        assert_eq!(seen, vec!["body", "nav", "p", "nav"]);
    }

    #[test]
    fn test_emits_again_after_deep_skipped_subtree() {
        let events = vec![
            begin("nav"),
            begin("ul"),
            begin("li"),
            text("deep"),
            ParsingEvent::End("li"),
            ParsingEvent::End("ul"),
            ParsingEvent::End("nav"),
            text("after"),
            begin("nav"),
            ParsingEvent::End("nav"),
            text("end"),
        ];
        let mut filtered = Filter::new(
            events.into_iter().map(Ok),
            Infallible(|element: &&'static str, _: &Attributes| *element != "nav"),
        );

        assert_eq!(filtered.next().unwrap().unwrap(), text("after"));
        assert_eq!(filtered.skipping, 0);
        assert_eq!(filtered.skipped, 7);
        assert_eq!(filtered.next().unwrap().unwrap(), text("end"));
        assert_eq!(filtered.skipped, 2);
        assert!(filtered.next().is_none());
    }

    #[test]
    fn test_upstream_error_ends_stream() {
        let events = vec![Ok(begin("p")), Err(Error::callback("boom")), Ok(ParsingEvent::End("p"))];
        let mut filtered = Filter::new(events.into_iter(), Infallible(|_: &&'static str, _: &Attributes| true));
        assert!(matches!(filtered.next(), Some(Ok(_))));
        assert!(matches!(filtered.next(), Some(Err(Error::Callback(_)))));
        assert!(filtered.next().is_none());
    }

    #[test]
    fn test_predicate_error_ends_stream() {
        let mut filtered = Filter::new(
            document().into_iter().map(Ok),
            Fallible(|element: &&'static str, _: &Attributes| {
                if *element == "nav" {
                    Err(Error::callback("unexpected nav"))
                } else {
                    Ok(true)
                }
            }),
        );
        assert!(matches!(filtered.next(), Some(Ok(ParsingEvent::BeginDocument))));
        assert!(matches!(filtered.next(), Some(Ok(ParsingEvent::Begin("body", _)))));
        assert!(matches!(filtered.next(), Some(Err(Error::Callback(_)))));
        assert!(filtered.next().is_none());
    }
}

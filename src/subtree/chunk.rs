use super::predicate::GroupPredicate;
use crate::error::Result;
use crate::event::ParsingEvent;
use log::warn;

/// A run of consecutive events
///
/// Labeled chunks hold exactly one matching subtree. Unlabeled chunks hold
/// the events between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk<G, E> {
    pub group: Option<G>,
    pub events: Vec<ParsingEvent<E>>,
}

/// Splits a stream into labeled subtrees and the unlabeled runs between them
///
/// Every begin outside a labeled subtree is offered to the predicate, so a
/// match nested inside a non-matching element still gets a chunk of its own.
/// Concatenating the chunks gives back the input.
pub struct ChunkByElement<I, E, P: GroupPredicate<E>> {
    upstream: I,
    predicate: P,
    /// Matching begin that ended the previous unlabeled run
    started: Option<(P::Group, ParsingEvent<E>)>,
    done: bool,
}

impl<I, E, P: GroupPredicate<E>> ChunkByElement<I, E, P> {
    pub fn new(upstream: I, predicate: P) -> Self {
        ChunkByElement {
            upstream,
            predicate,
            started: None,
            done: false,
        }
    }
}

impl<I, E, P> ChunkByElement<I, E, P>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
    P: GroupPredicate<E>,
{
    /// Read the rest of the subtree opened by `begin`
    fn labeled(&mut self, group: P::Group, begin: ParsingEvent<E>) -> Option<Result<Chunk<P::Group, E>>> {
        let mut events = vec![begin];
        let mut depth = 1isize;

        while depth > 0 {
            match self.upstream.next() {
                Some(Ok(event)) => {
                    depth += event.depth_delta();
                    events.push(event);
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    warn!("input ended inside a chunk, dropping {} events", events.len());
                    self.done = true;
                    return None;
                }
            }
        }

        Some(Ok(Chunk {
            group: Some(group),
            events,
        }))
    }
}

impl<I, E, P> Iterator for ChunkByElement<I, E, P>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
    P: GroupPredicate<E>,
{
    type Item = Result<Chunk<P::Group, E>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some((group, begin)) = self.started.take() {
            return self.labeled(group, begin);
        }

        let mut events = Vec::new();
        loop {
            let event = match self.upstream.next() {
                Some(Ok(event)) => event,
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    return if events.is_empty() {
                        None
                    } else {
                        Some(Ok(Chunk { group: None, events }))
                    };
                }
            };

            if let ParsingEvent::Begin(element, attributes) = &event {
                match self.predicate.group(element, attributes) {
                    Ok(Some(group)) if events.is_empty() => return self.labeled(group, event),
                    Ok(Some(group)) => {
                        self.started = Some((group, event));
                        return Some(Ok(Chunk { group: None, events }));
                    }
                    Ok(None) => {}
                    Err(err) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                }
            }
            events.push(event);
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

    fn heading_level(element: &&'static str, _: &Attributes) -> Option<u8> {
        match *element {
            "h1" => Some(1),
            "h2" => Some(2),
            _ => None,
        }
    }

    fn chunks(events: Vec<Event>) -> Vec<Chunk<u8, &'static str>> {
        ChunkByElement::new(events.into_iter().map(Ok), Infallible(heading_level))
            .collect::<Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_labeled_and_unlabeled_runs() {
        let out = chunks(vec![
            begin("h1"),
            text("Title"),
            ParsingEvent::End("h1"),
            begin("p"),
            text("intro"),
            ParsingEvent::End("p"),
            begin("h2"),
            begin("em"),
            text("Sub"),
            ParsingEvent::End("em"),
            ParsingEvent::End("h2"),
        ]);

        assert_eq!(
            out,
            vec![
                Chunk {
                    group: Some(1),
                    events: vec![begin("h1"), text("Title"), ParsingEvent::End("h1")],
                },
                Chunk {
                    group: None,
                    events: vec![begin("p"), text("intro"), ParsingEvent::End("p")],
                },
                Chunk {
                    group: Some(2),
                    events: vec![
                        begin("h2"),
                        begin("em"),
                        text("Sub"),
                        ParsingEvent::End("em"),
                        ParsingEvent::End("h2"),
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_match_nested_in_unlabeled_run() {
        let input = vec![
            ParsingEvent::BeginDocument,
            begin("section"),
            begin("h1"),
            text("A"),
            ParsingEvent::End("h1"),
            ParsingEvent::End("section"),
            ParsingEvent::EndDocument,
        ];
        let out = chunks(input.clone());

        let groups: Vec<Option<u8>> = out.iter().map(|chunk| chunk.group).collect();
        assert_eq!(groups, vec![None, Some(1), None]);

        let flattened: Vec<Event> = out.into_iter().flat_map(|chunk| chunk.events).collect();
        assert_eq!(flattened, input);
    }

    #[test]
    fn test_error_drops_partial_chunk() {
        let events = vec![Ok(begin("h1")), Ok(text("cut")), Err(Error::callback("boom"))];
        let mut out = ChunkByElement::new(events.into_iter(), Infallible(heading_level));
        assert!(matches!(out.next(), Some(Err(Error::Callback(_)))));
        assert!(out.next().is_none());
    }

    #[test]
    fn test_truncated_subtree_is_dropped() {
        let events = vec![Ok(text("lead")), Ok(begin("h2")), Ok(text("never closed"))];
        let out: Vec<Result<Chunk<u8, &'static str>>> =
            ChunkByElement::new(events.into_iter(), Infallible(heading_level)).collect();
        assert_eq!(out.len(), 1);
        assert!(matches!(&out[0], Ok(Chunk { group: None, .. })));
    }

    #[test]
    fn test_predicate_error() {
        let mut out = ChunkByElement::new(
            vec![Ok(text("a")), Ok(begin("h1"))].into_iter(),
            Fallible(|_: &&'static str, _: &Attributes| -> Result<Option<u8>> { Err(Error::callback("nope")) }),
        );
        assert!(matches!(out.next(), Some(Err(Error::Callback(_)))));
        assert!(out.next().is_none());
    }
}

//! Mapping events with the context of their open ancestors

use super::predicate::ContextMapper;
use crate::error::Result;
use crate::event::{Attributes, ParsingEvent};

/// An open element together with the value its begin event was mapped to
#[derive(Debug, Clone, PartialEq)]
pub struct MappingContext<E, R> {
    pub element: E,
    pub attributes: Attributes,
    pub mapped: R,
}

/// Maps every event to a value, passing the contexts of the open elements
///
/// The mapper sees the context stack as it is before the event: a begin
/// event does not see its own context yet, an end event still does.
pub struct MapWithContext<I, E, R, M> {
    upstream: I,
    mapper: M,
    context: Vec<MappingContext<E, R>>,
    done: bool,
}

impl<I, E, R, M> MapWithContext<I, E, R, M> {
    pub fn new(upstream: I, mapper: M) -> Self {
        MapWithContext {
            upstream,
            mapper,
            context: Vec::new(),
            done: false,
        }
    }
}

impl<I, E, R, M> Iterator for MapWithContext<I, E, R, M>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
    M: ContextMapper<E, R>,
    R: Clone,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

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

        let mapped = match self.mapper.map(&self.context, &event) {
            Ok(mapped) => mapped,
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };

        match event {
            ParsingEvent::Begin(element, attributes) => self.context.push(MappingContext {
                element,
                attributes,
                mapped: mapped.clone(),
            }),
            ParsingEvent::End(_) => {
                self.context.pop();
            }
            _ => {}
        }

        Some(Ok(mapped))
    }
}

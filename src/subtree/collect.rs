use super::predicate::ElementPredicate;
use crate::error::Result;
use crate::event::ParsingEvent;
use std::marker::PhantomData;

/// Keeps only the subtrees whose root matches the predicate
///
/// Everything outside a matching subtree is dropped, document events
/// included. A match nested inside another match is part of the outer
/// subtree and the predicate is not asked about it.
pub struct Collect<I, E, P> {
    upstream: I,
    predicate: P,
    /// Depth inside the subtree being emitted, zero while scanning
    depth: usize,
    /// Stop once the first subtree is complete
    first_only: bool,
    done: bool,
    _element: PhantomData<fn() -> E>,
}

impl<I, E, P> Collect<I, E, P> {
    pub fn new(upstream: I, predicate: P) -> Self {
        Collect {
            upstream,
            predicate,
            depth: 0,
            first_only: false,
            done: false,
            _element: PhantomData,
        }
    }
}

impl<I, E, P> Iterator for Collect<I, E, P>
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

            if self.depth == 0 {
                let ParsingEvent::Begin(element, attributes) = &event else {
                    continue;
                };
                match self.predicate.test(element, attributes) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(err) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                }
            }

            match event {
                ParsingEvent::Begin(..) => self.depth += 1,
                ParsingEvent::End(_) => {
                    self.depth -= 1;
                    if self.depth == 0 && self.first_only {
                        self.done = true;
                    }
                }
                _ => {}
            }
            return Some(Ok(event));
        }
    }
}

/// The first subtree whose root matches the predicate
pub struct FirstElement<I, E, P>(Collect<I, E, P>);

impl<I, E, P> FirstElement<I, E, P> {
    pub fn new(upstream: I, predicate: P) -> Self {
        let mut collect = Collect::new(upstream, predicate);
        collect.first_only = true;
        FirstElement(collect)
    }
}

impl<I, E, P> Iterator for FirstElement<I, E, P>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
    P: ElementPredicate<E>,
{
    type Item = Result<ParsingEvent<E>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

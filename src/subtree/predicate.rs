//! Caller-supplied functions of the subtree operators
//!
//! Plain closures are wrapped in [`Infallible`]; closures returning
//! `Result` are wrapped in [`Fallible`] and their errors become the
//! stream's terminal error.

use super::context::MappingContext;
use crate::error::Result;
use crate::event::{Attributes, ParsingEvent};

/// Decides whether an element's subtree matches
pub trait ElementPredicate<E> {
    fn test(&mut self, element: &E, attributes: &Attributes) -> Result<bool>;
}

/// Assigns a matching element's subtree to a group
pub trait GroupPredicate<E> {
    type Group;

    fn group(&mut self, element: &E, attributes: &Attributes) -> Result<Option<Self::Group>>;
}

/// Maps an event to an `R` with the contexts of its open ancestors
pub trait ContextMapper<E, R> {
    fn map(&mut self, context: &[MappingContext<E, R>], event: &ParsingEvent<E>) -> Result<R>;
}

/// Closure that cannot fail
#[derive(Debug, Clone, Copy)]
pub struct Infallible<F>(pub F);

/// Closure returning `Result`
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<E, F> ElementPredicate<E> for Infallible<F>
where
    F: FnMut(&E, &Attributes) -> bool,
{
    #[inline]
    fn test(&mut self, element: &E, attributes: &Attributes) -> Result<bool> {
        Ok((self.0)(element, attributes))
    }
}

impl<E, F> ElementPredicate<E> for Fallible<F>
where
    F: FnMut(&E, &Attributes) -> Result<bool>,
{
    #[inline]
    fn test(&mut self, element: &E, attributes: &Attributes) -> Result<bool> {
        (self.0)(element, attributes)
    }
}

impl<E, G, F> GroupPredicate<E> for Infallible<F>
where
    F: FnMut(&E, &Attributes) -> Option<G>,
{
    type Group = G;

    #[inline]
    fn group(&mut self, element: &E, attributes: &Attributes) -> Result<Option<G>> {
        Ok((self.0)(element, attributes))
    }
}

impl<E, G, F> GroupPredicate<E> for Fallible<F>
where
    F: FnMut(&E, &Attributes) -> Result<Option<G>>,
{
    type Group = G;

    #[inline]
    fn group(&mut self, element: &E, attributes: &Attributes) -> Result<Option<G>> {
        (self.0)(element, attributes)
    }
}

impl<E, R, F> ContextMapper<E, R> for Infallible<F>
where
    F: FnMut(&[MappingContext<E, R>], &ParsingEvent<E>) -> R,
{
    #[inline]
    fn map(&mut self, context: &[MappingContext<E, R>], event: &ParsingEvent<E>) -> Result<R> {
        Ok((self.0)(context, event))
    }
}

impl<E, R, F> ContextMapper<E, R> for Fallible<F>
where
    F: FnMut(&[MappingContext<E, R>], &ParsingEvent<E>) -> Result<R>,
{
    #[inline]
    fn map(&mut self, context: &[MappingContext<E, R>], event: &ParsingEvent<E>) -> Result<R> {
        (self.0)(context, event)
    }
}

//! Chaining stages as iterator methods
//!
//! ```
//! use tagstream::{CollapseExt, EventReader, EventStreamExt, HtmlElement, WhitespaceStreamExt};
//!
//! let text = EventReader::<_, HtmlElement>::from_text("<p>One</p>\n<p>  Two  </p>")
//!     .map_whitespace_by_element()
//!     .map_linebreaks(|_, _| "\n".to_string())
//!     .collapse()
//!     .into_text()
//!     .unwrap();
//! assert_eq!(text, "One\nTwo");
//! ```

use crate::collapse::{Collapse, Collapsible, Fold};
use crate::error::Result;
use crate::event::{Attributes, EventStream, ParsingEvent};
use crate::linebreak::MapLinebreaks;
use crate::subtree::{
    self, ChunkByElement, Collect, Fallible, Filter, FirstElement, Infallible, MapWithContext, MappingContext,
    Subtree,
};
use crate::whitespace::{JoinText, MapWhitespace, WhitespaceCollapsing, WhitespaceParsingEvent, WhitespacePolicy};

/// Policy function of elements that know their own policy
pub type ElementPolicy<E> = fn(&E, &Attributes) -> WhitespacePolicy;

/// Stages available on every parsing event stream
pub trait EventStreamExt: EventStream + Sized {
    /// Drop every subtree whose root fails `predicate`
    fn filter_elements<F>(self, predicate: F) -> Filter<Self, Self::Element, Infallible<F>>
    where
        F: FnMut(&Self::Element, &Attributes) -> bool,
    {
        Filter::new(self, Infallible(predicate))
    }

    fn try_filter_elements<F>(self, predicate: F) -> Filter<Self, Self::Element, Fallible<F>>
    where
        F: FnMut(&Self::Element, &Attributes) -> Result<bool>,
    {
        Filter::new(self, Fallible(predicate))
    }

    /// Keep only the subtrees whose root matches `predicate`
    fn collect_elements<F>(self, predicate: F) -> Collect<Self, Self::Element, Infallible<F>>
    where
        F: FnMut(&Self::Element, &Attributes) -> bool,
    {
        Collect::new(self, Infallible(predicate))
    }

    fn try_collect_elements<F>(self, predicate: F) -> Collect<Self, Self::Element, Fallible<F>>
    where
        F: FnMut(&Self::Element, &Attributes) -> Result<bool>,
    {
        Collect::new(self, Fallible(predicate))
    }

    /// Keep only the first subtree whose root matches `predicate`
    fn first_element<F>(self, predicate: F) -> FirstElement<Self, Self::Element, Infallible<F>>
    where
        F: FnMut(&Self::Element, &Attributes) -> bool,
    {
        FirstElement::new(self, Infallible(predicate))
    }

    /// Group the stream into subtrees labeled by `predicate` and the
    /// unlabeled runs between them
    fn chunk_by_element<G, F>(self, predicate: F) -> ChunkByElement<Self, Self::Element, Infallible<F>>
    where
        F: FnMut(&Self::Element, &Attributes) -> Option<G>,
    {
        ChunkByElement::new(self, Infallible(predicate))
    }

    fn try_chunk_by_element<G, F>(self, predicate: F) -> ChunkByElement<Self, Self::Element, Fallible<F>>
    where
        F: FnMut(&Self::Element, &Attributes) -> Result<Option<G>>,
    {
        ChunkByElement::new(self, Fallible(predicate))
    }

    /// Map every event, seeing the open elements and what their begin events
    /// were mapped to
    fn map_with_context<R, F>(self, mapper: F) -> MapWithContext<Self, Self::Element, R, Infallible<F>>
    where
        F: FnMut(&[MappingContext<Self::Element, R>], &ParsingEvent<Self::Element>) -> R,
    {
        MapWithContext::new(self, Infallible(mapper))
    }

    fn try_map_with_context<R, F>(self, mapper: F) -> MapWithContext<Self, Self::Element, R, Fallible<F>>
    where
        F: FnMut(&[MappingContext<Self::Element, R>], &ParsingEvent<Self::Element>) -> Result<R>,
    {
        MapWithContext::new(self, Fallible(mapper))
    }

    /// Fold `f` over every outermost element with its content
    ///
    /// Content `f` leaves unread is skipped before the next element. The
    /// first upstream or callback error ends the fold.
    fn reduce_elements<B, F>(self, init: B, f: F) -> Result<B>
    where
        Self: Iterator<Item = Result<ParsingEvent<Self::Element>>>,
        F: FnMut(B, Self::Element, Attributes, &mut Subtree<'_, Self>) -> Result<B>,
    {
        subtree::reduce_elements(self, init, f)
    }

    /// Merge adjacent text events
    fn join_adjacent_text(self) -> JoinText<Self, Self::Element> {
        JoinText::new(self)
    }

    /// Classify whitespace with the policy `policy` gives each element
    fn map_whitespace<F>(self, policy: F) -> MapWhitespace<Self, Self::Element, F>
    where
        Self: Iterator<Item = Result<ParsingEvent<Self::Element>>>,
        F: FnMut(&Self::Element, &Attributes) -> WhitespacePolicy,
    {
        MapWhitespace::new(self, policy)
    }

    /// Classify whitespace with the elements' own policies
    fn map_whitespace_by_element(self) -> MapWhitespace<Self, Self::Element, ElementPolicy<Self::Element>>
    where
        Self: Iterator<Item = Result<ParsingEvent<Self::Element>>>,
        Self::Element: WhitespaceCollapsing,
    {
        let policy: ElementPolicy<Self::Element> = <Self::Element as WhitespaceCollapsing>::whitespace_policy;
        MapWhitespace::new(self, policy)
    }

    /// Concatenate all text, stopping at the first error
    fn into_text(mut self) -> Result<String> {
        let mut text = String::new();
        while let Some(event) = self.next_event() {
            if let ParsingEvent::Text(chunk) = event? {
                text.push_str(&chunk);
            }
        }
        Ok(text)
    }
}

impl<S: EventStream + Sized> EventStreamExt for S {}

/// Stages available on whitespace-classified streams
pub trait WhitespaceStreamExt<E>: Iterator<Item = Result<WhitespaceParsingEvent<E>>> + Sized {
    /// Insert `separator(element, attributes)` at block boundaries between
    /// text
    fn map_linebreaks<F>(self, separator: F) -> MapLinebreaks<Self, E, F>
    where
        E: Clone,
        F: FnMut(&E, &Attributes) -> String,
    {
        MapLinebreaks::new(self, separator)
    }
}

impl<I, E> WhitespaceStreamExt<E> for I where I: Iterator<Item = Result<WhitespaceParsingEvent<E>>> {}

/// Folding any classified or plain stream into rendered parsing events
pub trait CollapseExt<T: Collapsible>: Iterator<Item = Result<T>> + Sized {
    fn collapse(self) -> Collapse<Self, T::Element> {
        JoinText::new(Fold::new(self))
    }
}

impl<I, T> CollapseExt<T> for I
where
    I: Iterator<Item = Result<T>>,
    T: Collapsible,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::event::HtmlElement;
    use crate::reader::EventReader;
    use pretty_assertions::assert_eq;

    fn html(text: &str) -> EventReader<&[u8], HtmlElement> {
        EventReader::from_text(text)
    }

    #[test]
    fn test_into_text() {
        assert_eq!(html("<p>a<b>b</b>c</p>").into_text().unwrap(), "abc");
    }

    #[test]
    fn test_filter_then_collapse() {
        let text = html("<div><nav>menu</nav><p> body   text </p></div>")
            .filter_elements(|element, _| *element != HtmlElement::Nav)
            .map_whitespace_by_element()
            .collapse()
            .into_text()
            .unwrap();
        assert_eq!(text, "body text");
    }

    #[test]
    fn test_map_whitespace_with_closure() {
        let text = html("<x>  a  <y> b </y> </x>")
            .map_whitespace(|_, _| WhitespacePolicy::Inline)
            .collapse()
            .into_text()
            .unwrap();
        assert_eq!(text, "a b");
    }

    #[test]
    fn test_chunk_by_element() {
        let groups: Vec<Option<u8>> = html("<body><h1>A</h1><p>x</p><h2>B</h2></body>")
            .chunk_by_element(|element, _| match element {
                HtmlElement::H1 => Some(1),
                HtmlElement::H2 => Some(2),
                _ => None,
            })
            .map(|chunk| chunk.map(|chunk| chunk.group))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(groups, vec![None, Some(1), None, Some(2), None]);
    }

    #[test]
    fn test_map_with_context_depth() {
        let depths: Vec<usize> = html("<a><b>t</b></a>")
            .map_with_context(|context: &[MappingContext<HtmlElement, usize>], _| context.len())
            .collect::<Result<_>>()
            .unwrap();
        // document, <a>, <b>, text, </b>, </a>, document
        assert_eq!(depths, vec![0, 0, 1, 2, 2, 1, 0]);
    }

    #[test]
    fn test_reduce_elements_per_list() {
        let lists = html("<ul><li>a</li><li>b</li></ul><p>skip</p><ol><li>c</li></ol>")
            .reduce_elements(Vec::new(), |mut lists, element, _, items| {
                if element == HtmlElement::Ul || element == HtmlElement::Ol {
                    let count = items
                        .filter(|event| matches!(event, ParsingEvent::Begin(HtmlElement::Li, _)))
                        .count();
                    lists.push(count);
                }
                Ok(lists)
            })
            .unwrap();
        assert_eq!(lists, vec![2, 1]);
    }

    #[test]
    fn test_try_map_with_context_error() {
        let result = html("<a><b>t</b></a>")
            .try_map_with_context(|context: &[MappingContext<HtmlElement, ()>], _| match context.len() {
                2 => Err(Error::callback("too deep")),
                _ => Ok(()),
            })
            .collect::<Result<Vec<_>>>();
        assert!(matches!(result, Err(Error::Callback(_))));
    }

    #[test]
    fn test_try_collect_propagates_callback_error() {
        let result = html("<p>x</p>")
            .try_collect_elements(|_, _| Err(Error::callback("rejected")))
            .collect::<Result<Vec<_>>>();
        assert!(matches!(result, Err(Error::Callback(_))));
    }
}

//! Subtree operators
//!
//! Each operator is an iterator adapter over a parsing event stream that
//! selects whole subtrees, tracking nesting with a depth counter so its
//! output stays balanced:
//!
//! - [`Filter`] drops subtrees whose root fails a predicate
//! - [`Collect`] keeps only subtrees whose root matches
//! - [`FirstElement`] keeps only the first matching subtree
//! - [`ChunkByElement`] groups the stream into labeled subtrees and the
//!   unlabeled runs between them
//! - [`MapWithContext`] maps every event with the stack of open elements
//! - [`reduce_elements`] folds over outermost elements, handing each one's
//!   content out as a [`Subtree`]
//!
//! The first error from upstream or from a predicate is emitted and ends the
//! operator.

mod chunk;
mod collect;
mod context;
mod filter;
mod predicate;
mod reduce;

pub use chunk::{Chunk, ChunkByElement};
pub use collect::{Collect, FirstElement};
pub use context::{MapWithContext, MappingContext};
pub use filter::Filter;
pub use predicate::{ContextMapper, ElementPredicate, Fallible, GroupPredicate, Infallible};
pub use reduce::{reduce_elements, Subtree};

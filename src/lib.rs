//! tagstream - streaming markup event pipelines
//!
//! Stages:
//! - Source: [`EventReader`] turns bytes into [`ParsingEvent`]s
//! - Subtree operators: filter, collect, chunk and map with context
//! - Whitespace: policy per element, every whitespace run marked collapse or remove
//! - Linebreaks: separators at block boundaries between text
//! - Collapse: fold a classified stream back into rendered text
//!
//! Every stage is a lazy iterator of `Result`s. The first error ends the
//! pipeline and reaches the consumer unchanged.
//!
//! ```
//! use tagstream::{CollapseExt, EventReader, EventStreamExt, HtmlElement, WhitespaceStreamExt};
//!
//! let html = "<body><nav>Menu</nav><h1> Art   Deco </h1><p>A style\n   of design.</p></body>";
//! let text = EventReader::<_, HtmlElement>::from_text(html)
//!     .filter_elements(|element, _| *element != HtmlElement::Nav)
//!     .map_whitespace_by_element()
//!     .map_linebreaks(|_, _| "\n".to_string())
//!     .collapse()
//!     .into_text()
//!     .unwrap();
//! assert_eq!(text, "Art Deco\nA style of design.");
//! ```

mod core;

pub mod collapse;
pub mod debug;
pub mod error;
pub mod event;
pub mod linebreak;
pub mod pipeline;
pub mod reader;
pub mod subtree;
pub mod whitespace;

pub use collapse::{Collapse, Collapsible};
pub use debug::DebugFormatter;
pub use error::{Error, ErrorCode, ErrorDomain, ParseError, Result};
pub use event::{Attributes, DecodeElement, EventStream, HtmlElement, ParsingEvent, XmlElement};
pub use linebreak::{LinebreakParsingEvent, MapLinebreaks};
pub use pipeline::{CollapseExt, EventStreamExt, WhitespaceStreamExt};
pub use reader::{EventReader, ReaderOptions};
pub use subtree::{Chunk, MappingContext, Subtree};
pub use whitespace::{WhitespaceCollapsing, WhitespaceParsingEvent, WhitespacePolicy, WhitespaceProcessing};

//! Event reader
//!
//! Pull-based source of [`ParsingEvent`]s over any `Read`:
//!
//! ```text
//! Read --chunks--> BufferedReader --text--> tokenizer --tokens--> EventReader --events-->
//! ```
//!
//! - Emits `BeginDocument` first and `EndDocument` last on clean input
//! - Empty-element tags produce a begin and an end event
//! - Comments, processing instructions and DOCTYPE produce nothing;
//!   CDATA produces text
//! - Top-level text and multiple top-level elements are accepted
//! - The first error is reported once with its position, then the reader is
//!   exhausted

mod buffered;

pub use buffered::DEFAULT_CHUNK_SIZE;

use crate::core::attributes::parse_attributes;
use crate::core::entities::decode_text;
use crate::core::tokenizer::{next_token, Step, Token};
use crate::core::SyntaxError;
use crate::error::{Error, ErrorCode, ParseError, Result};
use crate::event::{Attributes, DecodeElement, ParsingEvent};
use buffered::{BufferedReader, FillError};
use log::debug;
use std::io::Read;

/// Reader configuration
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Reported in parse errors
    pub filename: Option<String>,
    /// Bytes requested from the source per read
    pub chunk_size: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            filename: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Values below 1 are raised to 1
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Body,
    Done,
}

/// Streaming markup parser yielding `Result<ParsingEvent<E>>`
pub struct EventReader<R, E> {
    input: BufferedReader<R>,
    filename: Option<String>,
    /// Open elements, innermost last
    open: Vec<(String, E)>,
    /// End event of an empty-element tag
    queued: Option<ParsingEvent<E>>,
    state: State,
}

impl<R: Read, E> EventReader<R, E> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: R, options: ReaderOptions) -> Self {
        EventReader {
            input: BufferedReader::with_chunk_size(source, options.chunk_size),
            filename: options.filename,
            open: Vec::new(),
            queued: None,
            state: State::Start,
        }
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

impl<'a, E> EventReader<&'a [u8], E> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        EventReader::new(bytes)
    }

    pub fn from_text(text: &'a str) -> Self {
        EventReader::new(text.as_bytes())
    }
}

impl<R: Read, E: DecodeElement + Clone> EventReader<R, E> {
    fn read_event(&mut self) -> Result<Option<ParsingEvent<E>>> {
        loop {
            let is_final = self.input.is_final();
            let outcome = match next_token(self.input.available(), is_final) {
                Ok(Step::Token(token, len)) => token_event(token, &mut self.open).map(|p| Some((p, len))),
                Ok(Step::Incomplete) => Ok(None),
                Ok(Step::Eof) => {
                    return match self.open.last() {
                        Some((name, _)) => {
                            let message = format!("element <{}> is not closed", name);
                            Err(self.parse_error(SyntaxError::new(ErrorCode::UnclosedElement, message, 0)))
                        }
                        None => Ok(None),
                    };
                }
                Err(err) => Err(err),
            };

            match outcome {
                Ok(Some((produced, consumed))) => {
                    self.input.consume(consumed);
                    if let Some((event, then)) = produced {
                        self.queued = then;
                        return Ok(Some(event));
                    }
                }
                Ok(None) => self.fill()?,
                Err(err) => return Err(self.parse_error(err)),
            }
        }
    }

    fn fill(&mut self) -> Result<()> {
        match self.input.fill() {
            Ok(()) => Ok(()),
            Err(FillError::Io(err)) => Err(Error::Io(err)),
            Err(FillError::Decode(err)) => {
                let end = self.input.available().len();
                Err(self.parse_error(err.offset(end)))
            }
        }
    }

    fn parse_error(&self, err: SyntaxError) -> Error {
        let (line, column) = self.input.location_at(err.position);
        Error::Parse(ParseError {
            domain: err.code.domain(),
            code: err.code,
            message: err.message,
            filename: self.filename.clone(),
            line,
            column,
        })
    }
}

type Produced<E> = Option<(ParsingEvent<E>, Option<ParsingEvent<E>>)>;

/// Events for one token: nothing, one event, or begin and end of an empty tag
fn token_event<E: DecodeElement + Clone>(
    token: Token<'_>,
    open: &mut Vec<(String, E)>,
) -> Result<Produced<E>, SyntaxError> {
    match token {
        Token::Skipped => Ok(None),
        Token::Text(raw) => {
            let text = decode_text(raw)?;
            Ok((!text.is_empty()).then(|| (ParsingEvent::Text(text.into_owned()), None)))
        }
        Token::CData(text) => Ok((!text.is_empty()).then(|| (ParsingEvent::Text(text.to_string()), None))),
        Token::StartTag {
            name,
            attributes,
            attributes_offset,
            self_closing,
        } => {
            let mut attrs = Attributes::new();
            for attr in parse_attributes(attributes).map_err(|err| err.offset(attributes_offset))? {
                if !attrs.try_insert(attr.name, attr.value.into_owned()) {
                    return Err(SyntaxError::new(
                        ErrorCode::DuplicateAttribute,
                        format!("attribute '{}' redefined", attr.name),
                        attributes_offset + attr.position,
                    ));
                }
            }

            let element = E::decode(name, &attrs);
            if self_closing {
                let end = ParsingEvent::End(element.clone());
                Ok(Some((ParsingEvent::Begin(element, attrs), Some(end))))
            } else {
                open.push((name.to_string(), element.clone()));
                Ok(Some((ParsingEvent::Begin(element, attrs), None)))
            }
        }
        Token::EndTag { name } => match open.pop() {
            Some((open_name, element)) if open_name == name => Ok(Some((ParsingEvent::End(element), None))),
            Some((open_name, _)) => Err(SyntaxError::new(
                ErrorCode::MismatchedTag,
                format!("expected </{}>, found </{}>", open_name, name),
                0,
            )),
            None => Err(SyntaxError::new(
                ErrorCode::UnexpectedEndTag,
                format!("end tag </{}> without open element", name),
                0,
            )),
        },
    }
}

impl<R: Read, E: DecodeElement + Clone> Iterator for EventReader<R, E> {
    type Item = Result<ParsingEvent<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Start => {
                self.state = State::Body;
                return Some(Ok(ParsingEvent::BeginDocument));
            }
            State::Done => return None,
            State::Body => {}
        }

        if let Some(event) = self.queued.take() {
            return Some(Ok(event));
        }

        match self.read_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                debug!("document complete");
                self.state = State::Done;
                Some(Ok(ParsingEvent::EndDocument))
            }
            Err(err) => {
                debug!("parsing failed: {}", err);
                self.state = State::Done;
                self.open.clear();
                Some(Err(err))
            }
        }
    }
}

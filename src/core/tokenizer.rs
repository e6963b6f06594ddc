//! Resumable markup tokenizer
//!
//! Extracts one token at a time from the front of a partially buffered
//! document. When the buffer ends inside a construct the tokenizer reports
//! [`Step::Incomplete`] and the caller refills and retries; once the input is
//! final, an unterminated construct is an error instead.
//!
//! Token kinds:
//! - Element start tags, end tags and empty-element tags
//! - Text content (raw, references not yet decoded)
//! - CDATA sections
//! - Comments, processing instructions, the XML declaration and DOCTYPE,
//!   which are consumed without producing content

use super::scanner::{is_whitespace, Scanner};
use super::SyntaxError;
use crate::error::ErrorCode;
use memchr::{memchr, memrchr};

/// A token borrowed from the buffered input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name attrs...>` or `<name attrs.../>`
    StartTag {
        name: &'a str,
        /// Raw attribute list following the name
        attributes: &'a str,
        /// Byte offset of `attributes` from the start of the token
        attributes_offset: usize,
        self_closing: bool,
    },
    /// `</name>`
    EndTag { name: &'a str },
    /// Character data with references still encoded
    Text(&'a str),
    /// Content of `<![CDATA[...]]>`
    CData(&'a str),
    /// Comment, processing instruction, XML declaration or DOCTYPE
    Skipped,
}

/// Outcome of one tokenizer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a> {
    /// A token and the number of bytes it spans
    Token(Token<'a>, usize),
    /// More input is needed to finish the construct at the front
    Incomplete,
    /// Final input fully consumed
    Eof,
}

const COMMENT_OPEN: &str = "<!--";
const CDATA_OPEN: &str = "<![CDATA[";

/// Extract the next token from the front of `input`
///
/// `is_final` tells the tokenizer no more input will follow. Error positions
/// are byte offsets into `input`.
pub fn next_token(input: &str, is_final: bool) -> Result<Step<'_>, SyntaxError> {
    if input.is_empty() {
        return Ok(if is_final { Step::Eof } else { Step::Incomplete });
    }

    let bytes = input.as_bytes();
    if bytes[0] != b'<' {
        return Ok(text(input, is_final));
    }

    let step = match bytes.get(1) {
        None => None,
        Some(b'!') => markup_declaration(input)?,
        Some(b'?') => {
            let scanner = Scanner::new(bytes);
            scanner
                .find_sequence(b"?>")
                .map(|end| Step::Token(Token::Skipped, end + 2))
        }
        Some(b'/') => end_tag(input)?,
        Some(_) => start_tag(input)?,
    };

    match step {
        Some(step) => Ok(step),
        None if is_final => Err(SyntaxError::new(
            ErrorCode::UnterminatedMarkup,
            "markup is not terminated before end of input",
            0,
        )),
        None => Ok(Step::Incomplete),
    }
}

/// Text up to the next '<'
///
/// Without a '<' in sight, text is cut before a trailing reference that may
/// still be incomplete so that the rest can be emitted early.
fn text(input: &str, is_final: bool) -> Step<'_> {
    let bytes = input.as_bytes();
    if let Some(end) = memchr(b'<', bytes) {
        return Step::Token(Token::Text(&input[..end]), end);
    }
    if is_final {
        return Step::Token(Token::Text(input), input.len());
    }

    let safe = match memrchr(b'&', bytes) {
        Some(amp) if memchr(b';', &bytes[amp..]).is_none() => amp,
        _ => input.len(),
    };
    if safe == 0 {
        Step::Incomplete
    } else {
        Step::Token(Token::Text(&input[..safe]), safe)
    }
}

/// `<!--...-->`, `<![CDATA[...]]>` or `<!DOCTYPE ...>`
fn markup_declaration(input: &str) -> Result<Option<Step<'_>>, SyntaxError> {
    let bytes = input.as_bytes();

    if input.starts_with(COMMENT_OPEN) {
        let mut scanner = Scanner::new(bytes);
        scanner.advance(COMMENT_OPEN.len());
        return Ok(scanner
            .find_sequence(b"-->")
            .map(|end| Step::Token(Token::Skipped, end + 3)));
    }

    if input.starts_with(CDATA_OPEN) {
        let mut scanner = Scanner::new(bytes);
        scanner.advance(CDATA_OPEN.len());
        return Ok(scanner.find_sequence(b"]]>").map(|end| {
            Step::Token(Token::CData(&input[CDATA_OPEN.len()..end]), end + 3)
        }));
    }

    // Could still become a comment or CDATA section once more input arrives
    if COMMENT_OPEN.starts_with(input) || CDATA_OPEN.starts_with(input) {
        return Ok(None);
    }

    let is_letter = bytes.get(2).is_some_and(|b| b.is_ascii_alphabetic());
    if !is_letter && bytes.len() > 2 {
        return Err(SyntaxError::new(ErrorCode::InvalidName, "invalid markup declaration", 0));
    }

    let scanner = Scanner::new(bytes);
    Ok(scanner
        .find_declaration_end()
        .map(|end| Step::Token(Token::Skipped, end + 1)))
}

fn end_tag(input: &str) -> Result<Option<Step<'_>>, SyntaxError> {
    let bytes = input.as_bytes();
    let scanner = Scanner::new(bytes);
    let Some(end) = scanner.find_byte(b'>') else {
        return Ok(None);
    };

    let content = &input[2..end];
    let name = content.trim_end_matches(|c: char| c.is_ascii() && is_whitespace(c as u8));

    let mut name_scanner = Scanner::new(name.as_bytes());
    match name_scanner.read_name() {
        Some(len) if len == name.len() => Ok(Some(Step::Token(Token::EndTag { name }, end + 1))),
        _ => Err(SyntaxError::new(
            ErrorCode::InvalidName,
            format!("invalid end tag '</{}>'", content),
            2,
        )),
    }
}

fn start_tag(input: &str) -> Result<Option<Step<'_>>, SyntaxError> {
    let bytes = input.as_bytes();
    let scanner = Scanner::new(bytes);
    let Some(end) = scanner.find_tag_end_quoted() else {
        return Ok(None);
    };

    let content = &input[1..end];
    let (body, self_closing) = match content.strip_suffix('/') {
        Some(body) => (body, true),
        None => (content, false),
    };

    let mut name_scanner = Scanner::new(body.as_bytes());
    let name_len = name_scanner.read_name().ok_or_else(|| {
        SyntaxError::new(ErrorCode::InvalidName, "element name expected after '<'", 1)
    })?;

    // The name must be followed by whitespace or the end of the tag
    if name_scanner.peek().is_some_and(|b| !is_whitespace(b)) {
        return Err(SyntaxError::new(
            ErrorCode::InvalidName,
            format!("invalid character in element name '{}'", &body[..=name_len]),
            1 + name_len,
        ));
    }

    Ok(Some(Step::Token(
        Token::StartTag {
            name: &body[..name_len],
            attributes: &body[name_len..],
            attributes_offset: 1 + name_len,
            self_closing,
        },
        end + 1,
    )))
}

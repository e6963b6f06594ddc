//! Attribute parsing
//!
//! Parses the attribute list of a start tag: the content between the element
//! name and '>' or '/>'. Accepts quoted values, unquoted values and bare
//! (boolean) attributes.

use super::entities::decode_text;
use super::scanner::{is_whitespace, Scanner};
use super::SyntaxError;
use crate::error::ErrorCode;
use memchr::memchr;
use std::borrow::Cow;

/// A parsed attribute, value with references decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: Cow<'a, str>,
    /// Byte offset of the name within the parsed input
    pub position: usize,
}

/// Parse attributes from raw tag content (after the element name)
///
/// Error positions are byte offsets into `input`.
pub fn parse_attributes(input: &str) -> Result<Vec<Attribute<'_>>, SyntaxError> {
    let bytes = input.as_bytes();
    let mut scanner = Scanner::new(bytes);
    let mut attrs = Vec::new();

    loop {
        scanner.skip_whitespace();
        if scanner.is_eof() {
            break;
        }

        let name_start = scanner.position();
        let Some(name_len) = scanner.read_name() else {
            return Err(SyntaxError::new(
                ErrorCode::MalformedAttribute,
                "attribute name expected",
                name_start,
            ));
        };
        let name = &input[name_start..name_start + name_len];

        scanner.skip_whitespace();
        if scanner.peek() != Some(b'=') {
            // Attribute without value (like HTML boolean attributes)
            attrs.push(Attribute {
                name,
                value: Cow::Borrowed(""),
                position: name_start,
            });
            continue;
        }
        scanner.advance(1);
        scanner.skip_whitespace();

        let (value_start, value_end) = match scanner.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                let start = scanner.position() + 1;
                let Some(len) = memchr(quote, &bytes[start..]) else {
                    return Err(SyntaxError::new(
                        ErrorCode::MalformedAttribute,
                        format!("unterminated value for attribute '{}'", name),
                        name_start,
                    ));
                };
                scanner.advance(len + 2);
                (start, start + len)
            }
            Some(_) => {
                // Unquoted value (non-standard but handle it)
                let start = scanner.position();
                let len = bytes[start..]
                    .iter()
                    .position(|&b| is_whitespace(b))
                    .unwrap_or(bytes.len() - start);
                scanner.advance(len);
                (start, start + len)
            }
            None => {
                return Err(SyntaxError::new(
                    ErrorCode::MalformedAttribute,
                    format!("missing value for attribute '{}'", name),
                    name_start,
                ));
            }
        };

        let value = decode_text(&input[value_start..value_end]).map_err(|err| err.offset(value_start))?;
        attrs.push(Attribute {
            name,
            value,
            position: name_start,
        });
    }

    Ok(attrs)
}

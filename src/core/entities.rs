//! Entity decoding
//!
//! Handles decoding of references in text and attribute values:
//! - Predefined entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! Unknown named entities are kept verbatim. Uses Cow for zero-copy when no
//! references are present.

use super::SyntaxError;
use crate::error::ErrorCode;
use memchr::memchr;
use std::borrow::Cow;

/// Decode references in `input`
///
/// Returns Borrowed if no '&' is present. Error positions are byte offsets
/// into `input`.
#[inline]
pub fn decode_text(input: &str) -> Result<Cow<'_, str>, SyntaxError> {
    // Fast path: check if there are any references using SIMD
    if memchr(b'&', input.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(input));
    }
    decode_references(input).map(Cow::Owned)
}

fn decode_references(input: &str) -> Result<String, SyntaxError> {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(amp_offset) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + amp_offset;
        result.push_str(&input[pos..amp]);

        let Some(semi_offset) = memchr(b';', &bytes[amp..]) else {
            // No terminator, keep the ampersand
            result.push('&');
            pos = amp + 1;
            continue;
        };

        let reference = &input[amp + 1..amp + semi_offset];
        match decode_reference(reference) {
            Reference::Char(c) => {
                result.push(c);
                pos = amp + semi_offset + 1;
            }
            Reference::Unknown => {
                result.push('&');
                pos = amp + 1;
            }
            Reference::Invalid => {
                return Err(SyntaxError::new(
                    ErrorCode::InvalidCharRef,
                    format!("invalid character reference '&{};'", reference),
                    amp,
                ));
            }
        }
    }

    result.push_str(&input[pos..]);
    Ok(result)
}

enum Reference {
    Char(char),
    Unknown,
    Invalid,
}

/// Decode a single reference (without & and ;)
fn decode_reference(reference: &str) -> Reference {
    if let Some(numeric) = reference.strip_prefix('#') {
        return match decode_numeric(numeric) {
            Some(c) => Reference::Char(c),
            None => Reference::Invalid,
        };
    }

    match reference {
        "lt" => Reference::Char('<'),
        "gt" => Reference::Char('>'),
        "amp" => Reference::Char('&'),
        "quot" => Reference::Char('"'),
        "apos" => Reference::Char('\''),
        _ => Reference::Unknown,
    }
}

/// Decode a numeric character reference body (after '#')
fn decode_numeric(digits: &str) -> Option<char> {
    let codepoint = match digits.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()?
        }
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse::<u32>().ok()?
        }
        _ => return None,
    };

    // NUL is not a markup character; surrogates and out-of-range values fail in from_u32
    if codepoint == 0 {
        return None;
    }
    char::from_u32(codepoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_references_borrows() {
        let decoded = decode_text("plain text").unwrap();
        assert!(matches!(decoded, Cow::Borrowed("plain text")));
    }

    #[test]
    fn test_predefined_entities() {
        let decoded = decode_text("&lt;a href=&quot;x&quot;&gt; &amp; &apos;").unwrap();
        assert_eq!(decoded, "<a href=\"x\"> & '");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_text("&#65;&#x42;&#X43;").unwrap(), "ABC");
        assert_eq!(decode_text("caf&#233;").unwrap(), "café");
        assert_eq!(decode_text("&#x1F600;").unwrap(), "\u{1F600}");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(decode_text("&nbsp;x").unwrap(), "&nbsp;x");
    }

    #[test]
    fn test_bare_ampersand_kept() {
        assert_eq!(decode_text("fish & chips").unwrap(), "fish & chips");
    }

    #[test]
    fn test_invalid_numeric_reference() {
        let err = decode_text("ab &#xD800; cd").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCharRef);
        assert_eq!(err.position, 3);

        assert!(decode_text("&#;").is_err());
        assert!(decode_text("&#x;").is_err());
        assert!(decode_text("&#0;").is_err());
        assert!(decode_text("&#12a;").is_err());
        assert!(decode_text("&#x110000;").is_err());
    }
}

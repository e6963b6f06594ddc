//! SIMD-accelerated markup scanning using memchr
//!
//! All delimiters the tokenizer looks for are ASCII, so every offset returned
//! here is also a valid `char` boundary of the UTF-8 text being scanned.

use memchr::{memchr, memchr3, memmem};

/// Byte scanner over a window of buffered markup
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Skip markup whitespace (space, tab, newline, carriage return, form feed)
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !is_whitespace(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Find next occurrence of a byte at or after the current position
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next occurrence of a byte sequence at or after the current position
    #[inline]
    pub fn find_sequence(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.input[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Find the '>' closing a tag, ignoring any inside quoted attribute values
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut pos = self.pos;
        let mut quote: Option<u8> = None;

        while let Some(i) = memchr3(b'>', b'"', b'\'', &self.input[pos..]) {
            let at = pos + i;
            match (quote, self.input[at]) {
                (None, b'>') => return Some(at),
                (None, q) => quote = Some(q),
                (Some(open), q) if open == q => quote = None,
                _ => {}
            }
            pos = at + 1;
        }
        None
    }

    /// Find the '>' closing a `<!...>` declaration
    ///
    /// Skips quoted literals and a bracketed internal subset, so DOCTYPEs
    /// that declare entities or elements are consumed whole.
    pub fn find_declaration_end(&self) -> Option<usize> {
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        for (i, &b) in self.input[self.pos..].iter().enumerate() {
            match (quote, b) {
                (Some(open), q) if open == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => return Some(self.pos + i),
                _ => {}
            }
        }
        None
    }

    /// Read a markup name, returning its length
    ///
    /// Names start with a letter, underscore, colon or non-ASCII character and
    /// continue with letters, digits, hyphens, underscores, periods and colons.
    pub fn read_name(&mut self) -> Option<usize> {
        let start = self.pos;
        if !self.peek().is_some_and(is_name_start_char) {
            return None;
        }
        self.pos += 1;

        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }

        Some(self.pos - start)
    }
}

/// Check if byte is markup whitespace
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// Check if byte is a valid name start character
/// Allows ASCII letters, underscore, colon, and non-ASCII (UTF-8 Unicode)
#[inline]
fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

/// Check if byte is a valid name character
#[inline]
fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}

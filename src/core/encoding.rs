//! Encoding detection and incremental decoding
//!
//! Detects UTF-16 and UTF-8 input by byte order mark or by the byte pattern of
//! a leading '<', then decodes chunk by chunk into UTF-8 text. Sequences split
//! across chunk boundaries are carried over to the next chunk.

use super::SyntaxError;
use crate::error::ErrorCode;

/// Encoding of the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl XmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        match input {
            [0xFF, 0xFE, ..] => XmlEncoding::Utf16Le,
            [0xFE, 0xFF, ..] => XmlEncoding::Utf16Be,
            // No BOM - '<' followed by null or null followed by '<'
            [0x00, b'<', ..] => XmlEncoding::Utf16Be,
            [b'<', 0x00, ..] => XmlEncoding::Utf16Le,
            _ => XmlEncoding::Utf8,
        }
    }

    /// Length of the byte order mark at the start of `input`, if any
    fn bom_len(self, input: &[u8]) -> usize {
        match self {
            XmlEncoding::Utf8 if input.starts_with(&[0xEF, 0xBB, 0xBF]) => 3,
            XmlEncoding::Utf16Le if input.starts_with(&[0xFF, 0xFE]) => 2,
            XmlEncoding::Utf16Be if input.starts_with(&[0xFE, 0xFF]) => 2,
            _ => 0,
        }
    }
}

/// Incremental decoder from raw input bytes to UTF-8 text
///
/// Error positions are always 0; the caller positions encoding errors at the
/// end of the text decoded so far.
#[derive(Debug, Default)]
pub struct Decoder {
    encoding: Option<XmlEncoding>,
    carry: Vec<u8>,
}

/// Bytes needed to tell a UTF-8 BOM from plain text
const DETECT_LEN: usize = 3;

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoding detected so far, `None` until enough bytes were seen
    pub fn encoding(&self) -> Option<XmlEncoding> {
        self.encoding
    }

    /// Decode a chunk, appending complete characters to `out`
    pub fn decode(&mut self, input: &[u8], out: &mut String) -> Result<(), SyntaxError> {
        self.carry.extend_from_slice(input);
        if self.encoding.is_none() && self.carry.len() < DETECT_LEN {
            return Ok(());
        }
        self.drain(out, false)
    }

    /// Decode everything still carried over; the input has ended
    pub fn finish(&mut self, out: &mut String) -> Result<(), SyntaxError> {
        self.drain(out, true)
    }

    fn drain(&mut self, out: &mut String, last: bool) -> Result<(), SyntaxError> {
        let encoding = match self.encoding {
            Some(encoding) => encoding,
            None => {
                let encoding = XmlEncoding::detect(&self.carry);
                let bom = encoding.bom_len(&self.carry);
                self.carry.drain(..bom);
                self.encoding = Some(encoding);
                encoding
            }
        };

        match encoding {
            XmlEncoding::Utf8 => self.drain_utf8(out, last),
            XmlEncoding::Utf16Le => self.drain_utf16(out, last, u16::from_le_bytes),
            XmlEncoding::Utf16Be => self.drain_utf16(out, last, u16::from_be_bytes),
        }
    }

    fn drain_utf8(&mut self, out: &mut String, last: bool) -> Result<(), SyntaxError> {
        let valid = match std::str::from_utf8(&self.carry) {
            Ok(text) => {
                out.push_str(text);
                self.carry.clear();
                return Ok(());
            }
            // Truncated sequence at the end: wait for the next chunk
            Err(err) if err.error_len().is_none() && !last => err.valid_up_to(),
            Err(_) => {
                return Err(SyntaxError::new(ErrorCode::InvalidUtf8, "input is not valid UTF-8", 0));
            }
        };

        let text = std::str::from_utf8(&self.carry[..valid])
            .map_err(|_| SyntaxError::new(ErrorCode::InvalidUtf8, "input is not valid UTF-8", 0))?;
        out.push_str(text);
        self.carry.drain(..valid);
        Ok(())
    }

    fn drain_utf16(
        &mut self,
        out: &mut String,
        last: bool,
        unit: fn([u8; 2]) -> u16,
    ) -> Result<(), SyntaxError> {
        if last && self.carry.len() % 2 != 0 {
            return Err(SyntaxError::new(
                ErrorCode::InvalidUtf16,
                "input is not valid UTF-16: odd number of bytes",
                0,
            ));
        }

        let mut units: Vec<u16> = self
            .carry
            .chunks_exact(2)
            .map(|pair| unit([pair[0], pair[1]]))
            .collect();

        // Keep a trailing high surrogate until its pair arrives
        if !last && units.last().is_some_and(|u| (0xD800..0xDC00).contains(u)) {
            units.pop();
        }

        for decoded in char::decode_utf16(units.iter().copied()) {
            let c = decoded.map_err(|err| {
                SyntaxError::new(
                    ErrorCode::InvalidUtf16,
                    format!("input is not valid UTF-16: unpaired surrogate {:#06x}", err.unpaired_surrogate()),
                    0,
                )
            })?;
            out.push(c);
        }

        self.carry.drain(..units.len() * 2);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_chunks(chunks: &[&[u8]]) -> Result<String, SyntaxError> {
        let mut decoder = Decoder::new();
        let mut out = String::new();
        for chunk in chunks {
            decoder.decode(chunk, &mut out)?;
        }
        decoder.finish(&mut out)?;
        Ok(out)
    }

    #[test]
    fn test_detect_utf8() {
        assert_eq!(XmlEncoding::detect(b"<root/>"), XmlEncoding::Utf8);
        assert_eq!(XmlEncoding::detect(&[0xEF, 0xBB, 0xBF, b'<']), XmlEncoding::Utf8);
        assert_eq!(XmlEncoding::detect(b""), XmlEncoding::Utf8);
    }

    #[test]
    fn test_detect_utf16() {
        assert_eq!(XmlEncoding::detect(&[0xFF, 0xFE, b'<', 0x00]), XmlEncoding::Utf16Le);
        assert_eq!(XmlEncoding::detect(&[0xFE, 0xFF, 0x00, b'<']), XmlEncoding::Utf16Be);
        assert_eq!(XmlEncoding::detect(&[b'<', 0x00]), XmlEncoding::Utf16Le);
        assert_eq!(XmlEncoding::detect(&[0x00, b'<']), XmlEncoding::Utf16Be);
    }

    #[test]
    fn test_utf8_bom_skipped() {
        assert_eq!(decode_chunks(&[&[0xEF, 0xBB, 0xBF], b"<r/>"]).unwrap(), "<r/>");
    }

    #[test]
    fn test_utf8_split_sequence() {
        let bytes = "<p>é€</p>".as_bytes();
        let chunks: Vec<&[u8]> = bytes.chunks(1).collect();
        assert_eq!(decode_chunks(&chunks).unwrap(), "<p>é€</p>");
    }

    #[test]
    fn test_utf8_invalid() {
        let err = decode_chunks(&[b"<p>\xFF</p>"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUtf8);
    }

    #[test]
    fn test_utf8_truncated_at_end() {
        let err = decode_chunks(&[b"<p>\xC3"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUtf8);
    }

    #[test]
    fn test_convert_utf16_le() {
        // "<r/>" in UTF-16 LE with BOM
        let utf16_le = [0xFF, 0xFE, b'<', 0x00, b'r', 0x00, b'/', 0x00, b'>', 0x00];
        let chunks: Vec<&[u8]> = utf16_le.chunks(3).collect();
        assert_eq!(decode_chunks(&chunks).unwrap(), "<r/>");
    }

    #[test]
    fn test_convert_utf16_be_surrogate_pair() {
        // "<😀" in UTF-16 BE with BOM, split inside the pair
        let utf16_be = [0xFE, 0xFF, 0x00, b'<', 0xD8, 0x3D, 0xDE, 0x00];
        assert_eq!(decode_chunks(&[&utf16_be[..6], &utf16_be[6..]]).unwrap(), "<\u{1F600}");
    }

    #[test]
    fn test_utf16_odd_length() {
        let err = decode_chunks(&[&[0xFF, 0xFE, b'<', 0x00, b'r']]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUtf16);
    }

    #[test]
    fn test_short_input() {
        assert_eq!(decode_chunks(&[b"a"]).unwrap(), "a");
        assert_eq!(decode_chunks(&[]).unwrap(), "");
    }
}

//! Buffered, decoding input
//!
//! Reads from any source implementing `Read` in fixed-size chunks, decodes
//! them into UTF-8 text and tracks the line and column of the first
//! unconsumed character.

use crate::core::encoding::{Decoder, XmlEncoding};
use crate::core::SyntaxError;
use log::trace;
use memchr::{memchr_iter, memrchr};
use std::io::{self, Read};

/// Buffer size for reading chunks
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Failure while refilling the buffer
#[derive(Debug)]
pub enum FillError {
    Io(io::Error),
    Decode(SyntaxError),
}

/// Decoded text window over a byte source
pub struct BufferedReader<R> {
    reader: R,
    decoder: Decoder,
    chunk: Vec<u8>,
    text: String,
    pos: usize,
    eof: bool,
    line: usize,
    column: usize,
}

impl<R: Read> BufferedReader<R> {
    /// Create a new buffered reader reading `chunk_size` bytes at a time
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        BufferedReader {
            reader,
            decoder: Decoder::new(),
            chunk: vec![0u8; chunk_size.max(1)],
            text: String::new(),
            pos: 0,
            eof: false,
            line: 1,
            column: 1,
        }
    }

    /// Read and decode the next chunk
    ///
    /// At end of input the decoder is flushed and [`is_final`](Self::is_final)
    /// turns true. The decoded text may not grow if a chunk ends inside a
    /// multi-byte sequence.
    pub fn fill(&mut self) -> Result<(), FillError> {
        if self.eof {
            return Ok(());
        }

        // Compact: drop consumed text
        if self.pos > 0 {
            self.text.drain(..self.pos);
            self.pos = 0;
        }

        let read = loop {
            match self.reader.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(FillError::Io(err)),
            }
        };
        trace!("read {} bytes, {} bytes buffered", read, self.text.len());

        let detected = self.encoding().is_some();
        if read == 0 {
            self.eof = true;
            self.decoder.finish(&mut self.text).map_err(FillError::Decode)?;
        } else {
            self.decoder
                .decode(&self.chunk[..read], &mut self.text)
                .map_err(FillError::Decode)?;
        }
        if !detected {
            if let Some(encoding) = self.encoding() {
                trace!("input encoding is {:?}", encoding);
            }
        }
        Ok(())
    }

    /// Encoding of the source, once enough bytes were read to tell
    #[inline]
    pub fn encoding(&self) -> Option<XmlEncoding> {
        self.decoder.encoding()
    }

    /// Decoded, unconsumed text
    #[inline]
    pub fn available(&self) -> &str {
        &self.text[self.pos..]
    }

    /// Whether the source is exhausted and all of it was decoded
    #[inline]
    pub fn is_final(&self) -> bool {
        self.eof
    }

    /// Consume `n` bytes of available text
    pub fn consume(&mut self, n: usize) {
        let end = (self.pos + n).min(self.text.len());
        (self.line, self.column) = advance(self.line, self.column, &self.text[self.pos..end]);
        self.pos = end;
    }

    /// 1-based line and column of a byte offset into the available text
    pub fn location_at(&self, offset: usize) -> (usize, usize) {
        let end = (self.pos + offset).min(self.text.len());
        match self.text.get(self.pos..end) {
            Some(skipped) => advance(self.line, self.column, skipped),
            None => (self.line, self.column),
        }
    }
}

fn advance(line: usize, column: usize, text: &str) -> (usize, usize) {
    let bytes = text.as_bytes();
    match memrchr(b'\n', bytes) {
        Some(last) => (
            line + memchr_iter(b'\n', bytes).count(),
            1 + text[last + 1..].chars().count(),
        ),
        None => (line, column + text.chars().count()),
    }
}

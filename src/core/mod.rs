//! Core markup parsing primitives
//!
//! This module contains the fundamental building blocks the event reader is
//! made of:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: resumable token extraction from a partially buffered document
//! - Entities: reference decoding with Cow (zero-copy when possible)
//! - Attributes: attribute list parsing
//! - Encoding: BOM detection and incremental UTF-8/UTF-16 decoding

pub mod attributes;
pub mod encoding;
pub mod entities;
pub mod scanner;
pub mod tokenizer;

use crate::error::ErrorCode;

/// Low-level syntax error, positioned as a byte offset into the scanned input
///
/// The reader turns these into [`ParseError`](crate::ParseError)s carrying a
/// line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub code: ErrorCode,
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(code: ErrorCode, message: impl Into<String>, position: usize) -> Self {
        SyntaxError {
            code,
            message: message.into(),
            position,
        }
    }

    /// Shift the position by `by` bytes, for errors found in a sub-slice
    #[inline]
    pub fn offset(mut self, by: usize) -> Self {
        self.position += by;
        self
    }
}

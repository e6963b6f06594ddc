//! Error types
//!
//! Every stage of a pipeline yields `Result<_, Error>`. The first error ends
//! the stream: a stage that forwards or produces an error yields nothing
//! afterwards.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Subsystem that reported a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorDomain {
    /// Markup structure (tags, attributes, references)
    Parser,
    /// Byte-level decoding of the input
    Encoding,
}

/// Specific failure reported by the event reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Markup construct not closed before end of input
    UnterminatedMarkup,
    /// Tag name is missing or starts with an invalid character
    InvalidName,
    /// End tag does not match the innermost open element
    MismatchedTag,
    /// End tag with no open element
    UnexpectedEndTag,
    /// Input ended while elements were still open
    UnclosedElement,
    /// Same attribute name appears twice (case-insensitive)
    DuplicateAttribute,
    /// Attribute name or value could not be parsed
    MalformedAttribute,
    /// Numeric character reference does not name a valid character
    InvalidCharRef,
    /// Input is not valid UTF-8
    InvalidUtf8,
    /// Input is not valid UTF-16
    InvalidUtf16,
}

impl ErrorCode {
    /// Domain this code belongs to
    pub fn domain(self) -> ErrorDomain {
        match self {
            ErrorCode::InvalidUtf8 | ErrorCode::InvalidUtf16 => ErrorDomain::Encoding,
            _ => ErrorDomain::Parser,
        }
    }
}

/// Malformed input, with the position it was detected at
///
/// `line` and `column` are 1-based; `column` counts characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}:{}:{}: {}", .filename.as_deref().unwrap_or("<input>"), .line, .column, .message)]
pub struct ParseError {
    pub domain: ErrorDomain,
    pub code: ErrorCode,
    pub message: String,
    pub filename: Option<String>,
    pub line: usize,
    pub column: usize,
}

/// Terminal error of an event stream
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Raised by a caller-supplied predicate or mapping function
    #[error("callback failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an error returned from a caller-supplied function
    pub fn callback(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Callback(err.into())
    }

    /// The parse error, if this is one
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError {
            domain: ErrorDomain::Parser,
            code: ErrorCode::MismatchedTag,
            message: "expected </a>, found </b>".to_string(),
            filename: Some("doc.xml".to_string()),
            line: 3,
            column: 7,
        };
        assert_eq!(err.to_string(), "doc.xml:3:7: expected </a>, found </b>");
    }

    #[test]
    fn test_parse_error_display_without_filename() {
        let err = ParseError {
            domain: ErrorDomain::Encoding,
            code: ErrorCode::InvalidUtf8,
            message: "invalid UTF-8".to_string(),
            filename: None,
            line: 1,
            column: 1,
        };
        assert_eq!(err.to_string(), "<input>:1:1: invalid UTF-8");
    }

    #[test]
    fn test_code_domain() {
        assert_eq!(ErrorCode::InvalidUtf16.domain(), ErrorDomain::Encoding);
        assert_eq!(ErrorCode::UnclosedElement.domain(), ErrorDomain::Parser);
    }

    #[test]
    fn test_callback_error() {
        let err = Error::callback("no such group");
        assert!(matches!(err, Error::Callback(_)));
        assert_eq!(err.to_string(), "callback failed: no such group");
        assert!(err.as_parse_error().is_none());
    }
}

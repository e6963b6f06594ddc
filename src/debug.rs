//! Compact one-line rendering of event streams
//!
//! Useful in tests and logs to see at a glance what a pipeline produced:
//!
//! ```text
//! plain events:       [p [Hello] p]
//! classified events:  [block [remove:·] [Hello] [collapse:↩︎··] [world] block]
//! with linebreaks:    [block [One] [↩︎] block] [block [Two] block]
//! ```
//!
//! Whitespace is made visible: tab as `⇥`, newline as `↩︎`, anything else as
//! `·`.

use crate::error::Result;
use crate::event::ParsingEvent;
use crate::linebreak::LinebreakParsingEvent;
use crate::whitespace::{WhitespaceParsingEvent, WhitespacePolicy};
use std::fmt::Display;

/// Events that render to a debug token
pub trait DebugToken {
    /// Token for this event, `None` for document events unless `document`
    fn debug_token(&self, document: bool) -> Option<String>;
}

fn event_token<E>(event: &ParsingEvent<E>, label: impl FnOnce(&E) -> String, document: bool) -> Option<String> {
    match event {
        ParsingEvent::Begin(element, _) => Some(format!("[{}", label(element))),
        ParsingEvent::End(element) => Some(format!("{}]", label(element))),
        ParsingEvent::Text(text) => Some(format!("[{}]", text)),
        ParsingEvent::BeginDocument => document.then(|| "[document".to_string()),
        ParsingEvent::EndDocument => document.then(|| "document]".to_string()),
    }
}

impl<E: Display> DebugToken for ParsingEvent<E> {
    fn debug_token(&self, document: bool) -> Option<String> {
        event_token(self, |element| element.to_string(), document)
    }
}

impl<E> DebugToken for WhitespaceParsingEvent<E> {
    fn debug_token(&self, document: bool) -> Option<String> {
        match self {
            WhitespaceParsingEvent::Event(event, policy) => policy_token(event, *policy, document),
            WhitespaceParsingEvent::Whitespace(run, processing) => {
                Some(format!("[{}:{}]", processing, visible(run)))
            }
        }
    }
}

impl<E> DebugToken for LinebreakParsingEvent<E> {
    fn debug_token(&self, document: bool) -> Option<String> {
        match self {
            LinebreakParsingEvent::Event(event, policy) => policy_token(event, *policy, document),
            LinebreakParsingEvent::Whitespace(run, processing) => {
                Some(format!("[{}:{}]", processing, visible(run)))
            }
            LinebreakParsingEvent::Linebreak(separator) => Some(format!("[{}]", visible(separator))),
        }
    }
}

/// Elements of classified streams are labeled with their policy
fn policy_token<E>(event: &ParsingEvent<E>, policy: WhitespacePolicy, document: bool) -> Option<String> {
    event_token(event, |_| policy.to_string(), document)
}

/// Replace whitespace with visible markers
pub fn visible(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push('⇥'),
            '\n' => out.push_str("↩\u{fe0e}"),
            c if c.is_ascii_whitespace() => out.push('·'),
            c => out.push(c),
        }
    }
    out
}

/// Renders a whole stream as space-separated tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugFormatter {
    document: bool,
}

impl DebugFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also render document begin and end
    pub fn with_document_events(mut self) -> Self {
        self.document = true;
        self
    }

    /// Render every event, stopping at the first error
    pub fn format<I, T>(&self, events: I) -> Result<String>
    where
        I: IntoIterator<Item = Result<T>>,
        T: DebugToken,
    {
        let mut tokens = Vec::new();
        for event in events {
            if let Some(token) = event?.debug_token(self.document) {
                tokens.push(token);
            }
        }
        Ok(tokens.join(" "))
    }
}

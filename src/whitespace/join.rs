//! Merging adjacent text events

use crate::error::Result;
use crate::event::ParsingEvent;

/// Merges runs of consecutive text events into one and drops empty text
///
/// On an upstream error, buffered text is discarded and the error forwarded.
pub struct JoinText<I, E> {
    upstream: I,
    text: Option<String>,
    held: Option<ParsingEvent<E>>,
    done: bool,
}

impl<I, E> JoinText<I, E> {
    pub fn new(upstream: I) -> Self {
        JoinText {
            upstream,
            text: None,
            held: None,
            done: false,
        }
    }
}

impl<I, E> Iterator for JoinText<I, E>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
{
    type Item = Result<ParsingEvent<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.held.take() {
            return Some(Ok(event));
        }
        if self.done {
            return None;
        }

        loop {
            match self.upstream.next() {
                Some(Ok(ParsingEvent::Text(text))) => {
                    if !text.is_empty() {
                        match &mut self.text {
                            Some(buffer) => buffer.push_str(&text),
                            None => self.text = Some(text),
                        }
                    }
                }
                Some(Ok(event)) => match self.text.take() {
                    Some(text) => {
                        self.held = Some(event);
                        return Some(Ok(ParsingEvent::Text(text)));
                    }
                    None => return Some(Ok(event)),
                },
                Some(Err(err)) => {
                    self.done = true;
                    self.text = None;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    return self.text.take().map(|text| Ok(ParsingEvent::Text(text)));
                }
            }
        }
    }
}

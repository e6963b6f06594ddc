//! Splitting text into text and whitespace segments
//!
//! A whitespace run is a maximal sequence of markup whitespace (space, tab,
//! newline, carriage return, form feed). Runs at the edges of the text and
//! interior runs longer than one character become separate segments; a lone
//! interior space is already collapsed and stays inside its text segment.
//!
//! ```text
//! "  Art    Deco is "
//!  ^^                 Start
//!    ^^^              Text("Art")
//!       ^^^^          Between
//!           ^^^^^^^   Text("Deco is")
//!                  ^  End
//! ```

use crate::core::scanner::is_whitespace;

/// Where a whitespace run sits within its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Leading run, text follows
    Start,
    /// Interior run between two text segments
    Between,
    /// Trailing run, text precedes
    End,
    /// The whole text is whitespace
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Whitespace(&'a str, Location),
}

/// Iterator over the segments of a text
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    pub fn new(text: &'a str) -> Self {
        Segments { text, pos: 0 }
    }

    fn whitespace_len(&self, from: usize) -> usize {
        self.text.as_bytes()[from..]
            .iter()
            .take_while(|&&b| is_whitespace(b))
            .count()
    }

    fn next_whitespace(&self, from: usize) -> Option<usize> {
        self.text.as_bytes()[from..]
            .iter()
            .position(|&b| is_whitespace(b))
            .map(|i| from + i)
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let len = self.text.len();
        if self.pos >= len {
            return None;
        }

        let start = self.pos;
        let run = self.whitespace_len(start);
        if run > 0 {
            self.pos += run;
            let location = match (start == 0, self.pos == len) {
                (true, true) => Location::Single,
                (true, false) => Location::Start,
                (false, true) => Location::End,
                (false, false) => Location::Between,
            };
            return Some(Segment::Whitespace(&self.text[start..self.pos], location));
        }

        let mut end = start;
        loop {
            let Some(ws) = self.next_whitespace(end) else {
                end = len;
                break;
            };
            let run = self.whitespace_len(ws);
            if run == 1 && self.text.as_bytes()[ws] == b' ' && ws + 1 < len {
                end = ws + 1;
            } else {
                end = ws;
                break;
            }
        }

        self.pos = end;
        Some(Segment::Text(&self.text[start..end]))
    }
}

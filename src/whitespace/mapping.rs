//! Whitespace classification stage

use super::classify::Classifier;
use super::join::JoinText;
use super::policy::{PolicyStack, WhitespacePolicy, WhitespaceProcessing};
use super::segment::{Segment, Segments};
use super::WhitespaceParsingEvent;
use crate::error::Result;
use crate::event::{Attributes, ParsingEvent};
use std::collections::VecDeque;

/// Tags events with their whitespace policy and splits text into text and
/// classified whitespace runs
///
/// Output order equals input order. Events that arrive while a whitespace
/// run awaits its decision are held behind it and released together with it.
pub struct MapWhitespace<I, E, F> {
    upstream: JoinText<I, E>,
    policy: F,
    stack: PolicyStack,
    classifier: Classifier,
    /// Decided events, in output order
    ready: VecDeque<WhitespaceParsingEvent<E>>,
    /// Events behind the pending run
    deferred: Vec<WhitespaceParsingEvent<E>>,
    done: bool,
}

impl<I, E, F> MapWhitespace<I, E, F>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
    F: FnMut(&E, &Attributes) -> WhitespacePolicy,
{
    pub fn new(upstream: I, policy: F) -> Self {
        MapWhitespace {
            upstream: JoinText::new(upstream),
            policy,
            stack: PolicyStack::new(),
            classifier: Classifier::new(),
            ready: VecDeque::new(),
            deferred: Vec::new(),
            done: false,
        }
    }

    fn emit(&mut self, event: WhitespaceParsingEvent<E>) {
        if self.classifier.is_pending() {
            self.deferred.push(event);
        } else {
            self.ready.push_back(event);
        }
    }

    /// Emit the decided run followed by everything held behind it
    fn release(&mut self, run: String, processing: WhitespaceProcessing) {
        self.ready.push_back(WhitespaceParsingEvent::Whitespace(run, processing));
        self.ready.extend(self.deferred.drain(..));
    }

    fn boundary(&mut self, event: ParsingEvent<E>, policy: WhitespacePolicy) {
        if let Some(run) = self.classifier.boundary(policy) {
            self.release(run, WhitespaceProcessing::Remove);
        }
        self.emit(WhitespaceParsingEvent::Event(event, policy));
    }

    fn text(&mut self, text: String) {
        let policy = self.stack.current();
        if policy == WhitespacePolicy::Preserve {
            if let Some(run) = self.classifier.text() {
                self.release(run, WhitespaceProcessing::Collapse);
            }
            self.emit(WhitespaceParsingEvent::Event(ParsingEvent::Text(text), policy));
            return;
        }

        for segment in Segments::new(&text) {
            match segment {
                Segment::Text(part) => {
                    if let Some(run) = self.classifier.text() {
                        self.release(run, WhitespaceProcessing::Collapse);
                    }
                    self.emit(WhitespaceParsingEvent::Event(ParsingEvent::Text(part.to_string()), policy));
                }
                Segment::Whitespace(run, location) => {
                    if let Some(processing) = self.classifier.whitespace(run, location) {
                        self.emit(WhitespaceParsingEvent::Whitespace(run.to_string(), processing));
                    }
                }
            }
        }
    }

    fn process(&mut self, event: ParsingEvent<E>) {
        match event {
            ParsingEvent::Begin(element, attributes) => {
                let declared = (self.policy)(&element, &attributes);
                let policy = self.stack.push(declared);
                self.boundary(ParsingEvent::Begin(element, attributes), policy);
            }
            ParsingEvent::End(element) => {
                let policy = self.stack.pop();
                self.boundary(ParsingEvent::End(element), policy);
            }
            ParsingEvent::Text(text) => self.text(text),
            event @ (ParsingEvent::BeginDocument | ParsingEvent::EndDocument) => {
                self.boundary(event, WhitespacePolicy::Block);
            }
        }
    }

    fn finish(&mut self) {
        if let Some(run) = self.classifier.finish() {
            self.release(run, WhitespaceProcessing::Remove);
        }
    }
}

impl<I, E, F> Iterator for MapWhitespace<I, E, F>
where
    I: Iterator<Item = Result<ParsingEvent<E>>>,
    F: FnMut(&E, &Attributes) -> WhitespacePolicy,
{
    type Item = Result<WhitespaceParsingEvent<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Some(Ok(event));
            }
            if self.done {
                return None;
            }

            match self.upstream.next() {
                Some(Ok(event)) => self.process(event),
                Some(Err(err)) => {
                    self.done = true;
                    self.deferred.clear();
                    self.classifier = Classifier::new();
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    self.finish();
                }
            }
        }
    }
}

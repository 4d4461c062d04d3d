//! Streaming decoder for `:streamGenerateContent`.
//!
//! The local server frames its output as newline-terminated records. Only
//! records of the form `data: <json>` carry output, where `<json>` is a
//! one-element array wrapping a [`GenerationEvent`]:
//!
//! ```text
//! data: [{"candidates":[{"content":{"role":"model","parts":[{"text":"Hel"}]},"index":0}]}]
//!
//! data: [{"candidates":[{"content":{"role":"model","parts":[{"text":"lo"}]},"finishReason":"STOP","index":0}]}]
//! ```
//!
//! Everything else (blank lines, `event:` lines, comments, keep-alives) is
//! ignored. A malformed record is logged and skipped; only a transport failure
//! ends the stream early.

use bytes::Bytes;
use contentgen_types::{EventStream, GenerationEvent, Operation, ProviderError};
use futures::{Stream, StreamExt};

/// Prefix marking a record that carries an event.
pub const DATA_PREFIX: &str = "data: ";

/// Accumulator of bytes received but not yet framed into a complete line.
///
/// Framing works on raw bytes: `\n` never occurs inside a multi-byte UTF-8
/// sequence, so a character split across two chunks is whole again by the
/// time its line is decoded.
#[derive(Debug, Default)]
pub struct DecodeBuffer {
    pending: Vec<u8>,
}

impl DecodeBuffer {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk received from the transport.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Remove and return the next complete line, without its terminator.
    ///
    /// Returns `None` when no newline is buffered; the partial line stays put.
    pub fn next_line(&mut self) -> Option<String> {
        let newline_pos = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=newline_pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Bytes of the unterminated trailing line.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Whether no unframed bytes remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Why a data record produced no event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The payload is not valid JSON.
    InvalidJson(String),
    /// The payload is valid JSON but not an array.
    NotAnArray,
    /// The payload is an empty array.
    EmptyArray,
    /// The first array element does not have the shape of an event.
    InvalidEvent(String),
}

/// Result of examining one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The line carried an event.
    Event {
        /// The first element of the payload array.
        event: GenerationEvent,
        /// Number of further array elements that were dropped.
        discarded: usize,
    },
    /// Not a data line.
    Ignored,
    /// A data line that yielded nothing.
    Skipped(SkipReason),
}

/// Classify one complete line.
#[must_use]
pub fn parse_record(line: &str) -> LineOutcome {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return LineOutcome::Ignored;
    };

    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(e) => return LineOutcome::Skipped(SkipReason::InvalidJson(e.to_string())),
    };

    let serde_json::Value::Array(mut elements) = value else {
        return LineOutcome::Skipped(SkipReason::NotAnArray);
    };
    if elements.is_empty() {
        return LineOutcome::Skipped(SkipReason::EmptyArray);
    }

    let discarded = elements.len() - 1;
    let first = elements.swap_remove(0);
    match serde_json::from_value(first) {
        Ok(event) => LineOutcome::Event { event, discarded },
        Err(e) => LineOutcome::Skipped(SkipReason::InvalidEvent(e.to_string())),
    }
}

/// Decode a byte stream into an [`EventStream`].
///
/// Every complete line in a chunk is processed before the next chunk is
/// pulled, so events come out in arrival order and reading is driven by the
/// consumer. The first transport error is yielded once, wrapped for
/// [`Operation::GenerateContentStream`], and ends the stream. Bytes after the
/// last newline are discarded when the transport ends.
pub fn decode_event_stream<S>(byte_stream: S) -> EventStream
where
    S: Stream<Item = Result<Bytes, ProviderError>> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut bytes_stream = std::pin::pin!(byte_stream);
        let mut buffer = DecodeBuffer::new();
        let mut emitted = 0usize;

        while let Some(chunk_result) = bytes_stream.next().await {
            let chunk = match chunk_result {
                Ok(b) => b,
                Err(e) => {
                    tracing::debug!(error = %e, emitted, "stream transport failed");
                    yield Err(e.during(Operation::GenerateContentStream));
                    return;
                }
            };

            buffer.extend(&chunk);

            while let Some(line) = buffer.next_line() {
                match parse_record(&line) {
                    LineOutcome::Event { event, discarded } => {
                        if discarded > 0 {
                            tracing::warn!(
                                discarded,
                                "stream record held more than one element; using the first"
                            );
                        }
                        emitted += 1;
                        yield Ok(event);
                    }
                    LineOutcome::Ignored => {
                        tracing::trace!(line = %line, "ignoring non-data line");
                    }
                    LineOutcome::Skipped(reason) => {
                        tracing::warn!(?reason, "skipping malformed stream record");
                    }
                }
            }
        }

        if !buffer.is_empty() {
            tracing::debug!(
                bytes = buffer.pending().len(),
                "discarding unterminated trailing record"
            );
        }
        tracing::debug!(emitted, "stream finished");
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! Streaming output type.

use std::pin::Pin;

use futures::Stream;

use crate::error::GenerationError;
use crate::types::GenerationEvent;

/// A lazily-produced, finite sequence of generation events.
///
/// Consume with `StreamExt::next()`. The stream ends after the transport ends,
/// or after yielding a single `Err`. Dropping it stops further reads and
/// releases the underlying connection.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<GenerationEvent, GenerationError>> + Send>>;

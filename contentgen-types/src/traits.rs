//! The content-generation capability contract.

use std::future::Future;

use crate::error::GenerationError;
use crate::stream::EventStream;
use crate::types::{
    CountTokensRequest, CountTokensResponse, EmbedContentRequest, EmbedContentResponse,
    GenerationEvent, GenerationRequest,
};

/// A content-generation backend.
///
/// Implemented by every backend (remote provider or local model server), so
/// callers written against `<G: ContentGenerator>` can switch backends without
/// code changes.
///
/// Uses RPITIT (return position impl trait in trait), so it is not
/// object-safe; compose with generics.
///
/// # Example
///
/// ```no_run
/// # use contentgen_types::{ContentGenerator, GenerationRequest};
/// async fn summarize<G: ContentGenerator>(generator: &G, text: &str) -> Option<String> {
///     let request = GenerationRequest::text(format!("Summarize: {text}"));
///     generator.generate(&request).await.ok()?.text()
/// }
/// ```
pub trait ContentGenerator: Send + Sync {
    /// Generate a complete response in one round trip.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationEvent, GenerationError>> + Send;

    /// Generate a response as a stream of incremental events.
    ///
    /// Failures while opening the stream are returned directly; failures while
    /// reading surface as the final item of the stream.
    fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<EventStream, GenerationError>> + Send;

    /// Count the tokens in `request`.
    fn count_tokens(
        &self,
        request: &CountTokensRequest,
    ) -> impl Future<Output = Result<CountTokensResponse, GenerationError>> + Send;

    /// Embed each content in `request`.
    fn embed_content(
        &self,
        request: &EmbedContentRequest,
    ) -> impl Future<Output = Result<EmbedContentResponse, GenerationError>> + Send;
}

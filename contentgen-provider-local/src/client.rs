//! Local model client struct, builder, and [`ContentGenerator`] impl.

use std::future::Future;
use std::time::Duration;

use contentgen_types::{
    ContentGenerator, CountTokensRequest, CountTokensResponse, EmbedContentRequest,
    EmbedContentResponse, EventStream, GenerationError, GenerationEvent, GenerationRequest,
    Operation, ProviderError,
};
use futures::TryStreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::config::{ConfigError, Endpoint, EndpointSource, LocalConfig, Mode};
use crate::error::{map_http_status, map_reqwest_error};
use crate::mapping::to_api_request;
use crate::streaming::decode_event_stream;

/// Client for a locally hosted generateContent-compatible server.
///
/// Implements [`ContentGenerator`], so it can stand in for any remote backend.
/// The server is assumed reachable and unauthenticated.
///
/// # Example
///
/// ```no_run
/// use contentgen_provider_local::LocalModel;
///
/// let client = LocalModel::new()
///     .model("gemma-2b")
///     .base_url("http://localhost:8080/v1beta");
/// ```
pub struct LocalModel<S = LocalConfig> {
    /// Where the base URL and model come from.
    pub(crate) source: S,
    /// Deadline for single-shot calls.
    pub(crate) timeout: Duration,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl LocalModel {
    /// Create a client with default configuration.
    ///
    /// Default base URL: `http://localhost:8080/v1beta`.
    /// Default model: `local-model`.
    /// Default timeout: 60 s.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LocalConfig::default())
    }

    /// Create a client from explicit configuration.
    #[must_use]
    pub fn from_config(config: LocalConfig) -> Self {
        Self {
            timeout: config.timeout,
            source: config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client configured from the environment.
    ///
    /// See [`LocalConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_config(LocalConfig::from_env()?))
    }

    /// Override the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.source.base_url = url.into();
        self
    }

    /// Override the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.source.model = model.into();
        self
    }
}

impl Default for LocalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EndpointSource> LocalModel<S> {
    /// Create a client that resolves its endpoint from `source` on every call.
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            timeout: crate::config::DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Override the single-shot timeout. Streaming calls are unaffected.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, ...).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Resolve the endpoint for `mode` from the current configuration.
    #[must_use]
    pub fn endpoint(&self, mode: Mode) -> Endpoint {
        Endpoint::resolve(&self.source, mode)
    }

    /// POST the request body to `endpoint`, failing on a non-success status.
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &GenerationRequest,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, ProviderError> {
        let url = endpoint.url();
        tracing::debug!(
            url = %url,
            model = %endpoint.model,
            mode = ?endpoint.mode,
            "sending request to local model"
        );

        let mut builder = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&to_api_request(request));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "local model returned error status");
            return Err(map_http_status(status));
        }
        Ok(response)
    }

    async fn generate_once(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationEvent, ProviderError> {
        let endpoint = self.endpoint(Mode::SingleShot);
        let response = self.send(&endpoint, request, Some(self.timeout)).await?;
        let body = response.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode(format!("invalid JSON response: {e}")))
    }

    async fn open_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<EventStream, ProviderError> {
        let endpoint = self.endpoint(Mode::Streaming);
        let response = self.send(&endpoint, request, None).await?;
        tracing::debug!(model = %endpoint.model, "stream opened");
        Ok(decode_event_stream(
            response.bytes_stream().map_err(map_reqwest_error),
        ))
    }
}

impl<S: EndpointSource> ContentGenerator for LocalModel<S> {
    /// POST to `:generateContent` and parse the whole body as one event.
    ///
    /// Enforces the configured timeout over the full round trip, body
    /// included. A non-success status fails before the body is read.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationEvent, GenerationError>> + Send {
        async move {
            self.generate_once(request)
                .await
                .map_err(|e| e.during(Operation::GenerateContent))
        }
    }

    /// POST to `:streamGenerateContent` and decode the body incrementally.
    ///
    /// No deadline applies; a server that stalls without closing the
    /// connection stalls the consumer too. Drop the stream to abandon it.
    fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<EventStream, GenerationError>> + Send {
        async move {
            self.open_stream(request)
                .await
                .map_err(|e| e.during(Operation::GenerateContentStream))
        }
    }

    /// Always fails: the local server cannot count tokens.
    fn count_tokens(
        &self,
        _request: &CountTokensRequest,
    ) -> impl Future<Output = Result<CountTokensResponse, GenerationError>> + Send {
        std::future::ready(Err(unsupported(Operation::CountTokens)))
    }

    /// Always fails: the local server cannot embed.
    fn embed_content(
        &self,
        _request: &EmbedContentRequest,
    ) -> impl Future<Output = Result<EmbedContentResponse, GenerationError>> + Send {
        std::future::ready(Err(unsupported(Operation::EmbedContent)))
    }
}

fn unsupported(operation: Operation) -> GenerationError {
    ProviderError::NotSupported(operation).during(operation)
}

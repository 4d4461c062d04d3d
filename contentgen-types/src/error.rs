//! Error types for content generation.
//!
//! [`ProviderError`] classifies what went wrong. [`GenerationError`] is the
//! single shape callers see: it names the failing [`Operation`] and embeds
//! the cause's message, so matching on the operation prefix is stable while
//! the root cause stays visible.

use std::fmt;

/// A caller-facing content-generation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Single-shot generation.
    GenerateContent,
    /// Streaming generation.
    GenerateContentStream,
    /// Token counting.
    CountTokens,
    /// Embedding.
    EmbedContent,
}

impl Operation {
    /// Human-readable operation name used as the error prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateContent => "content generation",
            Self::GenerateContentStream => "content generation stream",
            Self::CountTokens => "token counting",
            Self::EmbedContent => "embedding",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from a content-generation backend.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    // Retryable errors
    /// Connection or timeout failure before a usable response existed.
    #[error("transport error: {reason}")]
    Transport {
        /// Short description (`"timeout"` for deadline expiry).
        reason: String,
        /// Underlying transport error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// Well-formed response with a non-success status.
    #[error("HTTP {status} {status_text}")]
    HttpStatus {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    // Terminal errors
    /// Response bytes were not valid JSON of the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// The backend permanently lacks this capability.
    #[error("{0} is not supported by this backend")]
    NotSupported(Operation),
}

impl ProviderError {
    /// Build a [`ProviderError::Transport`] from an underlying error.
    pub fn transport(
        reason: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// A transport timeout.
    #[must_use]
    pub fn timeout() -> Self {
        Self::Transport {
            reason: "timeout".into(),
            source: None,
        }
    }

    /// Whether this error is likely transient and the request can be retried.
    ///
    /// Retry policy itself is left to the caller.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::HttpStatus { status, .. } => (500..=599).contains(status),
            Self::Decode(_) | Self::NotSupported(_) => false,
        }
    }

    /// Wrap this cause in the outer error for `operation`.
    #[must_use]
    pub fn during(self, operation: Operation) -> GenerationError {
        GenerationError {
            operation,
            source: self,
        }
    }
}

/// The outer error returned by every [`ContentGenerator`](crate::ContentGenerator) operation.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed: {source}")]
pub struct GenerationError {
    operation: Operation,
    #[source]
    source: ProviderError,
}

impl GenerationError {
    /// The operation that failed.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The underlying cause.
    #[must_use]
    pub fn cause(&self) -> &ProviderError {
        &self.source
    }

    /// Consume the error and return the underlying cause.
    #[must_use]
    pub fn into_cause(self) -> ProviderError {
        self.source
    }

    /// Whether the failure is a permanent capability gap.
    ///
    /// Callers must never retry these.
    #[must_use]
    pub fn is_not_supported(&self) -> bool {
        matches!(self.source, ProviderError::NotSupported(_))
    }

    /// Whether the underlying cause is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}

//! Request and response types for the generateContent family of endpoints.
//!
//! Field names follow the wire format (camelCase). Optional fields the caller
//! leaves unset are skipped on serialization rather than defaulted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Role of the model in a [`Content`].
pub const ROLE_MODEL: &str = "model";

/// Role of the caller in a [`Content`].
pub const ROLE_USER: &str = "user";

/// Role-tagged sequence of parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Producer of the content (`"user"` or `"model"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts. An explicit `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn containing a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(ROLE_USER.into()),
            parts: vec![Part::text(text)],
        }
    }

    /// A model turn containing a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Some(ROLE_MODEL.into()),
            parts: vec![Part::text(text)],
        }
    }
}

/// One piece of a [`Content`].
///
/// The service may set any one of the typed members; members this crate does
/// not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    /// A function call predicted by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    /// The result of a function call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    /// Whether this part is model reasoning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
    /// Unmodelled members, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Inline media bytes (base64).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// IANA media type.
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// A function call predicted by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name.
    pub name: String,
    /// Arguments as a JSON object.
    #[serde(default)]
    pub args: Value,
}

/// The result of executing a [`FunctionCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Function name.
    pub name: String,
    /// Function output as a JSON object.
    pub response: Value,
}

/// A safety constraint applied by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    /// Harm category, e.g. `HARM_CATEGORY_HARASSMENT`.
    pub category: String,
    /// Block threshold, e.g. `BLOCK_ONLY_HIGH`.
    pub threshold: String,
}

/// Sampling controls. Every field is optional and omitted when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus sampling probability mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Top-k sampling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Number of candidates to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<u32>,
    /// Maximum output length in tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Sequences that stop generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// A content-generation request.
///
/// Construct once and hand to a [`ContentGenerator`](crate::ContentGenerator);
/// the generator only borrows it to shape the request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    /// Prompt content, oldest turn first.
    pub contents: Vec<Content>,
    /// Safety constraints, omitted from the body when `None`.
    pub safety_settings: Option<Vec<SafetySetting>>,
    /// Sampling controls.
    pub config: GenerationConfig,
}

impl GenerationRequest {
    /// A request with a single user text turn and no sampling controls.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            ..Default::default()
        }
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set nucleus sampling.
    #[must_use]
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.config.top_p = Some(top_p);
        self
    }

    /// Set top-k sampling.
    #[must_use]
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.config.top_k = Some(top_k);
        self
    }

    /// Set the number of candidates.
    #[must_use]
    pub fn candidate_count(mut self, count: u32) -> Self {
        self.config.candidate_count = Some(count);
        self
    }

    /// Set the maximum output length.
    #[must_use]
    pub fn max_output_tokens(mut self, max: u32) -> Self {
        self.config.max_output_tokens = Some(max);
        self
    }

    /// Set stop sequences.
    #[must_use]
    pub fn stop_sequences<I, S>(mut self, sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.stop_sequences = Some(sequences.into_iter().map(Into::into).collect());
        self
    }

    /// Set safety constraints.
    #[must_use]
    pub fn safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = Some(settings);
        self
    }
}

/// One decoded unit of model output.
///
/// Single-shot calls return one event holding the whole response; streaming
/// calls yield one event per record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationEvent {
    /// Candidate completions, as sent. `None` when the member was absent or
    /// `null`; see [`GenerationEvent::candidates`] for a slice view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    /// Feedback about the prompt (e.g. block reason).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<Value>,
    /// Model version that produced the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    /// Unmodelled members, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerationEvent {
    /// Candidate completions, empty when none were sent.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        self.candidates.as_deref().unwrap_or_default()
    }

    /// Concatenated text of the first candidate's non-thought parts.
    ///
    /// Returns `None` when there is no candidate or it has no text.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates().first()?;
        let content = candidate.content.as_ref()?;
        let mut text = String::new();
        let mut found = false;
        for part in &content.parts {
            if part.thought == Some(true) {
                continue;
            }
            if let Some(t) = &part.text {
                text.push_str(t);
                found = true;
            }
        }
        found.then_some(text)
    }

    /// Finish reason of the first candidate, if reported.
    #[must_use]
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates().first()?.finish_reason.as_deref()
    }
}

/// One candidate completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped (e.g. `"STOP"`, `"MAX_TOKENS"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Position among the returned candidates, as reported by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    /// Per-category safety ratings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<Value>>,
    /// Unmodelled members, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Token counting ---

/// A token-counting request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountTokensRequest {
    /// Content to count.
    pub contents: Vec<Content>,
}

/// Result of a token count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    /// Total tokens in the counted content.
    pub total_tokens: u64,
}

// --- Embedding ---

/// An embedding request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedContentRequest {
    /// Content to embed, one vector per entry.
    pub contents: Vec<Content>,
}

/// Embedding vectors, one per requested content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedContentResponse {
    /// The vectors.
    pub embeddings: Vec<Vec<f32>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

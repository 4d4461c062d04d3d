//! Wire body for `:generateContent` and `:streamGenerateContent`.
//!
//! ```text
//! {
//!   "contents": [{"role": "user", "parts": [{"text": "Hello"}]}],
//!   "safetySettings": [{"category": "...", "threshold": "..."}],
//!   "generationConfig": {"temperature": 0.2, "maxOutputTokens": 256}
//! }
//! ```
//!
//! `generationConfig` is always present; its members and `safetySettings` are
//! omitted when the caller left them unset.

use contentgen_types::{Content, GenerationConfig, SafetySetting};
use serde::Serialize;

/// Request body, borrowed from a [`GenerationRequest`](contentgen_types::GenerationRequest).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest<'a> {
    /// Prompt content.
    pub contents: &'a [Content],
    /// Safety constraints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<&'a [SafetySetting]>,
    /// Sampling controls.
    pub generation_config: &'a GenerationConfig,
}

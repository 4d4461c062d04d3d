//! Backend substitution tests.
//!
//! Callers written against `ContentGenerator` must behave the same whichever
//! backend they are handed. The live smoke test needs a local server:
//! ```bash
//! LOCAL_MODEL_BASE_URL=http://localhost:8080/v1beta cargo test --test substitution -- --ignored
//! ```

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use contentgen_provider_local::LocalModel;
use contentgen_types::{
    Candidate, Content, ContentGenerator, CountTokensRequest, CountTokensResponse,
    EmbedContentRequest, EmbedContentResponse, EventStream, GenerationError, GenerationEvent,
    GenerationRequest, Operation, ProviderError,
};
use futures::StreamExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// In-memory backend that replays scripted text chunks.
struct ScriptedGenerator {
    chunks: Mutex<VecDeque<Vec<&'static str>>>,
}

impl ScriptedGenerator {
    fn new(scripts: Vec<Vec<&'static str>>) -> Self {
        Self {
            chunks: Mutex::new(scripts.into()),
        }
    }

    fn next_script(&self) -> Vec<&'static str> {
        self.chunks
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_default()
    }
}

fn text_event(text: &str) -> GenerationEvent {
    GenerationEvent {
        candidates: Some(vec![Candidate {
            content: Some(Content::model(text)),
            index: Some(0),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

impl ContentGenerator for ScriptedGenerator {
    fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationEvent, GenerationError>> + Send {
        let text = self.next_script().concat();
        async move { Ok(text_event(&text)) }
    }

    fn generate_stream(
        &self,
        _request: &GenerationRequest,
    ) -> impl Future<Output = Result<EventStream, GenerationError>> + Send {
        let events: Vec<_> = self
            .next_script()
            .into_iter()
            .map(|t| Ok(text_event(t)))
            .collect();
        async move { Ok(Box::pin(futures::stream::iter(events)) as EventStream) }
    }

    fn count_tokens(
        &self,
        request: &CountTokensRequest,
    ) -> impl Future<Output = Result<CountTokensResponse, GenerationError>> + Send {
        let total_tokens = request.contents.iter().map(|c| c.parts.len() as u64).sum();
        async move { Ok(CountTokensResponse { total_tokens }) }
    }

    fn embed_content(
        &self,
        _request: &EmbedContentRequest,
    ) -> impl Future<Output = Result<EmbedContentResponse, GenerationError>> + Send {
        async {
            Err(ProviderError::NotSupported(Operation::EmbedContent)
                .during(Operation::EmbedContent))
        }
    }
}

/// Caller code that only knows the capability contract.
async fn stream_to_string<G: ContentGenerator>(
    generator: &G,
    prompt: &str,
) -> Result<String, GenerationError> {
    let mut stream = generator
        .generate_stream(&GenerationRequest::text(prompt))
        .await?;
    let mut out = String::new();
    while let Some(event) = stream.next().await {
        if let Some(text) = event?.text() {
            out.push_str(&text);
        }
    }
    Ok(out)
}

async fn generate_text<G: ContentGenerator>(
    generator: &G,
    prompt: &str,
) -> Result<Option<String>, GenerationError> {
    Ok(generator
        .generate(&GenerationRequest::text(prompt))
        .await?
        .text())
}

fn sse_body(chunks: &[&str]) -> String {
    chunks
        .iter()
        .map(|t| {
            format!(
                "data: {}\n\n",
                serde_json::json!([{"candidates": [{"content": {"role": "model", "parts": [{"text": t}]}, "index": 0}]}])
            )
        })
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn same_caller_works_with_scripted_and_local_backends() {
    let script = vec!["The ", "sea ", "is calm."];

    let scripted = ScriptedGenerator::new(vec![script.clone()]);
    let from_scripted = stream_to_string(&scripted, "haiku").await.expect("scripted");

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/local-model:streamGenerateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sse_body(&script)))
        .expect(1)
        .mount(&mock_server)
        .await;
    let local = LocalModel::new().base_url(mock_server.uri());
    let from_local = stream_to_string(&local, "haiku").await.expect("local");

    assert_eq!(from_scripted, "The sea is calm.");
    assert_eq!(from_local, from_scripted);
}

#[tokio::test]
async fn single_shot_is_interchangeable() {
    let scripted = ScriptedGenerator::new(vec![vec!["Hello"]]);

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/local-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Hello"}]}, "index": 0}]
        })))
        .mount(&mock_server)
        .await;
    let local = LocalModel::new().base_url(mock_server.uri());

    assert_eq!(
        generate_text(&scripted, "hi").await.expect("scripted"),
        generate_text(&local, "hi").await.expect("local")
    );
}

#[tokio::test]
async fn capability_gaps_surface_as_not_supported() {
    let local = LocalModel::new();
    let err = local
        .count_tokens(&CountTokensRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_not_supported());

    // A backend that can count is used through the same call.
    let scripted = ScriptedGenerator::new(vec![]);
    let counted = scripted
        .count_tokens(&CountTokensRequest {
            contents: vec![Content::user("a"), Content::user("b")],
        })
        .await
        .expect("scripted counts");
    assert_eq!(counted.total_tokens, 2);
}

#[tokio::test]
#[ignore]
async fn live_local_server_streams_text() {
    let local = LocalModel::from_env().expect("valid env");
    let text = stream_to_string(&local, "Reply with the single word: pong")
        .await
        .expect("local server reachable");
    assert!(!text.is_empty());
}

//! Basic usage of the local model adapter.
//!
//! Start a generateContent-compatible server locally and run:
//!   LOCAL_MODEL_BASE_URL=http://localhost:8080/v1beta cargo run --example basic

use contentgen_provider_local::LocalModel;
use contentgen_types::{ContentGenerator, GenerationRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = LocalModel::from_env()?;

    let request = GenerationRequest::text("Say hello in one sentence.")
        .temperature(0.2)
        .max_output_tokens(128);

    let event = client.generate(&request).await?;
    println!("Response: {}", event.text().unwrap_or_default());
    println!("Finish reason: {:?}", event.finish_reason());

    Ok(())
}

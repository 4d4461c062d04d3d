//! Streaming usage of the local model adapter.
//!
//!   RUST_LOG=contentgen_provider_local=debug cargo run --example streaming

use std::io::Write;

use contentgen_provider_local::LocalModel;
use contentgen_types::{ContentGenerator, GenerationRequest};
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = LocalModel::from_env()?;
    let request = GenerationRequest::text("Write a haiku about the sea.");

    let mut stream = client.generate_stream(&request).await?;
    while let Some(event) = stream.next().await {
        let event = event?;
        if let Some(text) = event.text() {
            print!("{text}");
            std::io::stdout().flush()?;
        }
        if let Some(reason) = event.finish_reason() {
            println!("\n[finish: {reason}]");
        }
    }

    // Token counting is not available locally.
    if let Err(err) = client
        .count_tokens(&contentgen_types::CountTokensRequest::default())
        .await
    {
        println!("{err}");
    }

    Ok(())
}

#![deny(missing_docs)]
//! Local model server adapter for contentgen-types.
//!
//! Implements [`contentgen_types::ContentGenerator`] against a locally hosted
//! server that speaks the `:generateContent` / `:streamGenerateContent`
//! protocol. The server is unauthenticated, so no auth headers are sent.
//! Token counting and embedding are not available locally and always fail
//! with [`contentgen_types::ProviderError::NotSupported`].
//!
//! # Example
//!
//! ```no_run
//! use contentgen_provider_local::LocalModel;
//! use contentgen_types::{ContentGenerator, GenerationRequest};
//! use futures::StreamExt;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LocalModel::from_env()?;
//! let request = GenerationRequest::text("Say hello in one sentence.").temperature(0.2);
//!
//! let mut stream = client.generate_stream(&request).await?;
//! while let Some(event) = stream.next().await {
//!     if let Some(text) = event?.text() {
//!         print!("{text}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod error;
pub mod mapping;
pub mod streaming;
pub mod types;

pub use client::LocalModel;
pub use config::{ConfigError, Endpoint, EndpointSource, LocalConfig, Mode};

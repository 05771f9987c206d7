//! Chat-completions backend for the repair-shop assistant.
//!
//! [`CompletionsClient`] implements [`assistant_core::TextGenerator`] over any
//! OpenAI-compatible `/v1/chat/completions` endpoint. Failures surface as
//! [`AssistantError`]s; the [`Troubleshooter`](assistant_core::Troubleshooter)
//! decides what the customer sees instead.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use assistant_core::{IssueReport, Troubleshooter};
//! use llm_assistant::CompletionsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompletionsClient::from_env()?;
//!     let troubleshooter = Troubleshooter::new(Arc::new(client));
//!     let outcome = troubleshooter.diagnose(&IssueReport::new("laptop overheats")).await;
//!     println!("{}", outcome.diagnosis.diagnosis);
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;

pub use api_types::{ChatCompletionRequest, ChatCompletionResponse};
pub use client::CompletionsClient;
pub use config::{CompletionsConfig, CompletionsConfigBuilder, DEFAULT_API_URL, DEFAULT_MODEL};

pub use assistant_core::{AssistantError, TextGenerator};

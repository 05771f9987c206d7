//! Core trait and types for the repair-shop assistant.
//!
//! This crate provides the glue between the booking site and an external
//! text-generation service. It defines:
//!
//! - [`TextGenerator`] - The capability every generator backend implements
//! - [`IssueReport`] / [`Diagnosis`] - Troubleshooting input and typed output
//! - [`FallbackCategory`] / [`ChatTopic`] - Keyword tables for scripted answers
//! - [`Troubleshooter`] - One attempt against the generator, scripted fallback on failure
//!
//! # Example
//!
//! ```rust
//! use assistant_core::{async_trait, AssistantError, CompletionRequest, TextGenerator};
//!
//! struct AlwaysDown;
//!
//! #[async_trait]
//! impl TextGenerator for AlwaysDown {
//!     async fn complete(&self, _request: CompletionRequest) -> Result<String, AssistantError> {
//!         Err(AssistantError::Unavailable("maintenance".to_string()))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "AlwaysDown"
//!     }
//! }
//! ```

mod diagnosis;
mod error;
mod fallback;
mod message;
mod prompt;
mod trait_def;
mod troubleshooter;

pub use diagnosis::{parse_diagnosis, strip_code_fences, Diagnosis, Difficulty, IssueReport};
pub use error::AssistantError;
pub use fallback::{
    fallback_chat, fallback_diagnosis, generic_diagnosis, ChatTopic, FallbackCategory,
    CATEGORY_KEYWORDS, GENERIC_CHAT_REPLY, TOPIC_KEYWORDS,
};
pub use message::{ChatMessage, CompletionRequest, Role};
pub use prompt::{
    chat_request, troubleshoot_request, CHAT_SYSTEM_PROMPT, CHAT_TEMPERATURE,
    TROUBLESHOOT_SYSTEM_PROMPT, TROUBLESHOOT_TEMPERATURE,
};
pub use trait_def::TextGenerator;
pub use troubleshooter::{ChatReply, ChatSource, DiagnosisSource, TroubleshootOutcome, Troubleshooter};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

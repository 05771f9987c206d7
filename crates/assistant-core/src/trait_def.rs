//! The TextGenerator trait definition.

use async_trait::async_trait;

use crate::error::AssistantError;
use crate::message::CompletionRequest;

/// A capability that turns a role-tagged conversation into completion text.
///
/// Implementations range from canned test doubles to a remote
/// chat-completions endpoint. The trait is object-safe and is normally held
/// as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce the completion text for `request`.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError>;

    /// Get a human-readable name for this generator.
    fn name(&self) -> &str;
}

//! Troubleshooting and chat orchestration with scripted fallback.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::diagnosis::{parse_diagnosis, Diagnosis, IssueReport};
use crate::error::AssistantError;
use crate::fallback::{fallback_chat, fallback_diagnosis, ChatTopic, FallbackCategory};
use crate::prompt::{chat_request, troubleshoot_request};
use crate::trait_def::TextGenerator;

/// Where a diagnosis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "category", rename_all = "lowercase")]
pub enum DiagnosisSource {
    /// Parsed from the generator's completion.
    Model,
    /// Scripted; `None` means the generic template.
    Fallback(Option<FallbackCategory>),
}

/// Where a chat reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "topic", rename_all = "lowercase")]
pub enum ChatSource {
    Model,
    Fallback(Option<ChatTopic>),
}

/// Result of a troubleshooting request. Always carries a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TroubleshootOutcome {
    pub diagnosis: Diagnosis,
    pub source: DiagnosisSource,
}

impl TroubleshootOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DiagnosisSource::Fallback(_))
    }
}

/// Result of a chat request. Always carries text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub source: ChatSource,
}

/// Runs one generator attempt per request and substitutes a scripted
/// answer on any failure, so callers never see an error.
#[derive(Clone)]
pub struct Troubleshooter {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Troubleshooter {
    /// Troubleshooter backed by `generator`.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        info!("Troubleshooter using generator: {}", generator.name());
        Self {
            generator: Some(generator),
        }
    }

    /// Troubleshooter that only ever answers from the scripted tables.
    pub fn offline() -> Self {
        info!("Troubleshooter running offline; scripted answers only");
        Self { generator: None }
    }

    /// Name of the configured generator, if any.
    pub fn generator_name(&self) -> Option<&str> {
        self.generator.as_deref().map(|g| g.name())
    }

    async fn try_diagnose(&self, report: &IssueReport) -> Result<Diagnosis, AssistantError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| AssistantError::Unavailable("no generator configured".to_string()))?;
        let completion = generator.complete(troubleshoot_request(report)).await?;
        parse_diagnosis(&completion)
    }

    async fn try_chat(&self, text: &str) -> Result<String, AssistantError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| AssistantError::Unavailable("no generator configured".to_string()))?;
        let completion = generator.complete(chat_request(text)).await?;
        let completion = completion.trim();
        if completion.is_empty() {
            return Err(AssistantError::MalformedResponse(
                "empty chat completion".to_string(),
            ));
        }
        Ok(completion.to_string())
    }

    /// Diagnose a reported problem.
    pub async fn diagnose(&self, report: &IssueReport) -> TroubleshootOutcome {
        debug!("Troubleshooting: {}", report.description);
        match self.try_diagnose(report).await {
            Ok(diagnosis) => TroubleshootOutcome {
                diagnosis,
                source: DiagnosisSource::Model,
            },
            Err(e) => {
                warn!("Troubleshooting fell back to scripted answer: {}", e);
                let (diagnosis, category) = fallback_diagnosis(report);
                TroubleshootOutcome {
                    diagnosis,
                    source: DiagnosisSource::Fallback(category),
                }
            }
        }
    }

    /// Answer a chat message.
    pub async fn chat(&self, text: &str) -> ChatReply {
        debug!("Chat message: {}", text);
        match self.try_chat(text).await {
            Ok(text) => ChatReply {
                text,
                source: ChatSource::Model,
            },
            Err(e) => {
                warn!("Chat fell back to scripted reply: {}", e);
                let (text, topic) = fallback_chat(text);
                ChatReply {
                    text,
                    source: ChatSource::Fallback(topic),
                }
            }
        }
    }
}

impl std::fmt::Debug for Troubleshooter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Troubleshooter")
            .field("generator", &self.generator_name())
            .finish()
    }
}

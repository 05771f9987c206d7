//! Canned generator - returns scripted completions in order.

use std::collections::VecDeque;

use assistant_core::{async_trait, AssistantError, CompletionRequest, TextGenerator};
use tokio::sync::Mutex;

/// A generator that answers with pre-set completions.
///
/// Queued responses are returned first, one per call; after the queue is
/// drained every call returns the default response. Requests are recorded
/// so tests can inspect the prompts that were sent.
pub struct CannedGenerator {
    default: String,
    queue: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl CannedGenerator {
    /// Create a generator that always returns `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default: response.into(),
            queue: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a generator that returns `responses` in order, then repeats the last one.
    pub fn sequence<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue: VecDeque<String> = responses.into_iter().map(Into::into).collect();
        let default = queue.back().cloned().unwrap_or_default();
        Self {
            default,
            queue: Mutex::new(queue),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A generator returning a well-formed diagnosis document.
    pub fn diagnosis(diagnosis: &str, steps: &[&str]) -> Self {
        let steps: Vec<String> = steps.iter().map(|s| format!("{:?}", s)).collect();
        Self::new(format!(
            "{{\"diagnosis\": {:?}, \"confidence\": 90, \"steps\": [{}], \"escalate\": false, \"estimatedTime\": \"1 hour\", \"difficulty\": \"easy\"}}",
            diagnosis,
            steps.join(", ")
        ))
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError> {
        self.requests.lock().await.push(request);
        let next = self.queue.lock().await.pop_front();
        Ok(next.unwrap_or_else(|| self.default.clone()))
    }

    fn name(&self) -> &str {
        "CannedGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_core::ChatMessage;

    fn request() -> CompletionRequest {
        CompletionRequest::new(vec![ChatMessage::user("hi")])
    }

    #[tokio::test]
    async fn test_sequence_then_repeat() {
        let generator = CannedGenerator::sequence(["one", "two"]);
        assert_eq!(generator.complete(request()).await.unwrap(), "one");
        assert_eq!(generator.complete(request()).await.unwrap(), "two");
        assert_eq!(generator.complete(request()).await.unwrap(), "two");
        assert_eq!(generator.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_diagnosis_document_parses() {
        let generator = CannedGenerator::diagnosis("Bad \"RAM\"", &["Reseat the RAM"]);
        let text = generator.complete(request()).await.unwrap();
        let diagnosis = assistant_core::parse_diagnosis(&text).unwrap();
        assert_eq!(diagnosis.diagnosis, "Bad \"RAM\"");
        assert_eq!(diagnosis.steps, vec!["Reseat the RAM".to_string()]);
    }
}

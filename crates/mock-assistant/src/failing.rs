//! Failing generator - always returns an error.

use assistant_core::{async_trait, AssistantError, CompletionRequest, TextGenerator};

/// Which error a [`FailingGenerator`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Api(u16),
    Unavailable,
}

/// A generator whose every call fails.
///
/// Useful for exercising fallback paths.
#[derive(Debug, Clone, Copy)]
pub struct FailingGenerator {
    kind: FailureKind,
}

impl FailingGenerator {
    pub fn new(kind: FailureKind) -> Self {
        Self { kind }
    }

    /// Fails as if the endpoint could not be reached.
    pub fn network() -> Self {
        Self::new(FailureKind::Network)
    }

    /// Fails as if the endpoint answered with `status`.
    pub fn api(status: u16) -> Self {
        Self::new(FailureKind::Api(status))
    }
}

impl Default for FailingGenerator {
    fn default() -> Self {
        Self::network()
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, AssistantError> {
        Err(match self.kind {
            FailureKind::Network => AssistantError::Network("connection refused".to_string()),
            FailureKind::Api(status) => AssistantError::Api {
                status,
                message: "mock failure".to_string(),
            },
            FailureKind::Unavailable => AssistantError::Unavailable("mock".to_string()),
        })
    }

    fn name(&self) -> &str {
        "FailingGenerator"
    }
}

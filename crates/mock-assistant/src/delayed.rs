//! Delayed generator - wraps another generator with artificial delay.

use std::time::Duration;

use assistant_core::{async_trait, AssistantError, CompletionRequest, TextGenerator};
use tokio::time::sleep;

/// A generator that wraps another generator and adds artificial delay.
///
/// Useful for simulating a slow completion endpoint.
pub struct DelayedGenerator<G: TextGenerator> {
    inner: G,
    delay: Duration,
}

impl<G: TextGenerator> DelayedGenerator<G> {
    /// Create a new DelayedGenerator wrapping `inner` with the specified delay.
    pub fn new(inner: G, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a generator with a delay in milliseconds.
    pub fn with_millis(inner: G, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for DelayedGenerator<G> {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError> {
        sleep(self.delay).await;
        self.inner.complete(request).await
    }

    fn name(&self) -> &str {
        "DelayedGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CannedGenerator;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_generator() {
        let generator = DelayedGenerator::with_millis(CannedGenerator::new("late"), 100);

        let start = Instant::now();
        let response = generator.complete(CompletionRequest::default()).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(response, "late");
        assert!(elapsed >= Duration::from_millis(100));
        assert_eq!(generator.name(), "DelayedGenerator");
    }
}

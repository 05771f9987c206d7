//! Mock text generators for the repair-shop assistant.
//!
//! This crate provides mock implementations of the `TextGenerator` trait for testing:
//! - `CannedGenerator` - Returns scripted completions and records requests
//! - `FailingGenerator` - Always fails with a chosen error
//! - `DelayedGenerator` - Wraps another generator with artificial delay
//!
//! For real completions, use the `llm-assistant` crate instead.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use mock_assistant::{FailingGenerator, IssueReport, Troubleshooter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let troubleshooter = Troubleshooter::new(Arc::new(FailingGenerator::network()));
//!     let outcome = troubleshooter.diagnose(&IssueReport::new("cracked screen")).await;
//!     assert!(outcome.is_fallback());
//! }
//! ```

mod canned;
mod delayed;
mod failing;

// Re-export assistant-core types for convenience
pub use assistant_core::{
    async_trait, AssistantError, CompletionRequest, IssueReport, TextGenerator, Troubleshooter,
};

pub use canned::CannedGenerator;
pub use delayed::DelayedGenerator;
pub use failing::{FailingGenerator, FailureKind};

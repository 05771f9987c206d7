//! Blog content from an issue tracker.
//!
//! Posts are issues carrying a label; comments and `+1`/`-1` reactions map
//! onto the issue's comments and reactions. Author and media live in a
//! `<!-- METADATA ... -->` block inside the issue body (see [`parse_metadata`]).
//!
//! - [`ContentProvider`] - The interface the web layer talks to
//! - [`GithubIssuesProvider`] - Provider over a GitHub repository
//! - [`MemoryProvider`] - Provider over in-memory posts
//! - [`VoteLedger`] - The reader's own like/dislike per post

mod error;
mod github;
mod memory;
mod metadata;
mod models;
mod provider;
mod votes;

pub use error::{CmsError, Result};
pub use github::{GithubConfig, GithubConfigBuilder, GithubIssuesProvider, DEFAULT_API_URL, DEFAULT_LABEL};
pub use memory::MemoryProvider;
pub use metadata::{parse_metadata, MediaItem, PostMetadata};
pub use models::{Comment, Post, Reaction};
pub use provider::ContentProvider;
pub use votes::{VoteLedger, Votes};

//! The ContentProvider trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, Post, Reaction};

/// A source of blog posts and their reader interactions.
///
/// This trait is object-safe and is normally held as `Arc<dyn ContentProvider>`.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Published posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Comments on a post, oldest first.
    async fn get_comments(&self, post_id: u64) -> Result<Vec<Comment>>;

    /// Add a comment to a post.
    async fn add_comment(&self, post_id: u64, body: &str) -> Result<Comment>;

    /// Add a reaction to a post.
    async fn add_reaction(&self, post_id: u64, reaction: Reaction) -> Result<()>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;
}

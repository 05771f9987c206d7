//! In-memory content provider.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{CmsError, Result};
use crate::models::{Comment, Post, Reaction};
use crate::provider::ContentProvider;

/// Posts held in process memory. Useful for tests and local previews.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    posts: RwLock<Vec<Post>>,
    comments: RwLock<HashMap<u64, Vec<Comment>>>,
}

impl MemoryProvider {
    /// Create a provider serving `posts`.
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
            comments: RwLock::new(HashMap::new()),
        }
    }

    async fn ensure_post(&self, post_id: u64) -> Result<()> {
        if self.posts.read().await.iter().any(|p| p.id == post_id) {
            Ok(())
        } else {
            Err(CmsError::NotFound(post_id))
        }
    }
}

#[async_trait]
impl ContentProvider for MemoryProvider {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn get_comments(&self, post_id: u64) -> Result<Vec<Comment>> {
        self.ensure_post(post_id).await?;
        Ok(self
            .comments
            .read()
            .await
            .get(&post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_comment(&self, post_id: u64, body: &str) -> Result<Comment> {
        self.ensure_post(post_id).await?;
        let body = body.trim();
        if body.is_empty() {
            return Err(CmsError::InvalidInput("comment body is empty".to_string()));
        }

        let mut comments = self.comments.write().await;
        let next_id = comments.values().map(Vec::len).sum::<usize>() as u64 + 1;
        let comment = Comment {
            id: next_id,
            author: "guest".to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        comments.entry(post_id).or_default().push(comment.clone());

        let mut posts = self.posts.write().await;
        if let Some(post) = posts.iter_mut().find(|p| p.id == post_id) {
            post.comment_count += 1;
        }
        Ok(comment)
    }

    async fn add_reaction(&self, post_id: u64, reaction: Reaction) -> Result<()> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(CmsError::NotFound(post_id))?;
        match reaction {
            Reaction::Like => post.likes += 1,
            Reaction::Dislike => post.dislikes += 1,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MemoryProvider"
    }
}

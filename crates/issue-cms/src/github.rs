//! ContentProvider over a GitHub repository's issues.

use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CmsError, Result};
use crate::metadata::parse_metadata;
use crate::models::{Comment, Post, Reaction};
use crate::provider::ContentProvider;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default label that marks an issue as a blog post.
pub const DEFAULT_LABEL: &str = "blog";

const USER_AGENT: &str = concat!("repairdesk-issue-cms/", env!("CARGO_PKG_VERSION"));

/// Configuration for GithubIssuesProvider.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// API base URL.
    pub api_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Label that marks an issue as a post.
    pub label: String,
    /// Token for comments and reactions. Reads work without one.
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: String::new(),
            repo: String::new(),
            label: DEFAULT_LABEL.to_string(),
            token: None,
        }
    }
}

impl GithubConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CMS_REPO_OWNER` - Repository owner
    /// - `CMS_REPO_NAME` - Repository name
    ///
    /// Optional environment variables:
    /// - `CMS_LABEL` - Post label (default: blog)
    /// - `CMS_TOKEN` - Token enabling comments and reactions
    /// - `CMS_API_URL` - API base URL (default: https://api.github.com)
    pub fn from_env() -> Result<Self> {
        let required = |name: &str| {
            env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| CmsError::Configuration(format!("{} not set", name)))
        };

        Ok(Self {
            owner: required("CMS_REPO_OWNER")?,
            repo: required("CMS_REPO_NAME")?,
            label: env::var("CMS_LABEL").unwrap_or_else(|_| DEFAULT_LABEL.to_string()),
            token: env::var("CMS_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            api_url: env::var("CMS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GithubConfigBuilder {
        GithubConfigBuilder::default()
    }

    fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

/// Builder for GithubConfig.
#[derive(Debug, Default)]
pub struct GithubConfigBuilder {
    config: GithubConfig,
}

impl GithubConfigBuilder {
    /// Set the repository.
    pub fn repository(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.config.owner = owner.into();
        self.config.repo = repo.into();
        self
    }

    /// Set the post label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Set the write token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GithubConfig {
        self.config
    }
}

// Wire types of the issues API.

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Label {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct Reactions {
    #[serde(rename = "+1", default)]
    plus_one: u32,
    #[serde(rename = "-1", default)]
    minus_one: u32,
}

#[derive(Debug, Deserialize)]
struct Issue {
    number: u64,
    title: String,
    #[serde(default)]
    body: Option<String>,
    user: User,
    #[serde(default)]
    labels: Vec<Label>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    comments: u32,
    #[serde(default)]
    reactions: Reactions,
    html_url: String,
    /// Present only on pull requests, which the issues API also lists.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct IssueComment {
    id: u64,
    user: User,
    #[serde(default)]
    body: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

impl From<Issue> for Post {
    fn from(issue: Issue) -> Self {
        let (metadata, body) = parse_metadata(issue.body.as_deref().unwrap_or_default());
        Post {
            id: issue.number,
            title: issue.title,
            body,
            author: metadata.author.unwrap_or(issue.user.login),
            media: metadata.media,
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
            created_at: issue.created_at,
            updated_at: issue.updated_at,
            comment_count: issue.comments,
            likes: issue.reactions.plus_one,
            dislikes: issue.reactions.minus_one,
            url: issue.html_url,
        }
    }
}

impl From<IssueComment> for Comment {
    fn from(comment: IssueComment) -> Self {
        Comment {
            id: comment.id,
            author: comment.user.login,
            body: comment.body.unwrap_or_default(),
            created_at: comment.created_at,
        }
    }
}

/// Blog posts stored as labelled issues of one repository.
pub struct GithubIssuesProvider {
    client: Client,
    config: GithubConfig,
}

impl GithubIssuesProvider {
    /// Create a new provider with the given configuration.
    pub fn new(config: GithubConfig) -> Result<Self> {
        if config.owner.is_empty() || config.repo.is_empty() {
            return Err(CmsError::Configuration(
                "repository owner and name are required".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CmsError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "GithubIssuesProvider reading {}/{} label '{}' (writes {})",
            config.owner,
            config.repo,
            config.label,
            if config.token.is_some() { "enabled" } else { "disabled" }
        );

        Ok(Self { client, config })
    }

    /// Create a provider from environment variables.
    ///
    /// See [`GithubConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self> {
        Self::new(GithubConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/vnd.github+json");
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn require_token(&self) -> Result<()> {
        match self.config.token {
            Some(_) => Ok(()),
            None => Err(CmsError::ReadOnly),
        }
    }

    async fn check(response: Response, post_id: Option<u64>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.as_u16() == 404 {
            if let Some(id) = post_id {
                return Err(CmsError::NotFound(id));
            }
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiMessage>(&text)
            .map(|m| m.message)
            .unwrap_or(text);
        Err(CmsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ContentProvider for GithubIssuesProvider {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let url = format!("{}/issues", self.config.repo_url());
        debug!("Listing posts from {}", url);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[
                ("labels", self.config.label.as_str()),
                ("state", "open"),
                ("sort", "created"),
                ("direction", "desc"),
                ("per_page", "100"),
            ])
            .send()
            .await?;
        let issues: Vec<Issue> = Self::check(response, None).await?.json().await?;

        Ok(issues
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .map(Post::from)
            .collect())
    }

    async fn get_comments(&self, post_id: u64) -> Result<Vec<Comment>> {
        let url = format!("{}/issues/{}/comments", self.config.repo_url(), post_id);
        debug!("Listing comments for post {}", post_id);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("per_page", "100")])
            .send()
            .await?;
        let comments: Vec<IssueComment> = Self::check(response, Some(post_id)).await?.json().await?;

        Ok(comments.into_iter().map(Comment::from).collect())
    }

    async fn add_comment(&self, post_id: u64, body: &str) -> Result<Comment> {
        self.require_token()?;
        let body = body.trim();
        if body.is_empty() {
            return Err(CmsError::InvalidInput("comment body is empty".to_string()));
        }

        let url = format!("{}/issues/{}/comments", self.config.repo_url(), post_id);
        let response = self
            .authorized(self.client.post(&url))
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;
        let comment: IssueComment = Self::check(response, Some(post_id)).await?.json().await?;

        info!("Added comment {} to post {}", comment.id, post_id);
        Ok(comment.into())
    }

    async fn add_reaction(&self, post_id: u64, reaction: Reaction) -> Result<()> {
        self.require_token()?;

        let url = format!("{}/issues/{}/reactions", self.config.repo_url(), post_id);
        let response = self
            .authorized(self.client.post(&url))
            .json(&serde_json::json!({ "content": reaction.content() }))
            .send()
            .await?;
        Self::check(response, Some(post_id)).await?;

        info!("Added {} reaction to post {}", reaction, post_id);
        Ok(())
    }

    fn name(&self) -> &str {
        "GithubIssuesProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_to_post() {
        let json = r#"{
            "number": 7,
            "title": "Five signs your SSD is dying",
            "body": "<!-- METADATA\nauthor: Repair Team\nmedia: []\n-->\nWatch for these.",
            "user": {"login": "shop-bot"},
            "labels": [{"name": "blog"}, {"name": "storage"}],
            "created_at": "2026-09-01T10:00:00Z",
            "updated_at": "2026-09-02T10:00:00Z",
            "comments": 3,
            "reactions": {"+1": 12, "-1": 1, "heart": 4},
            "html_url": "https://github.com/acme/blog/issues/7"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        let post = Post::from(issue);

        assert_eq!(post.id, 7);
        assert_eq!(post.author, "Repair Team");
        assert_eq!(post.body, "Watch for these.");
        assert_eq!(post.labels, vec!["blog", "storage"]);
        assert_eq!(post.comment_count, 3);
        assert_eq!(post.likes, 12);
        assert_eq!(post.dislikes, 1);
    }

    #[test]
    fn test_author_falls_back_to_opener() {
        let json = r#"{
            "number": 8,
            "title": "No metadata",
            "body": null,
            "user": {"login": "shop-bot"},
            "created_at": "2026-09-01T10:00:00Z",
            "updated_at": "2026-09-01T10:00:00Z",
            "html_url": "https://github.com/acme/blog/issues/8"
        }"#;
        let post = Post::from(serde_json::from_str::<Issue>(json).unwrap());
        assert_eq!(post.author, "shop-bot");
        assert_eq!(post.body, "");
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn test_provider_requires_repository() {
        assert!(matches!(
            GithubIssuesProvider::new(GithubConfig::default()),
            Err(CmsError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_writes_need_a_token() {
        let config = GithubConfig::builder().repository("acme", "blog").build();
        let provider = GithubIssuesProvider::new(config).unwrap();

        assert!(matches!(
            provider.add_comment(1, "Nice post").await,
            Err(CmsError::ReadOnly)
        ));
        assert!(matches!(
            provider.add_reaction(1, Reaction::Like).await,
            Err(CmsError::ReadOnly)
        ));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_cms_vars() {
            for var in ["CMS_REPO_OWNER", "CMS_REPO_NAME", "CMS_LABEL", "CMS_TOKEN", "CMS_API_URL"] {
                std::env::remove_var(var);
            }
        }

        clear_all_cms_vars();
        match GithubConfig::from_env() {
            Err(CmsError::Configuration(msg)) => assert!(msg.contains("CMS_REPO_OWNER")),
            other => panic!("Expected Configuration error, got {:?}", other.map(|c| c.repo)),
        }

        std::env::set_var("CMS_REPO_OWNER", "acme");
        std::env::set_var("CMS_REPO_NAME", "blog");
        let config = GithubConfig::from_env().unwrap();
        assert_eq!(config.label, DEFAULT_LABEL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.token.is_none());
        assert_eq!(config.repo_url(), "https://api.github.com/repos/acme/blog");

        std::env::set_var("CMS_LABEL", "posts");
        std::env::set_var("CMS_TOKEN", "ghp_test");
        let config = GithubConfig::from_env().unwrap();
        assert_eq!(config.label, "posts");
        assert_eq!(config.token.as_deref(), Some("ghp_test"));

        clear_all_cms_vars();
    }
}

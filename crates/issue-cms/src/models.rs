//! Blog content types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metadata::MediaItem;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Issue number.
    pub id: u64,
    pub title: String,
    /// Markdown body with the metadata block removed.
    pub body: String,
    /// Author from the metadata block, else the issue opener.
    pub author: String,
    pub media: Vec<MediaItem>,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comment_count: u32,
    pub likes: u32,
    pub dislikes: u32,
    pub url: String,
}

/// A reader comment on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A reader reaction. Maps to `+1` / `-1` issue reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    /// Reaction content as the issue tracker names it.
    pub fn content(&self) -> &'static str {
        match self {
            Reaction::Like => "+1",
            Reaction::Dislike => "-1",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Dislike => "dislike",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "like" | "+1" | "up" => Ok(Reaction::Like),
            "dislike" | "-1" | "down" => Ok(Reaction::Dislike),
            other => Err(format!("unknown reaction: {}", other)),
        }
    }
}

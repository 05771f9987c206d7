//! The metadata block embedded in a post body.
//!
//! Posts carry author and media information in an HTML comment so it stays
//! invisible when the issue is viewed directly:
//!
//! ```text
//! <!-- METADATA
//! author: Jane Doe
//! media: [{"type": "image", "url": "https://example.com/a.png"}]
//! -->
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

const BLOCK_START: &str = "<!-- METADATA";
const BLOCK_END: &str = "-->";

/// An image or video attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type", default = "default_media_kind")]
    pub kind: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

fn default_media_kind() -> String {
    "image".to_string()
}

/// Fields read from a metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostMetadata {
    pub author: Option<String>,
    pub media: Vec<MediaItem>,
}

impl PostMetadata {
    /// Render as a block ready to prepend to a body.
    pub fn to_block(&self) -> String {
        let mut block = String::from(BLOCK_START);
        block.push('\n');
        if let Some(author) = &self.author {
            block.push_str(&format!("author: {}\n", author));
        }
        if !self.media.is_empty() {
            let media = serde_json::to_string(&self.media).unwrap_or_else(|_| "[]".to_string());
            block.push_str(&format!("media: {}\n", media));
        }
        block.push_str(BLOCK_END);
        block
    }
}

/// Split `body` into its metadata and the body with the block removed.
///
/// A body without a block yields default metadata and the trimmed body.
/// An unterminated block is left in place. A media list that is not valid
/// JSON is logged and treated as empty.
pub fn parse_metadata(body: &str) -> (PostMetadata, String) {
    let Some(start) = body.find(BLOCK_START) else {
        return (PostMetadata::default(), body.trim().to_string());
    };
    let inner_start = start + BLOCK_START.len();
    let Some(end_offset) = body[inner_start..].find(BLOCK_END) else {
        return (PostMetadata::default(), body.trim().to_string());
    };
    let inner = &body[inner_start..inner_start + end_offset];
    let rest_start = inner_start + end_offset + BLOCK_END.len();

    let mut metadata = PostMetadata::default();
    for line in inner.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_lowercase().as_str() {
            "author" if !value.is_empty() => metadata.author = Some(value.to_string()),
            "media" if !value.is_empty() => match serde_json::from_str(value) {
                Ok(media) => metadata.media = media,
                Err(e) => warn!("Ignoring unparseable media list in post metadata: {}", e),
            },
            _ => {}
        }
    }

    let stripped = format!("{}{}", &body[..start], &body[rest_start..]);
    (metadata, stripped.trim().to_string())
}

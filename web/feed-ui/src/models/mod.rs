//! Data models for the feed
//!
//! - Post: a single image post with engagement metadata
//! - Comment: an immutable `{username, text}` pair attached to a post
//! - PostDraft: the input of the create-post flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PostId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub username: String,
    pub text: String,
}

impl Comment {
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
        }
    }
}

/// Post entity - owned exclusively by the post store; everything else sees clones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    pub image_url: String,
    pub caption: String,
    pub location: Option<String>,
    pub like_count: u64,
    pub liked_by_viewer: bool,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// The last `n` comments in insertion order
    pub fn recent_comments(&self, n: usize) -> &[Comment] {
        let start = self.comments.len().saturating_sub(n);
        &self.comments[start..]
    }
}

/// Input for creating a post from the create-post modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    /// Image source, usually a `data:` URL read from the file picker
    pub image_data: String,
    pub caption: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Creation time; the store stamps "now" when absent
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PostDraft {
    pub fn new(image_data: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            image_data: image_data.into(),
            caption: caption.into(),
            location: None,
            created_at: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

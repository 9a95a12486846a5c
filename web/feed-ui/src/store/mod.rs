//! Data service boundary for the feed
//!
//! The rendering and interaction layers only talk to posts through
//! [`PostStore`]. `InMemoryPostStore` is the mock backend; a network client
//! implementing the same trait can replace it without touching the UI code.

mod memory;
pub mod seed;

use crate::error::Result;
use crate::models::{Post, PostDraft, PostId};
use async_trait::async_trait;

pub use memory::InMemoryPostStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Snapshot of all posts, newest first (stable on equal timestamps)
    async fn list(&self) -> Result<Vec<Post>>;

    /// Insert a new post at the front of the collection
    async fn create(&self, draft: PostDraft) -> Result<Post>;

    /// Set the viewer's like state. Returns the updated record, or `None`
    /// when no post has this id.
    async fn set_liked(&self, id: PostId, liked: bool) -> Result<Option<Post>>;

    /// Append a comment from the viewer. Returns the updated record, or
    /// `None` when no post has this id.
    async fn add_comment(&self, id: PostId, text: &str) -> Result<Option<Post>>;

    /// Remove a post. Returns whether anything was removed.
    async fn remove(&self, id: PostId) -> Result<bool>;
}

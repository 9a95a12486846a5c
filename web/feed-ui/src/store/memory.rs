use super::PostStore;
use crate::config::{Config, StoreConfig, ViewerConfig};
use crate::error::{FeedError, Result};
use crate::models::{Author, Comment, Post, PostDraft, PostId};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory post store with simulated latency
///
/// The collection is kept in insertion order with the most recently created
/// post at the front. `list()` re-sorts a copy by `created_at`.
pub struct InMemoryPostStore {
    state: RwLock<StoreState>,
    viewer: Author,
    fetch_latency: Duration,
    mutation_latency: Duration,
    fail_fetch: AtomicBool,
    fail_mutations: AtomicBool,
}

struct StoreState {
    posts: Vec<Post>,
    /// Highest id ever handed out, so ids stay unique after removals
    last_id: PostId,
}

impl StoreState {
    fn next_id(&self) -> PostId {
        self.last_id.max(self.posts.len() as PostId) + 1
    }

    fn find_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }
}

impl InMemoryPostStore {
    pub fn new(store: &StoreConfig, viewer: &ViewerConfig) -> Self {
        Self::with_posts(store, viewer, Vec::new())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.store, &config.viewer)
    }

    /// Build a store pre-populated with `posts` (kept in the given order)
    pub fn with_posts(store: &StoreConfig, viewer: &ViewerConfig, posts: Vec<Post>) -> Self {
        let last_id = posts.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            state: RwLock::new(StoreState { posts, last_id }),
            viewer: Author {
                username: viewer.username.clone(),
                avatar_url: viewer.avatar_url.clone(),
            },
            fetch_latency: store.fetch_latency(),
            mutation_latency: store.mutation_latency(),
            fail_fetch: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
        }
    }

    /// Make subsequent `list()` calls fail with `FetchRejected`
    pub fn set_fetch_failure(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent mutations fail with `MutationRejected`
    pub fn set_mutation_failure(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    async fn mutation_boundary(&self, op: &str) -> Result<()> {
        if !self.mutation_latency.is_zero() {
            tokio::time::sleep(self.mutation_latency).await;
        }
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(FeedError::MutationRejected(format!("{} unavailable", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn list(&self) -> Result<Vec<Post>> {
        if !self.fetch_latency.is_zero() {
            tokio::time::sleep(self.fetch_latency).await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(FeedError::FetchRejected("post list unavailable".to_string()));
        }

        let mut posts = self.state.read().await.posts.clone();
        // sort_by is stable: equal timestamps keep collection order
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn create(&self, draft: PostDraft) -> Result<Post> {
        self.mutation_boundary("create").await?;

        let mut state = self.state.write().await;
        let post = Post {
            id: state.next_id(),
            author: self.viewer.clone(),
            image_url: draft.image_data,
            caption: draft.caption,
            location: draft.location.filter(|l| !l.trim().is_empty()),
            like_count: 0,
            liked_by_viewer: false,
            comments: Vec::new(),
            created_at: draft.created_at.unwrap_or_else(Utc::now),
        };
        state.last_id = post.id;
        state.posts.insert(0, post.clone());

        debug!(post_id = post.id, "post created");
        Ok(post)
    }

    async fn set_liked(&self, id: PostId, liked: bool) -> Result<Option<Post>> {
        self.mutation_boundary("like").await?;

        let mut state = self.state.write().await;
        let Some(post) = state.find_mut(id) else {
            debug!(post_id = id, "set_liked on unknown post ignored");
            return Ok(None);
        };

        post.liked_by_viewer = liked;
        post.like_count = if liked {
            post.like_count + 1
        } else {
            post.like_count.saturating_sub(1)
        };

        debug!(post_id = id, liked, like_count = post.like_count, "like state updated");
        Ok(Some(post.clone()))
    }

    async fn add_comment(&self, id: PostId, text: &str) -> Result<Option<Post>> {
        self.mutation_boundary("comment").await?;

        let mut state = self.state.write().await;
        let Some(post) = state.find_mut(id) else {
            debug!(post_id = id, "add_comment on unknown post ignored");
            return Ok(None);
        };

        post.comments.push(Comment::new(self.viewer.username.clone(), text));

        debug!(post_id = id, comments = post.comments.len(), "comment appended");
        Ok(Some(post.clone()))
    }

    async fn remove(&self, id: PostId) -> Result<bool> {
        self.mutation_boundary("remove").await?;

        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        let removed = state.posts.len() != before;

        debug!(post_id = id, removed, "post remove");
        Ok(removed)
    }
}

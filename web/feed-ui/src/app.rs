//! Feed application shell
//!
//! Owns the document and wires the post store, renderer and interaction
//! controller together. UI events are handled one at a time, in arrival
//! order, either through [`FeedApp::handle`] or by [`FeedApp::run`] draining
//! an event queue.

use crate::config::Config;
use crate::controller::{InteractionController, UiEvent};
use crate::dom::Document;
use crate::error::{FeedError, Result};
use crate::metrics::{FEED_LOAD_DURATION_SECONDS, FEED_LOAD_TOTAL};
use crate::models::{Post, PostDraft, PostId};
use crate::render::{ids, FeedRenderer};
use crate::store::PostStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered { posts: usize },
    /// The fetch was rejected and the failure placeholder is shown
    Failed,
    /// The page has no feed container; nothing was loaded
    NoContainer,
}

pub struct FeedApp {
    store: Arc<dyn PostStore>,
    renderer: FeedRenderer,
    controller: InteractionController,
    document: Document,
    clock: Clock,
}

impl FeedApp {
    pub fn new(store: Arc<dyn PostStore>, config: &Config) -> Self {
        let renderer = FeedRenderer::from_config(&config.feed);
        let controller = InteractionController::new(
            store.clone(),
            renderer.clone(),
            config.feed.comment_refresh,
        );
        Self {
            store,
            renderer,
            controller,
            document: Document::feed_page(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock used for timestamps and relative times
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.document = document;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn store(&self) -> &Arc<dyn PostStore> {
        &self.store
    }

    pub async fn initialize(&mut self) -> LoadOutcome {
        let outcome = self.load_posts().await;
        info!("MyGram app initialized");
        outcome
    }

    /// Fetch, render and mount the feed. A rejected fetch is turned into the
    /// inline failure placeholder; it never escapes as an error.
    pub async fn load_posts(&mut self) -> LoadOutcome {
        if !self.document.contains(ids::POSTS_CONTAINER) {
            return LoadOutcome::NoContainer;
        }

        let started = Instant::now();
        let (fragment, outcome) = match self.store.list().await {
            Ok(posts) => {
                self.document.remove(ids::LOADING_PLACEHOLDER);
                let fragment = self.renderer.render(&posts, (self.clock)());
                (fragment, LoadOutcome::Rendered { posts: posts.len() })
            }
            Err(err) => {
                error!("Failed to load posts: {}", err);
                (FeedRenderer::load_failure(), LoadOutcome::Failed)
            }
        };

        if let Err(err) = self.document.mount(ids::POSTS_CONTAINER, fragment) {
            error!("Failed to mount feed: {}", err);
        }

        let label = match outcome {
            LoadOutcome::Rendered { .. } => "rendered",
            _ => "failed",
        };
        FEED_LOAD_DURATION_SECONDS
            .with_label_values(&[label])
            .observe(started.elapsed().as_secs_f64());
        FEED_LOAD_TOTAL.with_label_values(&[label]).inc();
        debug!(?outcome, "feed loaded");

        outcome
    }

    pub fn open_create_post(&mut self) -> Result<()> {
        self.document.element_mut(ids::CREATE_POST_MODAL)?.show();
        Ok(())
    }

    pub fn close_create_post(&mut self) -> Result<()> {
        self.document.element_mut(ids::CREATE_POST_MODAL)?.hide();
        self.reset_create_form()
    }

    /// Show the picked image in the modal preview
    pub fn select_image(&mut self, data_url: &str) -> Result<()> {
        self.document.element_mut(ids::PREVIEW_IMAGE)?.value = data_url.to_string();
        self.document.element_mut(ids::IMAGE_PREVIEW)?.show();
        Ok(())
    }

    pub fn set_caption(&mut self, caption: &str) -> Result<()> {
        self.document.element_mut(ids::CAPTION_INPUT)?.value = caption.to_string();
        Ok(())
    }

    pub fn set_location(&mut self, location: &str) -> Result<()> {
        self.document.element_mut(ids::LOCATION_INPUT)?.value = location.to_string();
        Ok(())
    }

    /// Create a post from the modal form, close the modal and reload the feed
    pub async fn submit_create_post(&mut self) -> Result<Post> {
        let image = self.document.element(ids::PREVIEW_IMAGE)?.value.clone();
        if image.is_empty() {
            return Err(FeedError::Validation("an image is required".to_string()));
        }
        let caption = self.document.element(ids::CAPTION_INPUT)?.value.clone();
        let location = self.document.element(ids::LOCATION_INPUT)?.value.trim().to_string();

        let mut draft = PostDraft::new(image, caption).created_at((self.clock)());
        if !location.is_empty() {
            draft = draft.with_location(location);
        }

        let post = self.store.create(draft).await?;
        info!(post_id = post.id, "post published");

        self.close_create_post()?;
        self.load_posts().await;
        Ok(post)
    }

    pub async fn delete_post(&mut self, post_id: PostId) -> Result<bool> {
        let removed = self.store.remove(post_id).await?;
        if removed {
            self.load_posts().await;
        }
        Ok(removed)
    }

    fn reset_create_form(&mut self) -> Result<()> {
        self.document.element_mut(ids::CAPTION_INPUT)?.value.clear();
        self.document.element_mut(ids::LOCATION_INPUT)?.value.clear();
        self.document.element_mut(ids::PREVIEW_IMAGE)?.value.clear();
        self.document.element_mut(ids::IMAGE_PREVIEW)?.hide();
        Ok(())
    }

    /// Handle one event, propagating errors to the caller
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::LikeClicked(post_id) => {
                let command = self
                    .controller
                    .toggle_like(&mut self.document, post_id)
                    .await?;
                debug!(
                    post_id,
                    previous = command.previous(),
                    status = command.status().as_str(),
                    error = ?command.error(),
                    "like handled"
                );
            }
            UiEvent::CommentInput { post_id, text } => {
                self.controller
                    .update_comment_input(&mut self.document, post_id, &text)?;
            }
            UiEvent::CommentSubmitted { post_id, trigger } => {
                let outcome = self
                    .controller
                    .submit_comment(&mut self.document, post_id)
                    .await?;
                debug!(post_id, ?trigger, ?outcome, "comment submission handled");
            }
            UiEvent::OpenCreatePost => self.open_create_post()?,
            UiEvent::CloseCreatePost => self.close_create_post()?,
            UiEvent::ImageSelected(data_url) => self.select_image(&data_url)?,
            UiEvent::CaptionInput(caption) => self.set_caption(&caption)?,
            UiEvent::LocationInput(location) => self.set_location(&location)?,
            UiEvent::CreatePostSubmitted => {
                self.submit_create_post().await?;
            }
            UiEvent::DeletePost(post_id) => {
                self.delete_post(post_id).await?;
            }
            UiEvent::Reload => {
                self.load_posts().await;
            }
        }
        Ok(())
    }

    /// Handle one event; failures are logged and stay inside the app
    pub async fn handle(&mut self, event: UiEvent) {
        let post_id = event.post_id();
        if let Err(err) = self.dispatch(event).await {
            warn!(?post_id, "event handling failed: {}", err);
        }
    }

    /// Drain the event queue in order until every sender is dropped
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> Self {
        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }
        debug!("event queue closed");
        self
    }
}

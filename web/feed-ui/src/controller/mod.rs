//! Interaction controller for rendered posts
//!
//! Handles like toggles and comment submissions against the document and
//! the post store. Likes are optimistic (see [`command`]); comments are
//! written to the store first and the display follows the configured
//! [`CommentRefresh`] policy.

pub mod command;
pub mod events;

use crate::config::CommentRefresh;
use crate::dom::Document;
use crate::error::Result;
use crate::metrics::{COMMENT_SUBMISSION_TOTAL, LIKE_MUTATION_TOTAL};
use crate::models::PostId;
use crate::render::{ids, FeedRenderer};
use crate::store::PostStore;
use std::sync::Arc;
use tracing::{debug, warn};

pub use command::{LikeCommand, MutationStatus};
pub use events::{SubmitTrigger, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOutcome {
    /// Input was empty after trimming; nothing happened
    Ignored,
    /// Comment stored; `refreshed` tells whether the comment block was redrawn
    Posted { refreshed: bool },
}

pub struct InteractionController {
    store: Arc<dyn PostStore>,
    renderer: FeedRenderer,
    comment_refresh: CommentRefresh,
}

impl InteractionController {
    pub fn new(
        store: Arc<dyn PostStore>,
        renderer: FeedRenderer,
        comment_refresh: CommentRefresh,
    ) -> Self {
        Self {
            store,
            renderer,
            comment_refresh,
        }
    }

    /// Flip the like state of a post optimistically and sync it with the store
    pub async fn toggle_like(&self, doc: &mut Document, post_id: PostId) -> Result<LikeCommand> {
        let mut command = LikeCommand::from_document(doc, post_id)?;
        command.apply(doc)?;

        match self.store.set_liked(post_id, command.target()).await {
            Ok(record) => {
                command.confirm(doc, record.as_ref())?;
                debug!(post_id, liked = command.target(), "like confirmed");
            }
            Err(err) => {
                warn!(post_id, liked = command.target(), "like failed, reverting: {}", err);
                command.fail(doc, &err)?;
            }
        }

        LIKE_MUTATION_TOTAL
            .with_label_values(&[command.status().as_str()])
            .inc();
        Ok(command)
    }

    /// Mirror typed text into the comment input of a post
    pub fn update_comment_input(
        &self,
        doc: &mut Document,
        post_id: PostId,
        text: &str,
    ) -> Result<()> {
        doc.element_mut(&ids::comment_input(post_id))?.value = text.to_string();
        Ok(())
    }

    /// Submit the comment input of a post
    ///
    /// Whitespace-only input is ignored. On a store failure the input keeps
    /// its text and the error is returned.
    pub async fn submit_comment(
        &self,
        doc: &mut Document,
        post_id: PostId,
    ) -> Result<CommentOutcome> {
        let input_id = ids::comment_input(post_id);
        let text = doc.element(&input_id)?.value.trim().to_string();
        if text.is_empty() {
            COMMENT_SUBMISSION_TOTAL.with_label_values(&["ignored"]).inc();
            return Ok(CommentOutcome::Ignored);
        }

        let record = match self.store.add_comment(post_id, &text).await {
            Ok(record) => record,
            Err(err) => {
                COMMENT_SUBMISSION_TOTAL.with_label_values(&["failed"]).inc();
                return Err(err);
            }
        };
        doc.element_mut(&input_id)?.value.clear();

        let refreshed = match (self.comment_refresh, record) {
            (CommentRefresh::RefreshDisplay, Some(post)) => {
                let fragment = self.renderer.render_comments(&post);
                doc.mount(&ids::comments(post_id), fragment)?;
                true
            }
            _ => false,
        };

        COMMENT_SUBMISSION_TOTAL.with_label_values(&["posted"]).inc();
        debug!(post_id, refreshed, "comment submitted");
        Ok(CommentOutcome::Posted { refreshed })
    }
}

//! UI events and the queue that serializes them.

use crate::error::{FeedError, Result};
use crate::models::PostId;
use tokio::sync::mpsc;

/// How a comment submission was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    /// The "Post" button next to the input
    Button,
    /// Enter pressed inside the input
    Enter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    LikeClicked(PostId),
    CommentInput { post_id: PostId, text: String },
    CommentSubmitted { post_id: PostId, trigger: SubmitTrigger },
    OpenCreatePost,
    CloseCreatePost,
    ImageSelected(String),
    CaptionInput(String),
    LocationInput(String),
    CreatePostSubmitted,
    DeletePost(PostId),
    Reload,
}

impl UiEvent {
    /// Post the event is scoped to, if any
    pub fn post_id(&self) -> Option<PostId> {
        match self {
            UiEvent::LikeClicked(id) | UiEvent::DeletePost(id) => Some(*id),
            UiEvent::CommentInput { post_id, .. } | UiEvent::CommentSubmitted { post_id, .. } => {
                Some(*post_id)
            }
            _ => None,
        }
    }
}

/// Cloneable handle used by event sources to enqueue UI events
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<UiEvent>,
}

impl EventSender {
    pub async fn send(&self, event: UiEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| FeedError::EventLoopClosed)
    }
}

/// Create the event queue. Events are handled in the order they were sent.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<UiEvent>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventSender { tx }, rx)
}

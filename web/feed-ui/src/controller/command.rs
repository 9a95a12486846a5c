//! Optimistic like toggles as explicit mutation commands.
//!
//! A [`LikeCommand`] is created from what the document currently shows,
//! applied to the display right away, and then either confirmed against the
//! store's record or failed, in which case the compensating action puts the
//! previous visual state back and reveals the error indicator.

use crate::dom::Document;
use crate::error::{FeedError, Result};
use crate::models::{Post, PostId};
use crate::render::format::likes_label;
use crate::render::{ids, FILLED, LIKED, NOT_LIKED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Pending,
    Confirmed,
    Failed,
}

impl MutationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationStatus::Pending => "pending",
            MutationStatus::Confirmed => "confirmed",
            MutationStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeCommand {
    post_id: PostId,
    previous: bool,
    target: bool,
    status: MutationStatus,
    error: Option<String>,
}

impl LikeCommand {
    /// Build the toggle for `post_id` from the heart icon's current state
    pub fn from_document(doc: &Document, post_id: PostId) -> Result<Self> {
        let currently_liked = doc.element(&ids::like_icon(post_id))?.has_class(FILLED);
        Ok(Self::toggle(post_id, currently_liked))
    }

    pub fn toggle(post_id: PostId, currently_liked: bool) -> Self {
        Self {
            post_id,
            previous: currently_liked,
            target: !currently_liked,
            status: MutationStatus::Pending,
            error: None,
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn previous(&self) -> bool {
        self.previous
    }

    pub fn target(&self) -> bool {
        self.target
    }

    pub fn status(&self) -> MutationStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show the hoped-for state immediately
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        set_like_visual(doc, self.post_id, self.target)?;
        doc.element_mut(&ids::like_error(self.post_id))?.hide();
        Ok(())
    }

    /// Converge the display on the store's record. `None` means the store
    /// no longer knows the post; the optimistic state is left as is.
    pub fn confirm(&mut self, doc: &mut Document, record: Option<&Post>) -> Result<()> {
        if let Some(post) = record {
            set_like_visual(doc, self.post_id, post.liked_by_viewer)?;
            doc.element_mut(&ids::likes(self.post_id))?.text = likes_label(post.like_count);
        }
        self.status = MutationStatus::Confirmed;
        Ok(())
    }

    /// Compensating action: restore the previous visual state and surface
    /// the error indicator
    pub fn fail(&mut self, doc: &mut Document, err: &FeedError) -> Result<()> {
        set_like_visual(doc, self.post_id, self.previous)?;
        doc.element_mut(&ids::like_error(self.post_id))?.show();
        self.status = MutationStatus::Failed;
        self.error = Some(err.to_string());
        Ok(())
    }
}

/// Patch the like button and heart icon of one post
pub fn set_like_visual(doc: &mut Document, post_id: PostId, liked: bool) -> Result<()> {
    let icon = doc.element_mut(&ids::like_icon(post_id))?;
    if liked {
        icon.add_class(FILLED);
    } else {
        icon.remove_class(FILLED);
    }

    let button = doc.element_mut(&ids::like_button(post_id))?;
    if liked {
        button.remove_class(NOT_LIKED);
        button.add_class(LIKED);
    } else {
        button.remove_class(LIKED);
        button.add_class(NOT_LIKED);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, HIDDEN};
    use crate::render::{like_button_element, like_icon_element};

    fn doc_with_post(id: PostId, liked: bool) -> Document {
        let mut doc = Document::new();
        doc.insert(ids::like_button(id), like_button_element(liked));
        doc.insert(ids::like_icon(id), like_icon_element(liked));
        doc.insert(ids::likes(id), Element::new().with_text("10 likes"));
        doc.insert(ids::like_error(id), Element::with_classes([HIDDEN]));
        doc
    }

    fn record(id: PostId, liked: bool, count: u64) -> Post {
        use crate::models::Author;
        Post {
            id,
            author: Author {
                username: "a".to_string(),
                avatar_url: "b".to_string(),
            },
            image_url: "c".to_string(),
            caption: String::new(),
            location: None,
            like_count: count,
            liked_by_viewer: liked,
            comments: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_from_document_reads_current_state() {
        let doc = doc_with_post(1, true);
        let command = LikeCommand::from_document(&doc, 1).unwrap();
        assert!(command.previous());
        assert!(!command.target());
        assert_eq!(command.status(), MutationStatus::Pending);
    }

    #[test]
    fn test_apply_then_confirm() {
        let mut doc = doc_with_post(1, false);
        let mut command = LikeCommand::from_document(&doc, 1).unwrap();

        command.apply(&mut doc).unwrap();
        assert!(doc.element("like-icon-1").unwrap().has_class(FILLED));
        assert!(doc.element("like-btn-1").unwrap().has_class(LIKED));
        // the count waits for the store
        assert_eq!(doc.element("likes-1").unwrap().text, "10 likes");

        command.confirm(&mut doc, Some(&record(1, true, 11))).unwrap();
        assert_eq!(command.status(), MutationStatus::Confirmed);
        assert_eq!(doc.element("likes-1").unwrap().text, "11 likes");
    }

    #[test]
    fn test_fail_compensates() {
        let mut doc = doc_with_post(1, false);
        let mut command = LikeCommand::from_document(&doc, 1).unwrap();
        command.apply(&mut doc).unwrap();

        let err = FeedError::MutationRejected("like unavailable".to_string());
        command.fail(&mut doc, &err).unwrap();

        assert_eq!(command.status(), MutationStatus::Failed);
        assert_eq!(command.error(), Some("Mutation rejected: like unavailable"));
        assert!(!doc.element("like-icon-1").unwrap().has_class(FILLED));
        assert!(doc.element("like-btn-1").unwrap().has_class(NOT_LIKED));
        assert!(!doc.element("like-error-1").unwrap().is_hidden());
        assert_eq!(doc.element("likes-1").unwrap().text, "10 likes");
    }

    #[test]
    fn test_missing_post_in_document() {
        let doc = Document::new();
        assert!(matches!(
            LikeCommand::from_document(&doc, 5),
            Err(FeedError::ElementNotFound(_))
        ));
    }
}

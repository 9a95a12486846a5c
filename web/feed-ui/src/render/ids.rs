//! `data-id` identifiers shared by the renderer and the interaction controller.

use crate::models::PostId;

pub const POSTS_CONTAINER: &str = "posts-container";
pub const LOADING_PLACEHOLDER: &str = "loading-placeholder";
pub const CREATE_POST_MODAL: &str = "create-post-modal";
pub const IMAGE_PREVIEW: &str = "image-preview";
pub const PREVIEW_IMAGE: &str = "preview-image";
pub const CAPTION_INPUT: &str = "caption-input";
pub const LOCATION_INPUT: &str = "location-input";

pub const LIKE_BUTTON_PREFIX: &str = "like-btn-";

pub fn post(id: PostId) -> String {
    format!("post-{}", id)
}

pub fn post_options(id: PostId) -> String {
    format!("post-options-{}", id)
}

pub fn like_button(id: PostId) -> String {
    format!("{}{}", LIKE_BUTTON_PREFIX, id)
}

pub fn like_icon(id: PostId) -> String {
    format!("like-icon-{}", id)
}

pub fn like_error(id: PostId) -> String {
    format!("like-error-{}", id)
}

pub fn comment_button(id: PostId) -> String {
    format!("comment-btn-{}", id)
}

pub fn share_button(id: PostId) -> String {
    format!("share-btn-{}", id)
}

pub fn save_button(id: PostId) -> String {
    format!("save-btn-{}", id)
}

pub fn likes(id: PostId) -> String {
    format!("likes-{}", id)
}

pub fn comments(id: PostId) -> String {
    format!("comments-{}", id)
}

pub fn view_all_comments(id: PostId) -> String {
    format!("view-comments-{}", id)
}

pub fn comment_input(id: PostId) -> String {
    format!("comment-input-{}", id)
}

pub fn post_comment(id: PostId) -> String {
    format!("post-comment-{}", id)
}

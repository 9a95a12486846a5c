//! Feed rendering
//!
//! Turns post snapshots into markup fragments. Every interactive element
//! carries a `data-id` (see [`ids`]) and is also declared in the fragment's
//! element list so it can be registered in the [`Document`](crate::dom::Document).
//! Keyed elements enter the markup as slots, so the document's markup always
//! reflects their current state.

pub mod format;
pub mod ids;
pub mod time_ago;

use crate::config::FeedConfig;
use crate::dom::{attrs_slot, content_slot, expand_template, Element, HIDDEN};
use crate::models::Post;
use chrono::{DateTime, Utc};
use format::{html_escape, likes_label};

pub use time_ago::format_time_ago;

/// Like button color when the viewer has not liked the post
pub const NOT_LIKED: &str = "text-gray-700";
/// Like button color when the viewer has liked the post
pub const LIKED: &str = "text-red-500";
/// Heart icon fill when liked
pub const FILLED: &str = "fill-current";

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load posts";
pub const LIKE_FAILED_MESSAGE: &str = "Couldn't update like. Try again.";

/// Markup template plus the keyed elements it contains
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub html: String,
    pub elements: Vec<(String, Element)>,
}

impl Fragment {
    pub fn element(&self, data_id: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|(id, _)| id == data_id)
            .map(|(_, el)| el)
    }

    /// Markup with every slot filled from the fragment's own elements
    pub fn to_html(&self) -> String {
        expand_template(&self.html, &|id: &str| self.element(id))
    }

    /// Register `element` under `data_id` and return its attribute slot
    fn keyed(&mut self, data_id: String, element: Element) -> String {
        let attrs = attrs_slot(&data_id);
        self.elements.push((data_id, element));
        attrs
    }
}

pub fn like_button_element(liked: bool) -> Element {
    Element::with_classes(["hover:text-red-500", if liked { LIKED } else { NOT_LIKED }])
}

pub fn like_icon_element(liked: bool) -> Element {
    let mut icon = Element::with_classes(["w-6", "h-6"]);
    if liked {
        icon.add_class(FILLED);
    }
    icon
}

#[derive(Debug, Clone)]
pub struct FeedRenderer {
    comment_preview: usize,
}

impl Default for FeedRenderer {
    fn default() -> Self {
        Self::new(2)
    }
}

impl FeedRenderer {
    pub fn new(comment_preview: usize) -> Self {
        Self { comment_preview }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.comment_preview)
    }

    /// Render the whole feed in the given order
    pub fn render(&self, posts: &[Post], now: DateTime<Utc>) -> Fragment {
        let mut fragment = Fragment::default();
        for post in posts {
            self.render_post(post, now, &mut fragment);
        }
        fragment
    }

    /// Inline message shown in place of the feed when loading failed
    pub fn load_failure() -> Fragment {
        Fragment {
            html: format!(
                r#"<div class="text-center py-8 text-gray-500">{}</div>"#,
                LOAD_FAILED_MESSAGE
            ),
            elements: Vec::new(),
        }
    }

    /// Content of the `comments-{id}` block: the last few comments and a
    /// "View all" affordance when some are hidden
    pub fn render_comments(&self, post: &Post) -> Fragment {
        let mut fragment = Fragment::default();
        let total = post.comment_count();

        if total > self.comment_preview {
            let view_all = ids::view_all_comments(post.id);
            let attrs = fragment.keyed(
                view_all.clone(),
                Element::with_classes(["text-gray-500", "text-sm"])
                    .with_text(format!("View all {} comments", total)),
            );
            fragment.html.push_str(&format!(
                "<button {}>{}</button>",
                attrs,
                content_slot(&view_all)
            ));
        }

        for comment in post.recent_comments(self.comment_preview) {
            fragment.html.push_str(&format!(
                r#"<div class="text-sm"><span class="font-semibold">{}</span><span class="ml-1">{}</span></div>"#,
                html_escape(&comment.username),
                html_escape(&comment.text)
            ));
        }

        fragment
    }

    fn render_post(&self, post: &Post, now: DateTime<Utc>, out: &mut Fragment) {
        let id = post.id;
        let liked = post.liked_by_viewer;
        let username = html_escape(&post.author.username);
        let comments = self.render_comments(post);

        let article = out.keyed(
            ids::post(id),
            Element::with_classes(["bg-white", "border", "border-gray-200", "rounded-lg"]),
        );
        let options = out.keyed(
            ids::post_options(id),
            Element::with_classes(["text-gray-400", "hover:text-gray-600"]),
        );
        let like_btn = out.keyed(ids::like_button(id), like_button_element(liked));
        let like_icon = out.keyed(ids::like_icon(id), like_icon_element(liked));
        let comment_btn = out.keyed(ids::comment_button(id), action_button());
        let share_btn = out.keyed(ids::share_button(id), action_button());
        let save_btn = out.keyed(ids::save_button(id), action_button());
        let likes_attrs = out.keyed(
            ids::likes(id),
            Element::with_classes(["font-semibold", "text-sm", "mb-2"])
                .with_text(likes_label(post.like_count)),
        );
        let like_error = out.keyed(
            ids::like_error(id),
            Element::with_classes([HIDDEN, "text-xs", "text-red-500"])
                .with_text(LIKE_FAILED_MESSAGE),
        );
        let comments_attrs = out.keyed(
            ids::comments(id),
            Element::with_classes(["mt-2"]).with_inner_html(comments.html),
        );
        let input = out.keyed(
            ids::comment_input(id),
            Element::with_classes(["flex-1", "text-sm", "border-0"]),
        );
        let post_comment = out.keyed(
            ids::post_comment(id),
            Element::with_classes(["text-blue-500", "font-semibold", "text-sm", "ml-2"]),
        );
        out.elements.extend(comments.elements);

        out.html.push_str(&format!(
            r#"<article {article} data-runtime="true">
  <div class="flex items-center justify-between p-4">
    <div class="flex items-center space-x-3">
      <img src="{avatar}" alt="{username}" class="w-10 h-10 rounded-full object-cover">
      <div>
        <h3 class="font-semibold text-sm">{username}</h3>
        <p class="text-xs text-gray-500">{location}</p>
      </div>
    </div>
    <button {options}><i data-lucide="more-horizontal" class="w-5 h-5"></i></button>
  </div>
  <div class="aspect-square">
    <img src="{image}" alt="Post image" class="w-full h-full object-cover">
  </div>
  <div class="p-4">
    <div class="flex items-center justify-between mb-3">
      <div class="flex items-center space-x-4">
        <button {like_btn}><i {like_icon} data-lucide="heart"></i></button>
        <button {comment_btn}><i data-lucide="message-circle" class="w-6 h-6"></i></button>
        <button {share_btn}><i data-lucide="send" class="w-6 h-6"></i></button>
      </div>
      <button {save_btn}><i data-lucide="bookmark" class="w-6 h-6"></i></button>
    </div>
    <p {likes_attrs}>{likes}</p>
    <p {like_error}>{like_error_text}</p>
    <div class="text-sm">
      <span class="font-semibold">{username}</span>
      <span class="ml-1">{caption}</span>
    </div>
    <div {comments_attrs}>{comments_content}</div>
    <p class="text-xs text-gray-500 mt-2 uppercase">{time}</p>
    <div class="flex items-center mt-3 pt-3 border-t border-gray-100">
      <input type="text" placeholder="Add a comment..." {input}>
      <button {post_comment}>Post</button>
    </div>
  </div>
</article>
"#,
            avatar = html_escape(&post.author.avatar_url),
            location = html_escape(post.location.as_deref().unwrap_or("")),
            image = html_escape(&post.image_url),
            likes = content_slot(&ids::likes(id)),
            like_error_text = content_slot(&ids::like_error(id)),
            caption = html_escape(&post.caption),
            comments_content = content_slot(&ids::comments(id)),
            time = format_time_ago(now, post.created_at),
        ));
    }
}

fn action_button() -> Element {
    Element::with_classes([NOT_LIKED, "hover:text-blue-500"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Comment};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    fn post(id: u64, comments: usize, liked: bool) -> Post {
        Post {
            id,
            author: Author {
                username: "johndoe".to_string(),
                avatar_url: "https://example.com/avatar.jpg".to_string(),
            },
            image_url: "https://example.com/image.jpg".to_string(),
            caption: "Sunset <3".to_string(),
            location: Some("Rocky Mountains".to_string()),
            like_count: 1_342,
            liked_by_viewer: liked,
            comments: (1..=comments)
                .map(|i| Comment::new(format!("friend{}", i), format!("nice #{}", i)))
                .collect(),
            created_at: now() - Duration::hours(3),
        }
    }

    #[test]
    fn test_render_declares_keyed_elements() {
        let fragment = FeedRenderer::default().render(&[post(7, 0, false)], now());
        let html = fragment.to_html();

        for id in [
            "post-7",
            "post-options-7",
            "like-btn-7",
            "like-icon-7",
            "comment-btn-7",
            "share-btn-7",
            "save-btn-7",
            "likes-7",
            "like-error-7",
            "comments-7",
            "comment-input-7",
            "post-comment-7",
        ] {
            assert!(fragment.element(id).is_some(), "missing {}", id);
            assert!(
                html.contains(&format!(r#"data-id="{}""#, id)),
                "markup missing {}",
                id
            );
        }
    }

    #[test]
    fn test_render_post_content() {
        let fragment = FeedRenderer::default().render(&[post(1, 0, false)], now());
        let html = fragment.to_html();

        assert!(html.contains("johndoe"));
        assert!(html.contains("Rocky Mountains"));
        assert!(html.contains("1,342 likes"));
        assert!(html.contains("Sunset &lt;3"));
        assert!(html.contains("3h ago"));
        assert!(html.contains("Add a comment..."));
        assert_eq!(fragment.element("likes-1").unwrap().text, "1,342 likes");
        assert!(fragment.element("like-error-1").unwrap().is_hidden());
    }

    #[test]
    fn test_like_state_reflected() {
        let fragment =
            FeedRenderer::default().render(&[post(1, 0, true), post(2, 0, false)], now());

        let liked_btn = fragment.element("like-btn-1").unwrap();
        assert!(liked_btn.has_class(LIKED));
        assert!(!liked_btn.has_class(NOT_LIKED));
        assert!(fragment.element("like-icon-1").unwrap().has_class(FILLED));

        let btn = fragment.element("like-btn-2").unwrap();
        assert!(btn.has_class(NOT_LIKED));
        assert!(!fragment.element("like-icon-2").unwrap().has_class(FILLED));
    }

    #[test]
    fn test_only_last_two_comments_with_view_all() {
        let renderer = FeedRenderer::default();
        let fragment = renderer.render_comments(&post(1, 5, false));
        let html = fragment.to_html();

        assert!(html.contains("View all 5 comments"));
        assert!(fragment.element("view-comments-1").is_some());
        assert!(!html.contains("nice #3"));
        assert!(html.contains("nice #4"));
        assert!(html.contains("nice #5"));
    }

    #[test]
    fn test_two_comments_no_view_all() {
        let fragment = FeedRenderer::default().render_comments(&post(1, 2, false));
        let html = fragment.to_html();

        assert!(!html.contains("View all"));
        assert!(fragment.element("view-comments-1").is_none());
        assert!(html.contains("nice #1"));
        assert!(html.contains("nice #2"));
    }

    #[test]
    fn test_comment_preview_is_configurable() {
        let fragment = FeedRenderer::new(3).render_comments(&post(1, 4, false));
        let html = fragment.to_html();
        assert!(html.contains("View all 4 comments"));
        assert!(html.contains("nice #2"));
        assert!(!html.contains("nice #1<"));
    }

    #[test]
    fn test_render_preserves_order() {
        let fragment =
            FeedRenderer::default().render(&[post(3, 0, false), post(1, 0, false)], now());
        let html = fragment.to_html();
        let first = html.find(r#"data-id="post-3""#).unwrap();
        let second = html.find(r#"data-id="post-1""#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_feed() {
        let fragment = FeedRenderer::default().render(&[], now());
        assert!(fragment.html.is_empty());
        assert!(fragment.elements.is_empty());
    }

    #[test]
    fn test_markup_has_no_open_slots() {
        let fragment = FeedRenderer::default().render(&[post(1, 4, true)], now());
        let html = fragment.to_html();
        assert!(!html.contains(crate::dom::is_slot_delimiter));
        assert!(html.contains(r#"data-id="like-icon-1" class="fill-current h-6 w-6""#));
        assert!(html.contains(r#"<button data-id="view-comments-1" class="text-gray-500 text-sm">View all 4 comments</button>"#));
    }

    #[test]
    fn test_load_failure_placeholder() {
        let fragment = FeedRenderer::load_failure();
        assert!(fragment.html.contains(LOAD_FAILED_MESSAGE));
        assert!(fragment.elements.is_empty());
    }
}

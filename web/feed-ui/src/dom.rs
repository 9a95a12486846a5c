//! Render target addressed by `data-id`
//!
//! A flat registry of elements keyed by their `data-id`. Mounting a
//! [`Fragment`] into a container replaces the container's markup and
//! registers every keyed element the fragment declares; elements from a
//! previous mount of the same container are dropped first. The interaction
//! layer only ever reads and patches elements through their identifier.
//!
//! Container markup is a template: keyed elements appear in it as slots
//! (see [`attrs_slot`] and [`content_slot`]) and [`Document::html`] fills
//! them from the current element state, so a patched element shows up in
//! its container's markup without a re-render.

use crate::error::{FeedError, Result};
use crate::render::format::html_escape;
use crate::render::{ids, Fragment};
use std::collections::{BTreeSet, HashMap};

pub const HIDDEN: &str = "hidden";

const SLOT_OPEN: char = '\u{1}';
const SLOT_CLOSE: char = '\u{2}';
const ATTRS_SLOT: char = '@';
const CONTENT_SLOT: char = '#';

/// Placeholder for the `data-id`, `class` and `value` attributes of an element
pub fn attrs_slot(id: &str) -> String {
    format!("{}{}{}{}", SLOT_OPEN, ATTRS_SLOT, id, SLOT_CLOSE)
}

/// Placeholder for the content of an element: its own template when it has
/// one, otherwise its escaped text
pub fn content_slot(id: &str) -> String {
    format!("{}{}{}{}", SLOT_OPEN, CONTENT_SLOT, id, SLOT_CLOSE)
}

/// Characters reserved for slot delimiters; stripped from escaped text
pub fn is_slot_delimiter(c: char) -> bool {
    c == SLOT_OPEN || c == SLOT_CLOSE
}

/// Fill every slot of `template` from the elements `lookup` resolves.
/// Slots naming an unknown element expand to nothing.
pub(crate) fn expand_template<'a, F>(template: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<&'a Element>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(SLOT_OPEN) {
        out.push_str(&rest[..start]);
        let slot = &rest[start + SLOT_OPEN.len_utf8()..];
        let Some(end) = slot.find(SLOT_CLOSE) else {
            rest = "";
            break;
        };

        let mut chars = slot[..end].chars();
        let kind = chars.next();
        let id = chars.as_str();
        if let Some(element) = lookup(id) {
            match kind {
                Some(ATTRS_SLOT) => out.push_str(&element.attributes(id)),
                Some(CONTENT_SLOT) if !element.inner_html.is_empty() => {
                    out.push_str(&expand_template(&element.inner_html, lookup))
                }
                Some(CONTENT_SLOT) => out.push_str(&html_escape(&element.text)),
                _ => {}
            }
        }
        rest = &slot[end + SLOT_CLOSE.len_utf8()..];
    }

    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    classes: BTreeSet<String>,
    pub text: String,
    pub value: String,
    /// Markup template of the element's children, filled by [`Document::html`]
    pub inner_html: String,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Space separated class list for a `class` attribute
    pub fn class_attr(&self) -> String {
        self.classes().collect::<Vec<_>>().join(" ")
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN)
    }

    pub fn show(&mut self) {
        self.remove_class(HIDDEN);
    }

    pub fn hide(&mut self) {
        self.add_class(HIDDEN);
    }

    fn attributes(&self, id: &str) -> String {
        let mut attrs = format!(r#"data-id="{}" class="{}""#, id, self.class_attr());
        if !self.value.is_empty() {
            attrs.push_str(&format!(r#" value="{}""#, html_escape(&self.value)));
        }
        attrs
    }
}

#[derive(Debug, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
    /// container id -> ids registered by the last mount into it
    mounted: HashMap<String, Vec<String>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static skeleton of the home page: feed container, loading
    /// placeholder and the (hidden) create-post modal
    pub fn feed_page() -> Self {
        let mut doc = Self::new();
        doc.insert(ids::POSTS_CONTAINER, Element::with_classes(["space-y-6"]));
        doc.insert(
            ids::LOADING_PLACEHOLDER,
            Element::with_classes(["text-center", "py-8", "text-gray-500"])
                .with_text("Loading posts..."),
        );
        doc.insert(
            ids::CREATE_POST_MODAL,
            Element::with_classes(["fixed", "inset-0", HIDDEN]),
        );
        doc.insert(ids::IMAGE_PREVIEW, Element::with_classes([HIDDEN]));
        doc.insert(ids::PREVIEW_IMAGE, Element::new());
        doc.insert(ids::CAPTION_INPUT, Element::new());
        doc.insert(ids::LOCATION_INPUT, Element::new());
        doc
    }

    pub fn insert(&mut self, id: impl Into<String>, element: Element) -> Option<Element> {
        self.elements.insert(id.into(), element)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element(&self, id: &str) -> Result<&Element> {
        self.elements
            .get(id)
            .ok_or_else(|| FeedError::ElementNotFound(id.to_string()))
    }

    pub fn element_mut(&mut self, id: &str) -> Result<&mut Element> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| FeedError::ElementNotFound(id.to_string()))
    }

    /// Current markup of an element's children, slots filled from the
    /// registry
    pub fn html(&self, id: &str) -> Result<String> {
        let element = self.element(id)?;
        Ok(expand_template(&element.inner_html, &|child: &str| self.get(child)))
    }

    /// Remove an element together with anything mounted inside it
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.unmount_children(id);
        self.elements.remove(id)
    }

    /// Replace the content of `container_id` with `fragment`
    pub fn mount(&mut self, container_id: &str, fragment: Fragment) -> Result<()> {
        if !self.contains(container_id) {
            return Err(FeedError::ElementNotFound(container_id.to_string()));
        }
        self.unmount_children(container_id);

        let Fragment { html, elements } = fragment;
        let mut registered = Vec::with_capacity(elements.len());
        for (id, element) in elements {
            registered.push(id.clone());
            self.elements.insert(id, element);
        }

        self.element_mut(container_id)?.inner_html = html;
        self.mounted.insert(container_id.to_string(), registered);
        Ok(())
    }

    /// Identifiers starting with `prefix`, sorted (`[data-id^="prefix"]`)
    pub fn query_prefix(&self, prefix: &str) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .elements
            .keys()
            .map(String::as_str)
            .filter(|id| id.starts_with(prefix))
            .collect();
        found.sort_unstable();
        found
    }

    fn unmount_children(&mut self, container_id: &str) {
        if let Some(children) = self.mounted.remove(container_id) {
            for child in children {
                self.unmount_children(&child);
                self.elements.remove(&child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(html: &str, ids: &[&str]) -> Fragment {
        Fragment {
            html: html.to_string(),
            elements: ids
                .iter()
                .map(|id| (id.to_string(), Element::new()))
                .collect(),
        }
    }

    #[test]
    fn test_class_helpers() {
        let mut el = Element::with_classes(["w-6", "h-6"]);
        assert!(el.has_class("w-6"));
        el.add_class("fill-current");
        assert!(el.has_class("fill-current"));
        el.remove_class("fill-current");
        el.hide();
        assert!(el.is_hidden());
        el.show();
        assert_eq!(el.class_attr(), "h-6 w-6");
    }

    #[test]
    fn test_mount_registers_elements() {
        let mut doc = Document::feed_page();
        doc.mount(ids::POSTS_CONTAINER, fragment("<article/>", &["post-1", "likes-1"]))
            .unwrap();

        assert!(doc.contains("post-1"));
        assert!(doc.contains("likes-1"));
        assert_eq!(doc.element(ids::POSTS_CONTAINER).unwrap().inner_html, "<article/>");
    }

    #[test]
    fn test_remount_drops_previous_children() {
        let mut doc = Document::feed_page();
        doc.mount(ids::POSTS_CONTAINER, fragment("a", &["post-1", "comments-1"]))
            .unwrap();
        doc.mount("comments-1", fragment("c", &["view-comments-1"]))
            .unwrap();

        doc.mount(ids::POSTS_CONTAINER, fragment("b", &["post-2"])).unwrap();

        assert!(!doc.contains("post-1"));
        assert!(!doc.contains("comments-1"));
        assert!(!doc.contains("view-comments-1"));
        assert!(doc.contains("post-2"));
    }

    #[test]
    fn test_mount_into_missing_container() {
        let mut doc = Document::new();
        let err = doc.mount("nowhere", Fragment::default()).unwrap_err();
        assert!(matches!(err, FeedError::ElementNotFound(id) if id == "nowhere"));
    }

    #[test]
    fn test_html_follows_patched_elements() {
        let mut doc = Document::feed_page();
        let html = format!(
            "<p {}>{}</p><div {}>{}</div>",
            attrs_slot("likes-1"),
            content_slot("likes-1"),
            attrs_slot("comments-1"),
            content_slot("comments-1"),
        );
        let fragment = Fragment {
            html,
            elements: vec![
                (
                    "likes-1".to_string(),
                    Element::with_classes(["text-sm"]).with_text("1 likes"),
                ),
                ("comments-1".to_string(), Element::new()),
            ],
        };
        doc.mount(ids::POSTS_CONTAINER, fragment).unwrap();

        doc.element_mut("likes-1").unwrap().text = "2 likes".to_string();
        doc.element_mut("likes-1").unwrap().hide();
        let comments = Fragment {
            html: "<span>a &amp; b</span>".to_string(),
            elements: Vec::new(),
        };
        doc.mount("comments-1", comments).unwrap();

        assert_eq!(
            doc.html(ids::POSTS_CONTAINER).unwrap(),
            r#"<p data-id="likes-1" class="hidden text-sm">2 likes</p><div data-id="comments-1" class=""><span>a &amp; b</span></div>"#
        );
    }

    #[test]
    fn test_html_escapes_text_and_value() {
        let mut doc = Document::new();
        doc.insert(
            "box",
            Element::new().with_inner_html(format!(
                "<input {}><b>{}</b>",
                attrs_slot("field"),
                content_slot("label")
            )),
        );
        let mut field = Element::new();
        field.value = "<hi>".to_string();
        doc.insert("field", field);
        doc.insert("label", Element::new().with_text("a < b"));

        let html = doc.html("box").unwrap();
        assert!(html.contains(r#"data-id="field" class="" value="&lt;hi&gt;""#));
        assert!(html.contains("<b>a &lt; b</b>"));
    }

    #[test]
    fn test_html_skips_unknown_slots() {
        let mut doc = Document::new();
        doc.insert(
            "box",
            Element::new().with_inner_html(format!("[{}]", content_slot("gone"))),
        );
        assert_eq!(doc.html("box").unwrap(), "[]");
    }

    #[test]
    fn test_query_prefix() {
        let mut doc = Document::new();
        for id in ["like-btn-2", "like-btn-1", "likes-1", "post-1"] {
            doc.insert(id, Element::new());
        }
        assert_eq!(doc.query_prefix("like-btn-"), vec!["like-btn-1", "like-btn-2"]);
    }
}

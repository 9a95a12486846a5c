//! Text formatting shared by the feed markup.

use crate::dom::is_slot_delimiter;

/// Escape user-provided text for inclusion in markup or attribute values.
/// Template slot delimiters are dropped so text can never open a slot.
pub fn html_escape(value: &str) -> String {
    if value.contains(is_slot_delimiter) {
        let cleaned: String = value.chars().filter(|c| !is_slot_delimiter(*c)).collect();
        return v_htmlescape::escape(&cleaned).to_string();
    }
    v_htmlescape::escape(value).to_string()
}

/// Group digits in threes with commas (`1234567` -> `1,234,567`)
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Label shown under the action bar, e.g. `1,204 likes`
pub fn likes_label(count: u64) -> String {
    format!("{} likes", group_digits(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(34_200), "34,200");
        assert_eq!(group_digits(1_234_567), "1,234,567");
    }

    #[test]
    fn test_likes_label() {
        assert_eq!(likes_label(342), "342 likes");
        assert_eq!(likes_label(12_500), "12,500 likes");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>Tom & Jerry"), "&lt;b&gt;Tom &amp; Jerry");
        assert!(!html_escape(r#"" onerror="x"#).contains('"'));
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_html_escape_drops_slot_delimiters() {
        let forged = format!("hi{}", crate::dom::content_slot("likes-1"));
        let escaped = html_escape(&forged);
        assert!(!escaped.contains(is_slot_delimiter));
        assert!(escaped.starts_with("hi#likes-1"));
    }
}

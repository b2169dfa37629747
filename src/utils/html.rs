//! Helpers for the HTML fragments embedded in proforma and notice fields.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

static IMAGE_SRC: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"src="(extracted_images|timeline_images)/"#).ok());

static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Whether a field carries no content worth showing.
pub fn is_blank_html(html: &str) -> bool {
    let trimmed = html.trim();
    trimmed.is_empty() || trimmed == "<p><br></p>"
}

/// Point exported image references at the `/data/` directory.
pub fn rewrite_image_paths(html: &str) -> Cow<'_, str> {
    match IMAGE_SRC.as_ref() {
        Some(re) => re.replace_all(html, r#"src="/data/$1/"#),
        None => Cow::Borrowed(html),
    }
}

/// Text content of a fragment with whitespace collapsed.
pub fn to_plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    match WHITESPACE.as_ref() {
        Some(re) => re.replace_all(text.trim(), " ").into_owned(),
        None => text.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// Plain text of a field, or `None` when it is blank.
pub fn display_text(html: &str) -> Option<String> {
    if is_blank_html(html) {
        return None;
    }
    let text = to_plain_text(html);
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_html() {
        assert!(is_blank_html(""));
        assert!(is_blank_html("  <p><br></p> "));
        assert!(!is_blank_html("<p>Bond: none</p>"));
    }

    #[test]
    fn test_rewrite_image_paths() {
        let html = r#"<img src="extracted_images/a.png"><img src="timeline_images/b.png"><img src="https://x/c.png">"#;
        assert_eq!(
            rewrite_image_paths(html),
            r#"<img src="/data/extracted_images/a.png"><img src="/data/timeline_images/b.png"><img src="https://x/c.png">"#
        );
        assert!(matches!(rewrite_image_paths("<p>plain</p>"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            to_plain_text("<p>Base:  <b>12 LPA</b></p>\n<ul><li>Meals</li></ul>"),
            "Base: 12 LPA Meals"
        );
        assert_eq!(display_text("<p><br></p>"), None);
        assert_eq!(display_text("<p> </p>"), None);
        assert_eq!(display_text("24 LPA").as_deref(), Some("24 LPA"));
    }
}

//! Inline markdown: images, code spans, emphasis and links within one line

use lazy_static::lazy_static;
use regex::Regex;

use crate::helpers::escape_html;

/// Classes applied to every inline image
pub const IMAGE_CLASS: &str = "post-image";

lazy_static! {
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref CODE_RE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref STRONG_STAR_RE: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref STRONG_UNDERSCORE_RE: Regex = Regex::new(r"__([^_]+)__").unwrap();
    static ref EM_STAR_RE: Regex = Regex::new(r"\*([^*]+)\*").unwrap();
    static ref EM_UNDERSCORE_RE: Regex = Regex::new(r"_([^_]+)_").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
}

/// Render a single line of inline markdown to HTML.
///
/// The text is escaped first, then each rule runs once over the whole line
/// in priority order. Unterminated delimiters are left as literal text.
/// Later passes also see the markup of earlier ones, so emphasis markers
/// inside an image `src` are rewritten too.
pub fn render_inline(text: &str) -> String {
    let html = escape_html(text);

    let image = format!(
        r#"<img src="${{2}}" alt="${{1}}" class="{}" loading="lazy" decoding="async" />"#,
        IMAGE_CLASS
    );
    let html = IMAGE_RE.replace_all(&html, image.as_str());
    let html = CODE_RE.replace_all(&html, "<code>${1}</code>");
    let html = STRONG_STAR_RE.replace_all(&html, "<strong>${1}</strong>");
    let html = STRONG_UNDERSCORE_RE.replace_all(&html, "<strong>${1}</strong>");
    let html = EM_STAR_RE.replace_all(&html, "<em>${1}</em>");
    let html = EM_UNDERSCORE_RE.replace_all(&html, "<em>${1}</em>");
    let html = LINK_RE.replace_all(&html, r#"<a href="${2}">${1}</a>"#);

    html.into_owned()
}

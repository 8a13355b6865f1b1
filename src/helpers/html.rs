//! HTML and XML escaping

/// Substitutions shared by the HTML and XML escapers, applied in order.
/// Ampersand must come first so later entities are not re-escaped.
const ENTITIES: [(char, &str); 4] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
];

fn escape_with(s: &str, apostrophe: &str) -> String {
    let escaped = ENTITIES
        .iter()
        .fold(s.to_string(), |acc, (ch, entity)| acc.replace(*ch, entity));
    escaped.replace('\'', apostrophe)
}

/// Escape HTML special characters
///
/// # Examples
/// ```
/// use folio_rs::helpers::escape_html;
/// assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#39;x&#39;&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    escape_with(s, "&#39;")
}

/// Escape XML special characters (feed bodies and attributes)
pub fn escape_xml(s: &str) -> String {
    escape_with(s, "&apos;")
}

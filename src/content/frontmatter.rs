//! Front-matter parsing

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

lazy_static! {
    /// `---\n<metadata>\n---\n<body>`, metadata matched lazily so the first
    /// closing delimiter wins.
    static ref FRONTMATTER_RE: Regex = Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").unwrap();
}

/// Front-matter data from a post: flat `key: value` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: HashMap<String, String>,
}

impl FrontMatter {
    /// Split a document into its front-matter and trimmed body.
    ///
    /// Returns `None` when the document does not open with a `---` line or
    /// the block is never closed by a `---` line.
    pub fn parse(content: &str) -> Option<(Self, String)> {
        let content: Cow<'_, str> = if content.contains("\r\n") {
            Cow::Owned(content.replace("\r\n", "\n"))
        } else {
            Cow::Borrowed(content)
        };

        let captures = FRONTMATTER_RE.captures(&content)?;
        let block = captures.get(1).map_or("", |m| m.as_str());
        let body = captures.get(2).map_or("", |m| m.as_str()).trim();

        Some((Self::parse_block(block), body.to_string()))
    }

    /// Parse the lines between the delimiters.
    ///
    /// Lines without a colon and lines with an empty key are skipped; a
    /// repeated key keeps its last value.
    pub fn parse_block(block: &str) -> Self {
        let mut fields = HashMap::new();

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            fields.insert(key.to_string(), value.trim().to_string());
        }

        Self { fields }
    }

    /// Raw value of a key, including empty values
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value of a key, treating an empty value as absent
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: Hello World\ndate: 2024-01-15\n---\n\nThis is the content.\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some("Hello World"));
        assert_eq!(fm.get("date"), Some("2024-01-15"));
        assert_eq!(body, "This is the content.");
    }

    #[test]
    fn test_keys_and_values_are_trimmed() {
        let (fm, _) = FrontMatter::parse("---\n  title  :   Spaced Out  \n---\nbody").unwrap();
        assert_eq!(fm.get("title"), Some("Spaced Out"));
        assert_eq!(fm.len(), 1);
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let (fm, _) = FrontMatter::parse("---\nimage: https://cdn.example.com/a.png\n---\n").unwrap();
        assert_eq!(fm.get("image"), Some("https://cdn.example.com/a.png"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let (fm, _) = FrontMatter::parse("---\ntitle: First\ntitle: Second\n---\nbody").unwrap();
        assert_eq!(fm.get("title"), Some("Second"));
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let (fm, _) =
            FrontMatter::parse("---\njust some words\ntitle: T\n: orphan\n---\nbody").unwrap();
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get("title"), Some("T"));
    }

    #[test]
    fn test_empty_value_is_not_non_empty() {
        let (fm, _) = FrontMatter::parse("---\nslug:\n---\nbody").unwrap();
        assert_eq!(fm.get("slug"), Some(""));
        assert_eq!(fm.non_empty("slug"), None);
    }

    #[test]
    fn test_missing_closing_delimiter() {
        assert!(FrontMatter::parse("---\ntitle: T\n\n# Body").is_none());
    }

    #[test]
    fn test_missing_opening_delimiter() {
        assert!(FrontMatter::parse("title: T\n---\nbody").is_none());
        assert!(FrontMatter::parse("\n---\ntitle: T\n---\nbody").is_none());
    }

    #[test]
    fn test_closing_delimiter_must_end_its_line() {
        assert!(FrontMatter::parse("---\ntitle: T\n---").is_none());
    }

    #[test]
    fn test_first_closing_delimiter_wins() {
        let (fm, body) =
            FrontMatter::parse("---\ntitle: T\n---\nintro\n---\nnot: metadata\n").unwrap();
        assert_eq!(fm.get("not"), None);
        assert_eq!(body, "intro\n---\nnot: metadata");
    }

    #[test]
    fn test_crlf_documents() {
        let (fm, body) = FrontMatter::parse("---\r\ntitle: T\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(fm.get("title"), Some("T"));
        assert_eq!(body, "body");
    }
}

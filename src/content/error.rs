//! Content pipeline errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading and assembling posts.
///
/// Every per-document variant carries the document's fallback identifier so
/// a failed build points at the offending file.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Post \"{id}\" is missing frontmatter")]
    MissingFrontmatter { id: String },

    #[error("Post \"{id}\" is missing required frontmatter field `{field}`")]
    MissingRequiredField { id: String, field: &'static str },

    #[error("Post \"{id}\" has invalid date \"{date}\". Use YYYY-MM-DD.")]
    InvalidDateFormat { id: String, date: String },

    #[error("Slug \"{slug}\" is used by both \"{first}\" and \"{second}\"")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Slug \"{slug}\" cannot be used as a file name")]
    UnsafeSlug { slug: String },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid featured list {path:?}: {source}")]
    FeaturedList {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ContentError {
    /// Identifier of the document the error belongs to, if any
    pub fn document_id(&self) -> Option<&str> {
        match self {
            Self::MissingFrontmatter { id }
            | Self::MissingRequiredField { id, .. }
            | Self::InvalidDateFormat { id, .. } => Some(id),
            Self::UnsafeSlug { slug } => Some(slug),
            _ => None,
        }
    }
}

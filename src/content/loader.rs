//! Content providers - supply the raw post documents

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentError;

/// Fallback identifier used when a path has no usable file name
const UNTITLED: &str = "untitled";

/// A raw post document as read from its store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Location in the store (file path, asset key, ...)
    pub path: String,
    /// Identifier derived from the path, used as the default slug
    pub fallback_id: String,
    /// Full document text, front-matter included
    pub raw: String,
}

impl Document {
    /// Create a document, deriving its fallback identifier from the last
    /// path segment with the `.md` extension removed
    pub fn new(path: impl Into<String>, raw: impl Into<String>) -> Self {
        let path = path.into();
        let fallback_id = fallback_id(&path);
        Self {
            path,
            fallback_id,
            raw: raw.into(),
        }
    }
}

fn fallback_id(path: &str) -> String {
    let name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    let stem = name.strip_suffix(".md").unwrap_or(name);
    if stem.is_empty() {
        UNTITLED.to_string()
    } else {
        stem.to_string()
    }
}

/// Source of raw post documents.
///
/// The order of the returned documents is the tie-break order for posts
/// sharing a date.
pub trait ContentProvider {
    fn documents(&self) -> Result<Vec<Document>, ContentError>;
}

/// Loads `*.md` files from a single directory (not recursive)
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
}

impl DirectoryProvider {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ContentProvider for DirectoryProvider {
    fn documents(&self) -> Result<Vec<Document>, ContentError> {
        if !self.dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ContentError::Io {
                path: e.path().unwrap_or(self.dir.as_path()).to_path_buf(),
                source: e.into(),
            })?;
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            documents.push(Document::new(path.to_string_lossy(), raw));
        }

        tracing::debug!("Found {} documents in {:?}", documents.len(), self.dir);
        Ok(documents)
    }
}

/// In-memory document table, e.g. assets compiled in with `include_str!`.
/// Enumerates in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedProvider {
    files: IndexMap<String, String>,
}

impl EmbeddedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a static `(path, contents)` table
    pub fn from_static(files: &'static [(&'static str, &'static str)]) -> Self {
        files.iter().copied().collect()
    }

    /// Add or replace a document
    pub fn insert(&mut self, path: impl Into<String>, raw: impl Into<String>) {
        self.files.insert(path.into(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<P: Into<String>, R: Into<String>> FromIterator<(P, R)> for EmbeddedProvider {
    fn from_iter<I: IntoIterator<Item = (P, R)>>(iter: I) -> Self {
        let mut provider = Self::new();
        for (path, raw) in iter {
            provider.insert(path, raw);
        }
        provider
    }
}

impl ContentProvider for EmbeddedProvider {
    fn documents(&self) -> Result<Vec<Document>, ContentError> {
        Ok(self
            .files
            .iter()
            .map(|(path, raw)| Document::new(path.as_str(), raw.as_str()))
            .collect())
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}

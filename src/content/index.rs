//! Post index - listing, featuring and slug lookup
//!
//! Nothing is cached: every query re-reads the provider and re-assembles
//! every document, so the result is always a pure function of the current
//! document set and the featured order.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::loader::ContentProvider;
use super::{ContentError, MarkdownRenderer, Post, PostSummary};

/// Ordered list of slugs promoted to the featured group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturedOrder(Vec<String>);

impl FeaturedOrder {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(slugs.into_iter().map(Into::into).collect())
    }

    /// Load a JSON array of slugs. A missing file means nothing is featured.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No featured list at {:?}", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ContentError::FeaturedList {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn slugs(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.0.iter().any(|s| s == slug)
    }
}

/// Posts split for the home page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// Featured posts in featured-list order
    pub featured: Vec<PostSummary>,
    /// Every other post, newest first
    pub rest: Vec<PostSummary>,
}

/// All posts of a site, derived on demand from a content provider
pub struct PostIndex {
    provider: Box<dyn ContentProvider>,
    featured: FeaturedOrder,
    renderer: MarkdownRenderer,
}

impl PostIndex {
    pub fn new<P: ContentProvider + 'static>(
        provider: P,
        featured: FeaturedOrder,
        renderer: MarkdownRenderer,
    ) -> Self {
        Self {
            provider: Box::new(provider),
            featured,
            renderer,
        }
    }

    pub fn featured_order(&self) -> &FeaturedOrder {
        &self.featured
    }

    /// Summaries of every post, newest first.
    ///
    /// Dates compare as plain strings, which orders correctly because the
    /// format is fixed-width. The sort is stable, so posts sharing a date
    /// keep the provider's order. Fails on the first invalid document or on
    /// a slug claimed by two documents.
    pub fn list_all(&self) -> Result<Vec<PostSummary>, ContentError> {
        let documents = self.provider.documents()?;
        let mut owners: HashMap<String, String> = HashMap::with_capacity(documents.len());
        let mut posts = Vec::with_capacity(documents.len());

        for doc in documents {
            let post = Post::assemble(&doc.raw, &doc.fallback_id, &self.renderer)?;
            if let Some(first) = owners.insert(post.slug().to_string(), doc.path.clone()) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.summary.slug,
                    first,
                    second: doc.path,
                });
            }
            posts.push(PostSummary::from(post));
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));
        tracing::debug!("Listed {} posts", posts.len());

        Ok(posts)
    }

    /// The `limit` newest posts
    pub fn recent(&self, limit: usize) -> Result<Vec<PostSummary>, ContentError> {
        let mut posts = self.list_all()?;
        posts.truncate(limit);
        Ok(posts)
    }

    /// Every slug, in listing order. The build writes one page per slug.
    pub fn slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.list_all()?.into_iter().map(|p| p.slug).collect())
    }

    /// Split posts into the featured group (in featured-list order, unknown
    /// slugs dropped) and the rest (newest first)
    pub fn by_layout(&self) -> Result<Layout, ContentError> {
        let all = self.list_all()?;
        let featured_set: HashSet<&str> =
            self.featured.slugs().iter().map(String::as_str).collect();

        let by_slug: HashMap<&str, &PostSummary> =
            all.iter().map(|p| (p.slug.as_str(), p)).collect();
        let featured = self
            .featured
            .slugs()
            .iter()
            .filter_map(|slug| by_slug.get(slug.as_str()).map(|p| (*p).clone()))
            .collect();

        let rest = all
            .iter()
            .filter(|p| !featured_set.contains(p.slug.as_str()))
            .cloned()
            .collect();

        Ok(Layout { featured, rest })
    }

    /// Find a post by slug, re-parsing documents in provider order until one
    /// matches
    pub fn by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        for doc in self.provider.documents()? {
            let post = Post::assemble(&doc.raw, &doc.fallback_id, &self.renderer)?;
            if post.slug() == slug {
                return Ok(Some(post));
            }
        }

        tracing::debug!("No post with slug {:?}", slug);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{EmbeddedProvider, PlainHighlighter};
    use tempfile::TempDir;

    fn doc(title: &str, date: &str, extra: &str) -> String {
        format!("---\ntitle: {title}\ndate: {date}\ndescription: About {title}\n{extra}---\nBody of {title}\n")
    }

    fn index(files: Vec<(&str, String)>, featured: &[&str]) -> PostIndex {
        let provider: EmbeddedProvider = files.into_iter().collect();
        PostIndex::new(
            provider,
            FeaturedOrder::new(featured.iter().copied()),
            MarkdownRenderer::with_highlighter(PlainHighlighter),
        )
    }

    fn abc(featured: &[&str]) -> PostIndex {
        index(
            vec![
                ("posts/b.md", doc("B", "2024-02-01", "")),
                ("posts/a.md", doc("A", "2024-03-01", "")),
                ("posts/c.md", doc("C", "2024-01-01", "")),
            ],
            featured,
        )
    }

    fn slugs(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_list_all_sorted_newest_first() {
        let posts = abc(&[]).list_all().unwrap();
        assert_eq!(slugs(&posts), ["a", "b", "c"]);
        assert_eq!(posts[0].title, "A");
    }

    #[test]
    fn test_list_all_ties_keep_provider_order() {
        let idx = index(
            vec![
                ("z.md", doc("Z", "2024-01-01", "")),
                ("y.md", doc("Y", "2024-01-01", "")),
                ("x.md", doc("X", "2024-05-01", "")),
            ],
            &[],
        );
        assert_eq!(slugs(&idx.list_all().unwrap()), ["x", "z", "y"]);
    }

    #[test]
    fn test_list_all_fails_whole_batch() {
        let idx = index(
            vec![
                ("good.md", doc("Good", "2024-01-01", "")),
                ("bad.md", "no frontmatter here".to_string()),
            ],
            &[],
        );
        let err = idx.list_all().unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontmatter { ref id } if id == "bad"));
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let idx = index(
            vec![
                ("one.md", doc("One", "2024-01-01", "slug: same\n")),
                ("two.md", doc("Two", "2024-01-02", "slug: same\n")),
            ],
            &[],
        );
        let err = idx.list_all().unwrap_err();
        assert!(matches!(
            err,
            ContentError::DuplicateSlug { ref slug, ref first, ref second }
                if slug == "same" && first == "one.md" && second == "two.md"
        ));
    }

    #[test]
    fn test_recent_truncates() {
        let idx = abc(&[]);
        assert_eq!(slugs(&idx.recent(2).unwrap()), ["a", "b"]);
        assert_eq!(idx.recent(10).unwrap().len(), 3);
    }

    #[test]
    fn test_slugs_in_listing_order() {
        assert_eq!(abc(&[]).slugs().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn test_by_layout_follows_featured_order() {
        let layout = abc(&["c", "a"]).by_layout().unwrap();
        assert_eq!(slugs(&layout.featured), ["c", "a"]);
        assert_eq!(slugs(&layout.rest), ["b"]);
    }

    #[test]
    fn test_by_layout_drops_unknown_featured_slugs() {
        let layout = abc(&["ghost", "b"]).by_layout().unwrap();
        assert_eq!(slugs(&layout.featured), ["b"]);
        assert_eq!(slugs(&layout.rest), ["a", "c"]);
    }

    #[test]
    fn test_by_layout_without_featured() {
        let layout = abc(&[]).by_layout().unwrap();
        assert!(layout.featured.is_empty());
        assert_eq!(slugs(&layout.rest), ["a", "b", "c"]);
    }

    #[test]
    fn test_by_slug() {
        let idx = index(
            vec![
                ("first.md", doc("First", "2024-01-01", "")),
                ("second.md", doc("Second", "2024-01-02", "slug: custom\n")),
            ],
            &[],
        );

        let post = idx.by_slug("custom").unwrap().unwrap();
        assert_eq!(post.title(), "Second");
        assert_eq!(post.html, "<p>Body of Second</p>");

        assert!(idx.by_slug("second").unwrap().is_none());
        assert!(idx.by_slug("missing").unwrap().is_none());
    }

    #[test]
    fn test_by_slug_stops_at_first_match() {
        let idx = index(
            vec![
                ("first.md", doc("First", "2024-01-01", "")),
                ("broken.md", "---\ntitle: x\n".to_string()),
            ],
            &[],
        );
        assert!(idx.by_slug("first").unwrap().is_some());
        assert!(idx.by_slug("other").is_err());
    }

    #[test]
    fn test_featured_order_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("featured.json");
        fs::write(&path, r#"["c", "a"]"#).unwrap();

        let order = FeaturedOrder::load(&path).unwrap();
        assert_eq!(order.slugs(), ["c", "a"]);
        assert!(order.contains("a"));
        assert!(!order.contains("b"));

        assert_eq!(
            FeaturedOrder::load(dir.path().join("missing.json")).unwrap(),
            FeaturedOrder::default()
        );
    }

    #[test]
    fn test_featured_order_rejects_non_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("featured.json");
        fs::write(&path, r#"{"slugs": []}"#).unwrap();

        assert!(matches!(
            FeaturedOrder::load(&path),
            Err(ContentError::FeaturedList { .. })
        ));
    }
}

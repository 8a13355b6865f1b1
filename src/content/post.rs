//! Post models and assembly from raw documents

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ContentError, FrontMatter, MarkdownRenderer};

lazy_static! {
    /// Fixed-width `YYYY-MM-DD`; ASCII digits only
    static ref DATE_RE: Regex = Regex::new(r"\A[0-9]{4}-[0-9]{2}-[0-9]{2}\z").unwrap();
}

/// Listing data for a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Post title
    pub title: String,

    /// Publication date as written (`YYYY-MM-DD`)
    pub date: String,

    /// Short description for listings and feeds
    pub description: String,

    /// URL identifier, unique among posts
    pub slug: String,

    /// Cover image path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Accent color tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A blog post with its rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Rendered HTML content
    pub html: String,
}

impl Post {
    /// Parse, validate and render a raw document.
    ///
    /// `fallback_id` becomes the slug when the front-matter has none and
    /// identifies the document in errors.
    pub fn assemble(
        raw: &str,
        fallback_id: &str,
        renderer: &MarkdownRenderer,
    ) -> Result<Self, ContentError> {
        let (fm, body) =
            FrontMatter::parse(raw).ok_or_else(|| ContentError::MissingFrontmatter {
                id: fallback_id.to_string(),
            })?;

        let required = |field: &'static str| {
            fm.non_empty(field)
                .ok_or_else(|| ContentError::MissingRequiredField {
                    id: fallback_id.to_string(),
                    field,
                })
        };
        let title = required("title")?;
        let date = required("date")?;
        let description = required("description")?;

        if !DATE_RE.is_match(date) {
            return Err(ContentError::InvalidDateFormat {
                id: fallback_id.to_string(),
                date: date.to_string(),
            });
        }

        let summary = PostSummary {
            title: title.to_string(),
            date: date.to_string(),
            description: description.to_string(),
            slug: fm.non_empty("slug").unwrap_or(fallback_id).to_string(),
            image: fm.non_empty("image").map(str::to_string),
            color: fm.non_empty("color").map(str::to_string),
        };

        tracing::debug!("Assembled post {:?} from {}", summary.slug, fallback_id);

        Ok(Self {
            html: renderer.render(&body),
            summary,
        })
    }

    pub fn slug(&self) -> &str {
        &self.summary.slug
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    pub fn date(&self) -> &str {
        &self.summary.date
    }
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        post.summary
    }
}

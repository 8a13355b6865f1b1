//! Generator module - writes rendered posts, listings and the feed

pub mod feed;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::{ContentError, Post, PostIndex, PostSummary};
use crate::Folio;

/// Page metadata for a post detail page (title, description, share image, URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMeta {
    pub title: String,
    pub description: String,
    /// Absolute URL of the post's cover image, or of the site default
    pub image: String,
    pub url: String,
}

impl PostMeta {
    pub fn new(config: &SiteConfig, post: &PostSummary) -> Self {
        let image = post.image.as_deref().unwrap_or(&config.default_og_image);
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            image: format!("{}{}", config.base_url(), image),
            url: config.post_url(&post.slug),
        }
    }
}

/// Listing data written to `posts.json`
#[derive(Debug, Serialize)]
struct SiteIndex<'a> {
    posts: &'a [PostSummary],
    recent: &'a [PostSummary],
    featured: &'a [PostSummary],
    rest: &'a [PostSummary],
}

/// Detail page data written next to each post fragment
#[derive(Debug, Serialize)]
struct PostPage<'a> {
    post: &'a Post,
    meta: PostMeta,
}

/// Build output generator
pub struct Generator {
    folio: Folio,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
        }
    }

    /// Generate every output file from the index
    pub fn generate(&self, index: &PostIndex) -> Result<()> {
        let config = &self.folio.config;
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let posts = index.list_all()?;
        let layout = index.by_layout()?;
        let recent = &posts[..posts.len().min(config.home_posts)];

        let site_index = SiteIndex {
            posts: &posts,
            recent,
            featured: &layout.featured,
            rest: &layout.rest,
        };
        write_json(&public_dir.join("posts.json"), &site_index)?;
        tracing::info!("Generated posts.json");

        let slugs = index.slugs()?;
        for slug in &slugs {
            check_slug(slug)?;
        }

        let blog_dir = public_dir.join(config.blog_dir.trim_matches('/'));
        fs::create_dir_all(&blog_dir)
            .with_context(|| format!("Failed to create {:?}", blog_dir))?;

        for slug in &slugs {
            let post = index
                .by_slug(slug)?
                .with_context(|| format!("Post {:?} disappeared while generating", slug))?;

            let html_path = blog_dir.join(format!("{}.html", slug));
            fs::write(&html_path, &post.html)
                .with_context(|| format!("Failed to write {:?}", html_path))?;

            let page = PostPage {
                meta: PostMeta::new(config, &post.summary),
                post: &post,
            };
            write_json(&blog_dir.join(format!("{}.json", slug)), &page)?;
        }
        tracing::info!("Generated {} post pages", slugs.len());

        let rss_path = public_dir.join("rss.xml");
        fs::write(&rss_path, feed::render_rss(config, &posts))
            .with_context(|| format!("Failed to write {:?}", rss_path))?;
        tracing::info!("Generated rss.xml");

        Ok(())
    }
}

/// A slug names a file directly under the blog directory
fn check_slug(slug: &str) -> Result<(), ContentError> {
    let unsafe_name = slug.is_empty()
        || slug.starts_with('.')
        || slug.contains("..")
        || slug.contains(|c: char| c == '/' || c == '\\');
    if unsafe_name {
        return Err(ContentError::UnsafeSlug {
            slug: slug.to_string(),
        });
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

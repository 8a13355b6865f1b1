//! folio-rs: a markdown blog content pipeline
//!
//! This crate turns front-matter markdown posts into validated post records
//! and rendered HTML fragments, and derives the listings, featured layout
//! and RSS feed a blog front end needs.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;

use anyhow::Result;
use std::path::Path;

use content::{
    DirectoryProvider, FeaturedOrder, MarkdownRenderer, PlainHighlighter, PostIndex,
    SyntectHighlighter,
};

/// The main Folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the post markdown files
    pub posts_dir: std::path::PathBuf,
    /// Featured slugs file
    pub featured_path: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let featured_path = base_dir.join(&config.featured_file);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            featured_path,
            public_dir,
        })
    }

    /// Markdown renderer configured from the highlight settings
    pub fn renderer(&self) -> MarkdownRenderer {
        let highlight = &self.config.highlight;
        if highlight.enable {
            MarkdownRenderer::with_highlighter(SyntectHighlighter::with_options(
                highlight.auto_detect,
            ))
        } else {
            MarkdownRenderer::with_highlighter(PlainHighlighter)
        }
    }

    /// Build the post index over the posts directory and featured list
    pub fn index(&self) -> Result<PostIndex> {
        let featured = FeaturedOrder::load(&self.featured_path)?;
        Ok(PostIndex::new(
            DirectoryProvider::new(&self.posts_dir),
            featured,
            self.renderer(),
        ))
    }

    /// Generate the build output
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

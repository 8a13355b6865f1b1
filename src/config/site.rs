//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,
    /// Open Graph image for posts without their own cover image
    pub default_og_image: String,

    // Directory
    pub posts_dir: String,
    /// JSON array of featured slugs
    pub featured_file: String,
    pub public_dir: String,
    pub blog_dir: String,

    // Home page
    pub home_posts: usize,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            url: "http://example.com".to_string(),
            default_og_image: "/og-default.png".to_string(),

            posts_dir: "content/posts".to_string(),
            featured_file: "content/featured.json".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "blog".to_string(),

            home_posts: 5,

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL of a post page
    pub fn post_url(&self, slug: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url(),
            self.blog_dir.trim_matches('/'),
            slug
        )
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Guess a grammar for code blocks without a recognized language
    pub auto_detect: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            auto_detect: true,
        }
    }
}

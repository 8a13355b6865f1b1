//! Print a single post or the feed

use anyhow::{anyhow, Result};

use crate::generator::feed;
use crate::Folio;

/// Print the rendered HTML of the post with `slug`
pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    let post = folio
        .index()?
        .by_slug(slug)?
        .ok_or_else(|| anyhow!("Post not found: {}", slug))?;

    println!("{}", post.html);
    Ok(())
}

/// Print the RSS feed
pub fn feed(folio: &Folio) -> Result<()> {
    let posts = folio.index()?.list_all()?;
    println!("{}", feed::render_rss(&folio.config, &posts));
    Ok(())
}

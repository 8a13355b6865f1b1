//! List site content

use anyhow::Result;

use crate::content::PostSummary;
use crate::Folio;

/// List posts, newest first
pub fn run(folio: &Folio, limit: Option<usize>) -> Result<()> {
    let index = folio.index()?;
    let posts = match limit {
        Some(limit) => index.recent(limit)?,
        None => index.list_all()?,
    };

    println!("Posts ({}):", posts.len());
    for post in &posts {
        print_post(post);
    }

    Ok(())
}

/// List posts grouped as the home page shows them
pub fn featured(folio: &Folio) -> Result<()> {
    let layout = folio.index()?.by_layout()?;

    println!("Featured ({}):", layout.featured.len());
    for post in &layout.featured {
        print_post(post);
    }

    println!("Rest ({}):", layout.rest.len());
    for post in &layout.rest {
        print_post(post);
    }

    Ok(())
}

fn print_post(post: &PostSummary) {
    println!("  {} - {} [{}]", post.date, post.title, post.slug);
}

//! Generate the build output

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Render every post and write listings, fragments and the feed
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let index = folio.index()?;
    tracing::info!(
        "Loading posts from {:?} ({} featured)",
        folio.posts_dir,
        index.featured_order().slugs().len()
    );

    Generator::new(folio).generate(&index)?;

    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());

    Ok(())
}

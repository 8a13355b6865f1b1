//! RSS 2.0 feed generation

use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::{escape_xml, rfc822_date};

/// Render an RSS 2.0 document listing `posts` in the given order
pub fn render_rss(config: &SiteConfig, posts: &[PostSummary]) -> String {
    let items: String = posts.iter().map(|post| render_item(config, post)).collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<rss version=\"2.0\">\n  <channel>\n    <title>{}</title>\n    <link>{}</link>\n    <description>{}</description>{}\n  </channel>\n</rss>",
        escape_xml(&config.title),
        escape_xml(&config.url),
        escape_xml(&config.description),
        items
    )
}

fn render_item(config: &SiteConfig, post: &PostSummary) -> String {
    let link = escape_xml(&config.post_url(&post.slug));
    // A date that passed validation but is not a real day goes out as written
    let pub_date = rfc822_date(&post.date).unwrap_or_else(|| post.date.clone());

    format!(
        "\n    <item>\n      <title>{}</title>\n      <link>{}</link>\n      <description>{}</description>\n      <pubDate>{}</pubDate>\n      <guid>{}</guid>\n    </item>",
        escape_xml(&post.title),
        link,
        escape_xml(&post.description),
        escape_xml(&pub_date),
        link
    )
}

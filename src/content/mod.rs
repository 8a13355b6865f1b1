//! Content module - parses, renders and indexes posts

mod error;
mod frontmatter;
mod highlight;
mod index;
mod inline;
pub mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use highlight::{Highlighted, Highlighter, PlainHighlighter, SyntectHighlighter};
pub use index::{FeaturedOrder, Layout, PostIndex};
pub use inline::render_inline;
pub use loader::{ContentProvider, DirectoryProvider, Document, EmbeddedProvider};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary};

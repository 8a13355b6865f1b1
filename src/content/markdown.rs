//! Block-level markdown rendering
//!
//! A line-oriented state machine. Each source line is classified in a fixed
//! order (fence, table, blank, blockquote, heading, list item, paragraph) and
//! either emits an HTML fragment or feeds one of the multi-line
//! accumulators. Fragments are joined with newlines.

use super::highlight::{Highlighter, SyntectHighlighter};
use super::inline::render_inline;

const FENCE: &str = "```";

/// Markdown renderer with syntax highlighting for fenced code
pub struct MarkdownRenderer {
    highlighter: Box<dyn Highlighter>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer using syntect
    pub fn new() -> Self {
        Self::with_highlighter(SyntectHighlighter::new())
    }

    /// Create with a custom highlighter
    pub fn with_highlighter<H: Highlighter + 'static>(highlighter: H) -> Self {
        Self {
            highlighter: Box::new(highlighter),
        }
    }

    /// Render a post body to HTML
    pub fn render(&self, markdown: &str) -> String {
        let mut state = BlockState::new(self.highlighter.as_ref());

        for raw_line in markdown.lines() {
            state.push_line(raw_line);
        }

        state.finish()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// An open fenced code block
struct Fence {
    lang: String,
    lines: Vec<String>,
}

/// Accumulators for the blocks that span several lines
struct BlockState<'h> {
    highlighter: &'h dyn Highlighter,
    html: Vec<String>,
    fence: Option<Fence>,
    list: Option<Vec<String>>,
    quote: Option<Vec<String>>,
    table: Option<Vec<String>>,
}

impl<'h> BlockState<'h> {
    fn new(highlighter: &'h dyn Highlighter) -> Self {
        Self {
            highlighter,
            html: Vec::new(),
            fence: None,
            list: None,
            quote: None,
            table: None,
        }
    }

    fn push_line(&mut self, raw_line: &str) {
        let line = raw_line.trim();

        // An open fence swallows everything until its closing line
        if let Some(fence) = self.fence.as_mut() {
            if line == FENCE {
                self.close_fence();
            } else {
                fence.lines.push(raw_line.to_string());
            }
            return;
        }

        if let Some(lang) = line.strip_prefix(FENCE) {
            self.close_all();
            self.fence = Some(Fence {
                lang: lang.trim().to_string(),
                lines: Vec::new(),
            });
            return;
        }

        if is_table_row(line) {
            self.close_list();
            self.close_quote();
            self.table.get_or_insert_with(Vec::new).push(line.to_string());
            return;
        }
        self.close_table();

        if line.is_empty() {
            self.close_list();
            self.close_quote();
            return;
        }

        if let Some(content) = quote_content(line) {
            self.close_list();
            let lines = self.quote.get_or_insert_with(Vec::new);
            if !content.is_empty() {
                lines.push(render_inline(content));
            }
            return;
        }

        if let Some((level, text)) = heading(line) {
            self.close_list();
            self.close_quote();
            self.html
                .push(format!("<h{level}>{}</h{level}>", render_inline(text)));
            return;
        }

        if let Some(item) = line.strip_prefix("- ") {
            self.close_quote();
            self.list
                .get_or_insert_with(Vec::new)
                .push(format!("<li>{}</li>", render_inline(item)));
            return;
        }

        self.close_all();
        self.html.push(format!("<p>{}</p>", render_inline(line)));
    }

    fn finish(mut self) -> String {
        self.close_all();

        if let Some(fence) = self.fence.take() {
            tracing::warn!(
                "Dropping unterminated code block ({} lines, lang {:?})",
                fence.lines.len(),
                fence.lang
            );
        }

        self.html.join("\n")
    }

    fn close_all(&mut self) {
        self.close_list();
        self.close_quote();
        self.close_table();
    }

    fn close_fence(&mut self) {
        let Some(fence) = self.fence.take() else {
            return;
        };

        let code = fence.lines.join("\n");
        let highlighted = self
            .highlighter
            .render(&code, Some(fence.lang.as_str()));
        let class = match highlighted.language {
            Some(lang) => format!("hljs language-{}", lang),
            None => "hljs".to_string(),
        };

        self.html.push(format!(
            r#"<pre><code class="{}">{}</code></pre>"#,
            class, highlighted.markup
        ));
    }

    fn close_list(&mut self) {
        if let Some(items) = self.list.take() {
            self.html.push(format!("<ul>{}</ul>", items.join("\n")));
        }
    }

    fn close_quote(&mut self) {
        if let Some(lines) = self.quote.take() {
            if !lines.is_empty() {
                self.html.push(format!(
                    "<blockquote><p>{}</p></blockquote>",
                    lines.join("<br>")
                ));
            }
        }
    }

    fn close_table(&mut self) {
        if let Some(rows) = self.table.take() {
            self.html.push(render_table(&rows));
        }
    }
}

fn is_table_row(line: &str) -> bool {
    line.starts_with('|') && line.ends_with('|')
}

/// Content of a blockquote line (`>` alone or `> text`)
fn quote_content(line: &str) -> Option<&str> {
    if line == ">" {
        Some("")
    } else {
        line.strip_prefix("> ")
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    [("### ", 3), ("## ", 2), ("# ", 1)]
        .into_iter()
        .find_map(|(prefix, level)| line.strip_prefix(prefix).map(|text| (level, text)))
}

fn split_cells(row: &str) -> Vec<&str> {
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(str::trim).collect()
}

/// Render accumulated table rows. Row 0 is the header, row 1 the separator
/// (dropped), and the rest are body rows.
fn render_table(rows: &[String]) -> String {
    if rows.len() < 2 {
        return rows
            .iter()
            .map(|row| format!("<p>{}</p>", render_inline(row)))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let header: String = split_cells(&rows[0])
        .into_iter()
        .map(|cell| format!("<th>{}</th>", render_inline(cell)))
        .collect();

    let body: String = rows[2..]
        .iter()
        .map(|row| {
            let cells: String = split_cells(row)
                .into_iter()
                .map(|cell| format!("<td>{}</td>", render_inline(cell)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        r#"<div class="table-wrapper"><table><thead><tr>{}</tr></thead><tbody>{}</tbody></table></div>"#,
        header, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::highlight::PlainHighlighter;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::with_highlighter(PlainHighlighter).render(markdown)
    }

    /// Recognizes every hint and tags its output, so tests can see which
    /// path the renderer took
    struct TaggingHighlighter;

    impl Highlighter for TaggingHighlighter {
        fn supports(&self, lang: &str) -> bool {
            lang != "unknown"
        }

        fn highlight(&self, code: &str, lang: &str) -> String {
            format!("[{}]{}", lang, code)
        }

        fn highlight_auto(&self, code: &str) -> String {
            format!("[auto]{}", code)
        }
    }

    #[test]
    fn test_headings_and_paragraphs() {
        assert_eq!(
            render("# One\n## Two\n### Three\nText here."),
            "<h1>One</h1>\n<h2>Two</h2>\n<h3>Three</h3>\n<p>Text here.</p>"
        );
    }

    #[test]
    fn test_heading_needs_space() {
        assert_eq!(render("#tag"), "<p>#tag</p>");
        assert_eq!(render("#### Four"), "<p>#### Four</p>");
    }

    #[test]
    fn test_each_line_is_its_own_paragraph() {
        assert_eq!(render("first\nsecond"), "<p>first</p>\n<p>second</p>");
    }

    #[test]
    fn test_list_closes_on_blank_line() {
        assert_eq!(
            render("- a\n- b\n\nc"),
            "<ul><li>a</li>\n<li>b</li></ul>\n<p>c</p>"
        );
    }

    #[test]
    fn test_list_closes_on_paragraph_and_heading() {
        assert_eq!(
            render("- a\nafter"),
            "<ul><li>a</li></ul>\n<p>after</p>"
        );
        assert_eq!(
            render("- a\n## H"),
            "<ul><li>a</li></ul>\n<h2>H</h2>"
        );
    }

    #[test]
    fn test_list_flushed_at_end() {
        assert_eq!(render("- **x**"), "<ul><li><strong>x</strong></li></ul>");
    }

    #[test]
    fn test_blockquote_joins_lines() {
        assert_eq!(
            render("> one\n>\n> two\n\nafter"),
            "<blockquote><p>one<br>two</p></blockquote>\n<p>after</p>"
        );
    }

    #[test]
    fn test_blockquote_and_list_close_each_other() {
        assert_eq!(
            render("> quote\n- item\n> again"),
            "<blockquote><p>quote</p></blockquote>\n<ul><li>item</li></ul>\n<blockquote><p>again</p></blockquote>"
        );
    }

    #[test]
    fn test_empty_blockquote_emits_nothing() {
        assert_eq!(render(">\n>\n\ntext"), "<p>text</p>");
    }

    #[test]
    fn test_table() {
        assert_eq!(
            render("|A|B|\n|-|-|\n|1|2|"),
            r#"<div class="table-wrapper"><table><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr><td>1</td><td>2</td></tr></tbody></table></div>"#
        );
    }

    #[test]
    fn test_table_cells_are_trimmed_and_inline_rendered() {
        let html = render("| Name | Notes |\n| --- | --- |\n| `x` | *soft* |\n| y | z |\nafter");
        assert!(html.contains("<th>Name</th><th>Notes</th>"));
        assert!(html.contains("<tr><td><code>x</code></td><td><em>soft</em></td></tr>"));
        assert!(html.contains("<tr><td>y</td><td>z</td></tr>"));
        assert!(!html.contains("---"));
        assert!(html.ends_with("</table></div>\n<p>after</p>"));
    }

    #[test]
    fn test_single_table_row_is_a_paragraph() {
        assert_eq!(render("|lonely|"), "<p>|lonely|</p>");
    }

    #[test]
    fn test_fence_with_known_language() {
        let renderer = MarkdownRenderer::with_highlighter(TaggingHighlighter);
        assert_eq!(
            renderer.render("```rust\nfn main() {}\n    indented\n```"),
            r#"<pre><code class="hljs language-rust">[rust]fn main() {}
    indented</code></pre>"#
        );
    }

    #[test]
    fn test_fence_without_language_auto_detects() {
        let renderer = MarkdownRenderer::with_highlighter(TaggingHighlighter);
        assert_eq!(
            renderer.render("```\ncode\n```"),
            r#"<pre><code class="hljs">[auto]code</code></pre>"#
        );
        assert_eq!(
            renderer.render("```unknown\ncode\n```"),
            r#"<pre><code class="hljs">[auto]code</code></pre>"#
        );
    }

    #[test]
    fn test_fence_contents_are_not_markdown() {
        assert_eq!(
            render("```\n# not a heading\n- not a list\n\n|a|b|\n```"),
            "<pre><code class=\"hljs\"># not a heading\n- not a list\n\n|a|b|</code></pre>"
        );
    }

    #[test]
    fn test_fence_escapes_code() {
        assert_eq!(
            render("```\n<b>&</b>\n```"),
            r#"<pre><code class="hljs">&lt;b&gt;&amp;&lt;/b&gt;</code></pre>"#
        );
    }

    #[test]
    fn test_fence_closes_open_list() {
        assert_eq!(
            render("- a\n```\nx\n```"),
            "<ul><li>a</li></ul>\n<pre><code class=\"hljs\">x</code></pre>"
        );
    }

    #[test]
    fn test_unterminated_fence_is_dropped() {
        assert_eq!(render("before\n```rust\nlet x = 1;\n"), "<p>before</p>");
    }

    #[test]
    fn test_syntect_fence() {
        let html = MarkdownRenderer::new().render("```rust\nlet x = 1;\n```");
        assert!(html.starts_with(r#"<pre><code class="hljs language-rust">"#));
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n"), "");
    }
}

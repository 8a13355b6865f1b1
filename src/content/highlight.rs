//! Syntax highlighting for fenced code blocks

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::helpers::escape_html;

/// Prefix for the classes emitted on highlighted spans
const CLASS_PREFIX: &str = "hljs-";

/// Highlighted markup for a code block, without the surrounding `<pre>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub markup: String,
    /// Language class to put on the `<code>` element, set only when the
    /// caller's hint was honored
    pub language: Option<String>,
}

/// A syntax highlighter invoked for fenced code blocks
pub trait Highlighter {
    /// Whether an explicit language hint is recognized
    fn supports(&self, lang: &str) -> bool;

    /// Highlight with the grammar for `lang`
    fn highlight(&self, code: &str, lang: &str) -> String;

    /// Highlight with a best-guess grammar
    fn highlight_auto(&self, code: &str) -> String;

    /// Highlight using the hint when it is recognized, falling back to
    /// auto-detection otherwise. Never fails.
    fn render(&self, code: &str, hint: Option<&str>) -> Highlighted {
        match hint.map(str::trim).filter(|lang| !lang.is_empty()) {
            Some(lang) if self.supports(lang) => Highlighted {
                markup: self.highlight(code, lang),
                language: Some(lang.to_string()),
            },
            _ => Highlighted {
                markup: self.highlight_auto(code),
                language: None,
            },
        }
    }
}

/// Highlighter backed by syntect's bundled grammars, emitting class-based
/// spans so styling stays in the stylesheet
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    auto_detect: bool,
}

impl SyntectHighlighter {
    /// Create a highlighter with the default grammars
    pub fn new() -> Self {
        Self::with_options(true)
    }

    /// Create with custom settings.
    ///
    /// With `auto_detect` off, unhinted blocks are rendered as plain text.
    pub fn with_options(auto_detect: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            auto_detect,
        }
    }

    fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
    }

    fn highlight_with(&self, code: &str, syntax: &SyntaxReference) -> String {
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            },
        );

        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!("Highlighting failed for {}: {}", syntax.name, e);
                return escape_html(code);
            }
        }

        generator.finalize()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn supports(&self, lang: &str) -> bool {
        self.find_syntax(lang).is_some()
    }

    fn highlight(&self, code: &str, lang: &str) -> String {
        match self.find_syntax(lang) {
            Some(syntax) => self.highlight_with(code, syntax),
            None => self.highlight_auto(code),
        }
    }

    fn highlight_auto(&self, code: &str) -> String {
        let detected = if self.auto_detect {
            code.lines()
                .next()
                .and_then(|first| self.syntax_set.find_syntax_by_first_line(first))
        } else {
            None
        };

        match detected {
            Some(syntax) => {
                tracing::debug!("Auto-detected {} for code block", syntax.name);
                self.highlight_with(code, syntax)
            }
            None => escape_html(code),
        }
    }
}

/// Highlighter that only escapes; used when highlighting is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn supports(&self, _lang: &str) -> bool {
        false
    }

    fn highlight(&self, code: &str, _lang: &str) -> String {
        escape_html(code)
    }

    fn highlight_auto(&self, code: &str) -> String {
        escape_html(code)
    }
}

//! Markdown to HTML conversion.

use pulldown_cmark::{html, Options, Parser};

/// Turns markdown text into an HTML fragment.
pub trait MarkdownConverter: Send + Sync {
    /// Converter identifier (e.g., "cmark")
    fn name(&self) -> &'static str;

    /// Convert markdown source to HTML.
    fn to_html(&self, source: &str) -> String;
}

/// CommonMark converter with the common GitHub-style extensions enabled.
#[derive(Debug, Clone)]
pub struct CmarkConverter {
    options: Options,
}

impl CmarkConverter {
    /// Create a converter with tables, footnotes, strikethrough and task lists.
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    /// Create a converter with an explicit option set.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl Default for CmarkConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter for CmarkConverter {
    fn name(&self) -> &'static str {
        "cmark"
    }

    fn to_html(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options);

        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, parser);

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_headings_and_paragraphs() {
        let html = CmarkConverter::new().to_html("# Welcome\n\nSome *text*.");

        assert_eq!(html, "<h1>Welcome</h1>\n<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn renders_tables() {
        let source = "| a | b |\n|---|---|\n| 1 | 2 |\n";

        let html = CmarkConverter::new().to_html(source);

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn plain_commonmark_ignores_extensions() {
        let html = CmarkConverter::with_options(Options::empty()).to_html("~~gone~~");

        assert!(!html.contains("<del>"));
    }

    #[test]
    fn renders_task_lists() {
        let html = CmarkConverter::new().to_html("- [x] done\n- [ ] todo\n");

        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn empty_source_is_empty_html() {
        assert_eq!(CmarkConverter::new().to_html(""), "");
    }
}

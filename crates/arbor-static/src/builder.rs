//! Build driver: runs document trees against an output directory.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use arbor_markdown::{CmarkConverter, MarkdownConverter};

use crate::document::Document;
use crate::format::{FormatError, HtmlFormatter, PrettyPrinter};
use crate::node::BuildContext;

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of documents written
    pub documents: usize,

    /// Files generated from tree data, documents included
    pub files_written: usize,

    /// Asset files copied verbatim
    pub assets_copied: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that abort a build.
///
/// Files written before the failure are left in place.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source file not found: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadError { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    WriteError { path: PathBuf, source: io::Error },

    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    CopyError {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("Failed to format {name}: {source}")]
    Format { name: String, source: FormatError },

    #[error("More than one document is named {0}")]
    DuplicateDocument(String),
}

/// Builds documents into an output directory.
pub struct SiteBuilder {
    output_dir: PathBuf,
    formatter: Box<dyn HtmlFormatter>,
    markdown: Box<dyn MarkdownConverter>,
}

impl SiteBuilder {
    /// Create a builder with the pretty-printer and CommonMark converter.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            formatter: Box::new(PrettyPrinter::new()),
            markdown: Box::new(CmarkConverter::new()),
        }
    }

    pub fn with_formatter(mut self, formatter: impl HtmlFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn with_markdown(mut self, markdown: impl MarkdownConverter + 'static) -> Self {
        self.markdown = Box::new(markdown);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build a single document.
    pub fn build(&self, document: Document) -> Result<BuildResult, BuildError> {
        self.build_all(vec![document])
    }

    /// Build documents in order into the same output directory.
    ///
    /// Output names are checked for clashes before anything is written.
    pub fn build_all(&self, documents: Vec<Document>) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let mut names = HashSet::new();
        for doc in &documents {
            if !names.insert(doc.name()) {
                return Err(BuildError::DuplicateDocument(doc.name().to_string()));
            }
        }

        tracing::debug!(
            "Building {} document(s) into {} (formatter: {}, markdown: {})",
            documents.len(),
            self.output_dir.display(),
            self.formatter.name(),
            self.markdown.name()
        );

        let mut ctx = BuildContext::new(&self.output_dir, self.markdown.as_ref());
        let count = documents.len();

        for doc in documents {
            self.write_document(doc, &mut ctx)?;
        }

        Ok(BuildResult {
            documents: count,
            files_written: ctx.files_written(),
            assets_copied: ctx.assets_copied(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.output_dir.clone(),
        })
    }

    /// Serialize, format and persist one document.
    fn write_document(
        &self,
        doc: Document,
        ctx: &mut BuildContext<'_>,
    ) -> Result<(), BuildError> {
        let raw = doc.to_markup(ctx)?;
        let html = self
            .formatter
            .format(&raw)
            .map_err(|source| BuildError::Format {
                name: doc.name().to_string(),
                source,
            })?;
        let path = ctx.write_text(&html, doc.name())?;

        tracing::info!("Wrote {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Verbatim;
    use crate::node::{Element, Tag};
    use std::fs;
    use tempfile::tempdir;

    struct Shouting;

    impl MarkdownConverter for Shouting {
        fn name(&self) -> &'static str {
            "shouting"
        }

        fn to_html(&self, source: &str) -> String {
            format!("<p>{}</p>", source.to_uppercase())
        }
    }

    #[test]
    fn builds_multiple_documents() {
        let temp = tempdir().unwrap();

        let result = SiteBuilder::new(temp.path())
            .build_all(vec![
                Document::new().child(Element::new(Tag::Body).child("home")),
                Document::new()
                    .named("news.html")
                    .child(Element::new(Tag::Body).child("news")),
            ])
            .unwrap();

        assert_eq!(result.documents, 2);
        assert!(temp.path().join("index.html").is_file());
        assert!(temp.path().join("news.html").is_file());
    }

    #[test]
    fn rejects_duplicate_names_before_writing() {
        let temp = tempdir().unwrap();

        let result = SiteBuilder::new(temp.path())
            .build_all(vec![Document::new(), Document::new().named("index.html")]);

        assert!(matches!(result, Err(BuildError::DuplicateDocument(name)) if name == "index.html"));
        assert!(!temp.path().join("index.html").exists());
    }

    #[test]
    fn verbatim_formatter_skips_pretty_printing() {
        let temp = tempdir().unwrap();

        SiteBuilder::new(temp.path())
            .with_formatter(Verbatim)
            .build(Document::new().child(Element::new(Tag::Body)))
            .unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("index.html")).unwrap(),
            "<!DOCTYPE html><html><body></body></html>"
        );
    }

    #[test]
    fn uses_custom_markdown_converter() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("page.md"), "quiet").unwrap();

        SiteBuilder::new(temp.path().join("out"))
            .with_formatter(Verbatim)
            .with_markdown(Shouting)
            .build(Document::new().child(crate::node::MarkdownInclude::new(
                temp.path().join("page.md"),
            )))
            .unwrap();

        let html = fs::read_to_string(temp.path().join("out").join("index.html")).unwrap();
        assert!(html.contains("<div markdown=\"1\"><p>QUIET</p></div>"));
    }

    #[test]
    fn unwritable_output_is_write_error() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let result = SiteBuilder::new(blocker.join("out")).build(Document::new());

        assert!(matches!(result, Err(BuildError::WriteError { .. })));
    }
}

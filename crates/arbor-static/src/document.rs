//! Document roots: the top of a tree, persisted to a file.

use std::path::Path;

use crate::attrs::{open_tag, Attributes};
use crate::builder::{BuildError, BuildResult, SiteBuilder};
use crate::node::{build_children, BuildContext, Node, Tag};

/// File name used when a document is not given one.
pub const DEFAULT_DOCUMENT_NAME: &str = "index.html";

/// An `<html>` root that writes its serialized subtree to a named file.
///
/// A document is not a [`Node`], so it can never be nested inside another
/// tree, and [`Document::build`] consumes it, so a tree is built once.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    name: String,
    attrs: Attributes,
    children: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_DOCUMENT_NAME.to_string(),
            attrs: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set the output file name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serialize the whole tree, running every child's side effects.
    ///
    /// The result is `<!DOCTYPE html>` followed by the `<html>` element,
    /// before any formatting.
    pub fn to_markup(&self, ctx: &mut BuildContext<'_>) -> Result<String, BuildError> {
        let tag = Tag::Html.as_str();

        Ok(format!(
            "<!DOCTYPE html>{}{}</{}>",
            open_tag(tag, &self.attrs),
            build_children(&self.children, ctx)?,
            tag
        ))
    }

    /// Build into `output_dir` with the default formatter and markdown converter.
    pub fn build(self, output_dir: impl AsRef<Path>) -> Result<BuildResult, BuildError> {
        SiteBuilder::new(output_dir.as_ref()).build(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

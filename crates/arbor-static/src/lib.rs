//! Declarative static site builder.
//!
//! A site is declared as a tree of typed [`Node`]s under a [`Document`]
//! root, then built once: the traversal serializes the tree into HTML,
//! writes generated stylesheets and scripts, and copies referenced assets
//! into a flat output directory.

pub mod assets;
pub mod attrs;
pub mod builder;
pub mod css;
pub mod document;
pub mod format;
pub mod manifest;
pub mod node;

pub use assets::AssetWriter;
pub use attrs::{build_attributes, translate_keywords, Attributes};
pub use builder::{BuildError, BuildResult, SiteBuilder};
pub use css::{stylesheet_to_text, Stylesheet};
pub use document::{Document, DEFAULT_DOCUMENT_NAME};
pub use format::{FormatError, HtmlFormatter, PrettyPrinter, Verbatim};
pub use manifest::{Manifest, ManifestError};
pub use node::{
    BuildContext, CssFile, CssInline, Element, JsFile, JsInline, Leaf, MarkdownInclude, Node, Tag,
};

//! Site manifests: a document tree declared as TOML or JSON data.
//!
//! ```toml
//! [build]
//! output = "build"
//!
//! [[page]]
//! attrs = { lang = "en" }
//!
//! [[page.children]]
//! type = "head"
//! children = [{ type = "title", text = "Home" }, { type = "css-file", path = "style.css" }]
//! ```
//!
//! Relative asset and markdown paths resolve against the manifest's directory.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::css::Stylesheet;
use crate::document::{Document, DEFAULT_DOCUMENT_NAME};
use crate::node::{CssFile, CssInline, Element, JsFile, JsInline, Leaf, MarkdownInclude, Node, Tag};

/// Errors that can occur when loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported manifest format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// A parsed site manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub build: BuildSettings,

    #[serde(default, rename = "page")]
    pub pages: Vec<PageDecl>,

    /// Directory relative paths resolve against.
    #[serde(skip)]
    root: PathBuf,
}

/// The `[build]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSettings {
    /// Output directory
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Pretty-print generated HTML
    #[serde(default = "default_true")]
    pub format: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: true,
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("build")
}

fn default_true() -> bool {
    true
}

fn default_name() -> String {
    DEFAULT_DOCUMENT_NAME.to_string()
}

/// Attributes in the order they are declared.
pub type AttrMap = IndexMap<String, String>;

/// One `[[page]]` entry: a document root.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageDecl {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub attrs: AttrMap,
    #[serde(default)]
    pub children: Vec<NodeDecl>,
}

/// A node as declared in a manifest, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodeDecl {
    Text { text: String },
    Title(LeafDecl),
    Head(ElementDecl),
    Body(ElementDecl),
    Section(ElementDecl),
    Nav(ElementDecl),
    Ul(ElementDecl),
    Li(ElementDecl),
    A(ElementDecl),
    Img(ElementDecl),
    Div(ElementDecl),
    CssFile { path: PathBuf },
    Css { name: String, rules: Stylesheet },
    JsFile { path: PathBuf },
    Js { name: String, script: String },
    Markdown(MarkdownDecl),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeafDecl {
    pub text: String,
    #[serde(default)]
    pub attrs: AttrMap,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDecl {
    #[serde(default)]
    pub attrs: AttrMap,
    #[serde(default)]
    pub children: Vec<NodeDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownDecl {
    pub path: PathBuf,
    #[serde(default)]
    pub attrs: AttrMap,
}

impl Manifest {
    /// Load a manifest, choosing the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(ManifestError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        tracing::debug!(
            "Loaded {} page(s) from {}",
            manifest.pages.len(),
            path.display()
        );

        Ok(manifest.with_root(root))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolve relative paths against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Output directory, resolved against the manifest root.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }

    /// Turn every page into a document tree.
    pub fn into_documents(self) -> Vec<Document> {
        let root = self.root;
        self.pages
            .into_iter()
            .map(|page| page.into_document(&root))
            .collect()
    }
}

impl PageDecl {
    pub fn into_document(self, root: &Path) -> Document {
        let mut doc = Document::new().named(self.name);
        for (key, value) in self.attrs {
            doc = doc.attr(key, value);
        }
        doc.children(self.children.into_iter().map(|c| c.into_node(root)))
    }
}

impl NodeDecl {
    pub fn into_node(self, root: &Path) -> Node {
        match self {
            Self::Text { text } => Node::Text(text),
            Self::Title(leaf) => {
                let mut node = Leaf::title(leaf.text);
                for (key, value) in leaf.attrs {
                    node = node.attr(key, value);
                }
                node.into()
            }
            Self::Head(e) => e.into_element(Tag::Head, root),
            Self::Body(e) => e.into_element(Tag::Body, root),
            Self::Section(e) => e.into_element(Tag::Section, root),
            Self::Nav(e) => e.into_element(Tag::Nav, root),
            Self::Ul(e) => e.into_element(Tag::Ul, root),
            Self::Li(e) => e.into_element(Tag::Li, root),
            Self::A(e) => e.into_element(Tag::A, root),
            Self::Img(e) => e.into_element(Tag::Img, root),
            Self::Div(e) => e.into_element(Tag::Div, root),
            Self::CssFile { path } => CssFile::new(root.join(path)).into(),
            Self::Css { name, rules } => CssInline::new(rules, name).into(),
            Self::JsFile { path } => JsFile::new(root.join(path)).into(),
            Self::Js { name, script } => JsInline::new(script, name).into(),
            Self::Markdown(md) => {
                let mut node = MarkdownInclude::new(root.join(md.path));
                for (key, value) in md.attrs {
                    node = node.attr(key, value);
                }
                node.into()
            }
        }
    }
}

impl ElementDecl {
    fn into_element(self, tag: Tag, root: &Path) -> Node {
        Element::new(tag)
            .with_attrs(self.attrs)
            .children(self.children.into_iter().map(|c| c.into_node(root)))
            .into()
    }
}

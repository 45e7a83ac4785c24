//! The node tree and its build protocol.
//!
//! A tree is declared up front, then consumed by a single depth-first,
//! left-to-right traversal. Each node returns the markup it contributes to
//! its parent; asset nodes also write or copy files into the output
//! directory as part of that traversal.

use std::path::{Path, PathBuf};

use arbor_markdown::MarkdownConverter;

use crate::assets::{output_name, AssetWriter};
use crate::attrs::{open_tag, Attributes};
use crate::builder::BuildError;
use crate::css::Stylesheet;

/// HTML element kinds. Each carries its tag name as a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Html,
    Head,
    Body,
    Section,
    Nav,
    /// Unordered list
    Ul,
    /// List item
    Li,
    /// Anchor
    A,
    /// Image
    Img,
    Div,
    Title,
}

impl Tag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Head => "head",
            Self::Body => "body",
            Self::Section => "section",
            Self::Nav => "nav",
            Self::Ul => "ul",
            Self::Li => "li",
            Self::A => "a",
            Self::Img => "img",
            Self::Div => "div",
            Self::Title => "title",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State threaded unchanged through one build traversal.
pub struct BuildContext<'a> {
    output_dir: &'a Path,
    markdown: &'a dyn MarkdownConverter,
    files_written: usize,
    assets_copied: usize,
}

impl<'a> BuildContext<'a> {
    pub fn new(output_dir: &'a Path, markdown: &'a dyn MarkdownConverter) -> Self {
        Self {
            output_dir,
            markdown,
            files_written: 0,
            assets_copied: 0,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }

    pub fn assets_copied(&self) -> usize {
        self.assets_copied
    }

    /// Write generated text to `output_dir/name`.
    pub fn write_text(&mut self, content: &str, name: &str) -> Result<PathBuf, BuildError> {
        let path = AssetWriter::write_text(content, self.output_dir, name)?;
        self.files_written += 1;
        Ok(path)
    }

    /// Copy a referenced asset into the output directory.
    pub fn copy_asset(&mut self, source: &Path) -> Result<PathBuf, BuildError> {
        let path = AssetWriter::copy_file(source, self.output_dir)?;
        self.assets_copied += 1;
        Ok(path)
    }

    /// Read a markdown file and convert it to HTML.
    pub fn render_markdown(&self, source: &Path) -> Result<String, BuildError> {
        let text = AssetWriter::read_text(source)?;
        Ok(self.markdown.to_html(&text))
    }
}

/// Any buildable element of a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Raw content emitted with no wrapping tag.
    Text(String),
    Leaf(Leaf),
    Element(Element),
    CssFile(CssFile),
    CssInline(CssInline),
    JsFile(JsFile),
    JsInline(JsInline),
    Markdown(MarkdownInclude),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Build this node, returning the markup it contributes to its parent.
    pub fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, BuildError> {
        match self {
            Self::Text(content) => Ok(content.clone()),
            Self::Leaf(leaf) => Ok(leaf.render()),
            Self::Element(element) => element.build(ctx),
            Self::CssFile(css) => css.build(ctx),
            Self::CssInline(css) => css.build(ctx),
            Self::JsFile(js) => js.build(ctx),
            Self::JsInline(js) => js.build(ctx),
            Self::Markdown(md) => md.build(ctx),
        }
    }
}

/// Build children in order and concatenate their markup.
pub(crate) fn build_children(
    children: &[Node],
    ctx: &mut BuildContext<'_>,
) -> Result<String, BuildError> {
    let mut out = String::new();
    for child in children {
        out.push_str(&child.build(ctx)?);
    }
    Ok(out)
}

/// A tagged element holding literal content, such as a title.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    tag: Tag,
    attrs: Attributes,
    content: String,
}

impl Leaf {
    pub fn new(tag: Tag, content: impl Into<String>) -> Self {
        Self {
            tag,
            attrs: Attributes::new(),
            content: content.into(),
        }
    }

    pub fn title(content: impl Into<String>) -> Self {
        Self::new(Tag::Title, content)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// `<tag attrs>content</tag>`
    pub fn render(&self) -> String {
        format!(
            "{}{}</{}>",
            open_tag(self.tag.as_str(), &self.attrs),
            self.content,
            self.tag
        )
    }
}

/// A tagged element with ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: Tag,
    attrs: Attributes,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// Replace the attribute map, resolving aliases.
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attrs = Attributes::from_pairs(attrs);
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

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// `<tag attrs>` + children in order + `</tag>`
    pub fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, BuildError> {
        Ok(format!(
            "{}{}</{}>",
            open_tag(self.tag.as_str(), &self.attrs),
            build_children(&self.children, ctx)?,
            self.tag
        ))
    }
}

/// A stylesheet file copied into the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct CssFile {
    path: PathBuf,
}

impl CssFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, BuildError> {
        ctx.copy_asset(&self.path)?;
        Ok(stylesheet_link(&output_name(&self.path)))
    }
}

/// Stylesheet data serialized into a generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct CssInline {
    stylesheet: Stylesheet,
    name: String,
}

impl CssInline {
    pub fn new(stylesheet: Stylesheet, name: impl Into<String>) -> Self {
        Self {
            stylesheet,
            name: name.into(),
        }
    }

    pub fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, BuildError> {
        ctx.write_text(&self.stylesheet.to_text(), &self.name)?;
        Ok(stylesheet_link(&self.name))
    }
}

/// A script file copied into the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct JsFile {
    path: PathBuf,
}

impl JsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, BuildError> {
        ctx.copy_asset(&self.path)?;
        Ok(deferred_script(&output_name(&self.path)))
    }
}

/// Script text written to a generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct JsInline {
    script: String,
    name: String,
}

impl JsInline {
    pub fn new(script: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            name: name.into(),
        }
    }

    pub fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, BuildError> {
        ctx.write_text(&self.script, &self.name)?;
        Ok(deferred_script(&self.name))
    }
}

/// Markdown read from disk and embedded as HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownInclude {
    path: PathBuf,
    attrs: Attributes,
}

impl MarkdownInclude {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            attrs: Attributes::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// Converted HTML inside a `<div markdown="1">` marker.
    pub fn build(&self, ctx: &mut BuildContext<'_>) -> Result<String, BuildError> {
        let html = ctx.render_markdown(&self.path)?;

        if self.attrs.is_empty() {
            Ok(format!("<div markdown=\"1\">{}</div>", html))
        } else {
            Ok(format!(
                "<div markdown=\"1\" {}>{}</div>",
                self.attrs.render(),
                html
            ))
        }
    }
}

fn stylesheet_link(href: &str) -> String {
    format!("<link rel='stylesheet' href='{}'>", href)
}

fn deferred_script(src: &str) -> String {
    format!("<script defer src='{}'></script>", src)
}

macro_rules! impl_into_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

impl_into_node! {
    Leaf => Leaf,
    Element => Element,
    CssFile => CssFile,
    CssInline => CssInline,
    JsFile => JsFile,
    JsInline => JsInline,
    MarkdownInclude => Markdown,
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::text(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_markdown::CmarkConverter;
    use std::fs;
    use tempfile::tempdir;

    fn build(node: impl Into<Node>, out: &Path) -> Result<String, BuildError> {
        let markdown = CmarkConverter::new();
        let mut ctx = BuildContext::new(out, &markdown);
        node.into().build(&mut ctx)
    }

    #[test]
    fn text_builds_to_raw_content() {
        let temp = tempdir().unwrap();

        assert_eq!(build(Node::text("hi"), temp.path()).unwrap(), "hi");
    }

    #[test]
    fn leaf_wraps_content() {
        let temp = tempdir().unwrap();

        assert_eq!(
            build(Leaf::title("X"), temp.path()).unwrap(),
            "<title>X</title>"
        );
    }

    #[test]
    fn empty_element_is_open_and_close() {
        let temp = tempdir().unwrap();

        assert_eq!(build(Element::new(Tag::Div), temp.path()).unwrap(), "<div></div>");
        assert_eq!(
            build(Element::new(Tag::Section).attr("cls", "hidden"), temp.path()).unwrap(),
            "<section class='hidden'></section>"
        );
    }

    #[test]
    fn children_build_in_declared_order() {
        let temp = tempdir().unwrap();
        let nav = Element::new(Tag::Nav).attr("cls", "menu").children([
            Element::new(Tag::Li).child(Element::new(Tag::A).attr("href", "home").child("Home")),
            Element::new(Tag::Li).child(Element::new(Tag::A).attr("href", "news").child("News")),
        ]);

        assert_eq!(
            build(nav, temp.path()).unwrap(),
            "<nav class='menu'><li><a href='home'>Home</a></li><li><a href='news'>News</a></li></nav>"
        );
    }

    #[test]
    fn anchor_translates_cls() {
        let temp = tempdir().unwrap();
        let anchor = Element::new(Tag::A)
            .with_attrs([("href", "home"), ("cls", "active")])
            .child("Home");

        let html = build(anchor, temp.path()).unwrap();

        assert!(html.contains("href='home'"));
        assert!(html.contains("class='active'"));
        assert!(!html.contains("cls="));
    }

    #[test]
    fn css_file_is_copied_and_linked_by_name() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("theme");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("style.css"), "body { margin: 0; }").unwrap();
        let out = temp.path().join("build");

        let html = build(CssFile::new(src.join("style.css")), &out).unwrap();

        assert_eq!(html, "<link rel='stylesheet' href='style.css'>");
        assert_eq!(
            fs::read_to_string(out.join("style.css")).unwrap(),
            "body { margin: 0; }"
        );
    }

    #[test]
    fn css_inline_writes_serialized_stylesheet() {
        let temp = tempdir().unwrap();
        let sheet = Stylesheet::new().rule("body", [("color", "red")]);

        let html = build(CssInline::new(sheet, "site.css"), temp.path()).unwrap();

        assert_eq!(html, "<link rel='stylesheet' href='site.css'>");
        assert_eq!(
            fs::read_to_string(temp.path().join("site.css")).unwrap(),
            "body{\n\tcolor = red;\n}"
        );
    }

    #[test]
    fn js_file_is_copied_and_deferred() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("app.js"), "init();").unwrap();
        let out = temp.path().join("build");

        let html = build(JsFile::new(temp.path().join("app.js")), &out).unwrap();

        assert_eq!(html, "<script defer src='app.js'></script>");
        assert!(out.join("app.js").is_file());
    }

    #[test]
    fn js_inline_writes_script() {
        let temp = tempdir().unwrap();

        let html = build(JsInline::new("start();", "main.js"), temp.path()).unwrap();

        assert_eq!(html, "<script defer src='main.js'></script>");
        assert_eq!(
            fs::read_to_string(temp.path().join("main.js")).unwrap(),
            "start();"
        );
    }

    #[test]
    fn markdown_is_wrapped_in_marker_div() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("home.md"), "# Home").unwrap();

        let html = build(MarkdownInclude::new(temp.path().join("home.md")), temp.path()).unwrap();

        assert_eq!(html, "<div markdown=\"1\"><h1>Home</h1>\n</div>");
    }

    #[test]
    fn markdown_forwards_attributes() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("home.md"), "text").unwrap();

        let html = build(
            MarkdownInclude::new(temp.path().join("home.md")).attr("cls", "mdPage"),
            temp.path(),
        )
        .unwrap();

        assert!(html.starts_with("<div markdown=\"1\" class='mdPage'>"));
    }

    #[test]
    fn missing_asset_aborts_build() {
        let temp = tempdir().unwrap();
        let body = Element::new(Tag::Body)
            .child(JsInline::new("a();", "a.js"))
            .child(CssFile::new(temp.path().join("missing.css")));

        let result = build(body, temp.path());

        assert!(matches!(result, Err(BuildError::MissingSource { .. })));
    }

    #[test]
    fn context_counts_side_effects() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("app.js"), "").unwrap();
        let out = temp.path().join("build");
        let markdown = CmarkConverter::new();
        let mut ctx = BuildContext::new(&out, &markdown);

        Node::from(
            Element::new(Tag::Head)
                .child(JsFile::new(temp.path().join("app.js")))
                .child(CssInline::new(Stylesheet::new(), "a.css"))
                .child(JsInline::new("", "b.js")),
        )
        .build(&mut ctx)
        .unwrap();

        assert_eq!(ctx.assets_copied(), 1);
        assert_eq!(ctx.files_written(), 2);
    }

    #[test]
    fn tag_names_are_lowercase() {
        assert_eq!(Tag::Ul.as_str(), "ul");
        assert_eq!(Tag::Img.to_string(), "img");
    }
}

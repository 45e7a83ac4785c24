//! HTML formatting applied to a document before it is written.

use std::io;
use std::string::FromUtf8Error;

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose body is kept exactly as written.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose whitespace is significant; emitted byte-for-byte.
const PREFORMATTED_ELEMENTS: &[&str] = &["pre", "textarea"];

/// Errors that can occur while formatting.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("HTML serialization failed: {0}")]
    Serialize(#[from] io::Error),

    #[error("Serialized HTML is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Turns raw markup into semantically equivalent markup.
pub trait HtmlFormatter: Send + Sync {
    /// Formatter identifier (e.g., "pretty")
    fn name(&self) -> &'static str;

    /// Format a complete document.
    fn format(&self, raw: &str) -> Result<String, FormatError>;
}

/// Leaves markup untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl HtmlFormatter for Verbatim {
    fn name(&self) -> &'static str {
        "verbatim"
    }

    fn format(&self, raw: &str) -> Result<String, FormatError> {
        Ok(raw.to_string())
    }
}

/// Indenting pretty-printer over an html5ever parse of the document.
///
/// Every tag and every text line goes on its own line, indented by nesting
/// depth. `pre` and `textarea` are kept verbatim, script and style bodies
/// are not re-indented. Formatting already formatted output yields the
/// same output.
#[derive(Debug, Clone)]
pub struct PrettyPrinter {
    indent: String,
}

impl PrettyPrinter {
    /// One space per nesting level.
    pub fn new() -> Self {
        Self::with_indent(1)
    }

    pub fn with_indent(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }

    fn line(&self, out: &mut String, depth: usize, text: &str) {
        for _ in 0..depth {
            out.push_str(&self.indent);
        }
        out.push_str(text);
        out.push('\n');
    }

    fn write_node(
        &self,
        out: &mut String,
        handle: &Handle,
        depth: usize,
    ) -> Result<(), FormatError> {
        match &handle.data {
            NodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.write_node(out, child, depth)?;
                }
            }

            NodeData::Doctype { name, .. } => {
                self.line(out, depth, &format!("<!DOCTYPE {}>", &**name));
            }

            NodeData::Comment { contents } => {
                self.line(out, depth, &format!("<!--{}-->", &**contents));
            }

            NodeData::Text { contents } => {
                let text = contents.borrow();
                // Non-breaking spaces are content, so only ASCII whitespace is trimmed.
                let lines = text
                    .lines()
                    .map(|l| l.trim_matches(|c: char| c.is_ascii_whitespace()))
                    .filter(|l| !l.is_empty());
                for line in lines {
                    self.line(out, depth, &escape_text(line));
                }
            }

            NodeData::Element { name, attrs, .. } => {
                let tag: &str = &name.local;

                if PREFORMATTED_ELEMENTS.contains(&tag) {
                    self.line(out, depth, &serialize_verbatim(handle)?);
                    return Ok(());
                }

                self.line(out, depth, &open_tag(tag, &attrs.borrow()));

                if VOID_ELEMENTS.contains(&tag) {
                    return Ok(());
                }

                if RAW_TEXT_ELEMENTS.contains(&tag) {
                    let body = raw_text(handle);
                    let body = body.trim();
                    if !body.is_empty() {
                        out.push_str(body);
                        out.push('\n');
                    }
                } else {
                    for child in handle.children.borrow().iter() {
                        self.write_node(out, child, depth + 1)?;
                    }
                }

                self.line(out, depth, &format!("</{}>", tag));
            }

            NodeData::ProcessingInstruction { .. } => {}
        }

        Ok(())
    }
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlFormatter for PrettyPrinter {
    fn name(&self) -> &'static str {
        "pretty"
    }

    fn format(&self, raw: &str) -> Result<String, FormatError> {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(raw);

        let mut out = String::with_capacity(raw.len() * 2);
        self.write_node(&mut out, &dom.document, 0)?;

        Ok(out)
    }
}

/// Serialize an element and its subtree exactly as html5ever writes it.
fn serialize_verbatim(handle: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    serialize(&mut output, &SerializableHandle::from(handle.clone()), opts)?;

    Ok(String::from_utf8(output)?)
}

fn raw_text(handle: &Handle) -> String {
    let mut body = String::new();
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            body.push_str(&contents.borrow());
        }
    }
    body
}

fn open_tag(tag: &str, attrs: &[Attribute]) -> String {
    let mut out = format!("<{}", tag);
    for attr in attrs {
        out.push_str(&format!(" {}=\"{}\"", &*attr.name.local, escape_attr(&attr.value)));
    }
    out.push('>');
    out
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('"', "&quot;")
}

//! Markdown conversion for embedded site content.
//!
//! The site builder treats markdown rendering as a collaborator: anything
//! implementing [`MarkdownConverter`] can be plugged in. [`CmarkConverter`]
//! is the default, backed by pulldown-cmark.

pub mod converter;

pub use converter::{CmarkConverter, MarkdownConverter};

//! Markdown host for the Srcfence transform.
//!
//! # Modules
//!
//! - [`document`]: Parsing markdown into a tree of fenced code blocks
//! - [`render`]: Re-rendering rewritten fences

#![doc = include_str!("../README.md")]

pub mod document;
pub mod render;

pub use document::{FencedCode, MarkdownDocument};

use srcfence_core::{Result, SourceTransform};

/// Parse `markdown`, rewrite its `src`-annotated fences, and serialize it.
pub async fn process_markdown(transform: &SourceTransform, markdown: &str) -> Result<String> {
    let mut document = MarkdownDocument::parse(markdown);
    transform.run(&mut document).await?;
    Ok(document.to_markdown())
}

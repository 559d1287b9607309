//! Markdown documents as a tree of fenced code blocks.
//!
//! Parsing records every fenced code block with its byte range in the
//! source. Serializing copies the source through unchanged and splices in a
//! fresh rendering only for blocks that were modified, so a document with no
//! `src` annotations round-trips byte-for-byte.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use srcfence_core::Result;
use srcfence_core::traits::{CodeNode, CodeTree};
use std::ops::Range;

use crate::render::{Fence, render_fence};

/// One fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCode {
    lang: Option<String>,
    meta: Option<String>,
    value: String,
    range: Range<usize>,
    indent: String,
    lead: String,
    fence: Fence,
    trailing_newline: bool,
    modified: bool,
}

impl FencedCode {
    fn open(source: &str, info: &str, range: Range<usize>) -> Self {
        let (lang, meta) = split_info(info);
        let slice = &source[range.clone()];
        let body = slice.trim_start_matches([' ', '\t']);
        let lead = slice[..slice.len() - body.len()].to_string();
        let line_start = source[..range.start].rfind('\n').map_or(0, |i| i + 1);

        Self {
            lang,
            meta,
            value: String::new(),
            indent: container_indent(&source[line_start..range.start], &lead),
            lead,
            fence: Fence::detect(body),
            trailing_newline: slice.ends_with('\n'),
            range,
            modified: false,
        }
    }

    fn close(&mut self) {
        if self.value.ends_with('\n') {
            self.value.pop();
        }
    }

    /// Language tag, the first word of the info string.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Byte range of the whole block in the parsed source.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Whether the block has been written to since parsing.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Render this block as markdown, starting at the fence column.
    pub fn render(&self) -> String {
        let mut out = self.lead.clone();
        out.push_str(&render_fence(
            self.fence,
            self.lang(),
            self.meta.as_deref(),
            &self.value,
            &self.indent,
        ));
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}

impl CodeNode for FencedCode {
    fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_meta(&mut self, meta: Option<String>) {
        self.meta = meta;
        self.modified = true;
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
        self.modified = true;
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    source: String,
    blocks: Vec<FencedCode>,
}

impl MarkdownDocument {
    /// Parse `source` and collect its fenced code blocks.
    pub fn parse(source: &str) -> Self {
        let mut blocks = Vec::new();
        let mut current: Option<FencedCode> = None;

        for (event, range) in Parser::new_ext(source, Options::empty()).into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    current = Some(FencedCode::open(source, &info, range));
                }
                Event::Text(text) => {
                    if let Some(block) = current.as_mut() {
                        block.value.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(mut block) = current.take() {
                        block.close();
                        blocks.push(block);
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(fences = blocks.len(), "parsed markdown document");
        Self {
            source: source.to_string(),
            blocks,
        }
    }

    /// The original markdown text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fenced code blocks in document order.
    pub fn blocks(&self) -> &[FencedCode] {
        &self.blocks
    }

    /// Serialize the document, re-rendering only modified blocks.
    pub fn to_markdown(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for block in self.blocks.iter().filter(|b| b.modified) {
            out.push_str(&self.source[cursor..block.range.start]);
            out.push_str(&block.render());
            cursor = block.range.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

impl CodeTree for MarkdownDocument {
    type Node = FencedCode;

    fn code_nodes_mut(&mut self) -> Result<Vec<&mut FencedCode>> {
        Ok(self.blocks.iter_mut().collect())
    }
}

/// Split an info string into language and meta.
fn split_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once(char::is_whitespace) {
        Some((lang, rest)) => {
            let rest = rest.trim();
            let meta = (!rest.is_empty()).then(|| rest.to_string());
            (Some(lang.to_string()), meta)
        }
        None => (Some(info.to_string()), None),
    }
}

/// Prefix for lines after the opening fence: blockquote markers and
/// whitespace are kept, list markers become spaces.
fn container_indent(line_prefix: &str, lead: &str) -> String {
    let mut indent: String = line_prefix
        .chars()
        .map(|c| if c == '>' || c.is_whitespace() { c } else { ' ' })
        .collect();
    indent.push_str(lead);
    indent
}

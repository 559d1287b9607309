//! Extraction of the `src` token from fence meta.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static SRC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="([^"]+)""#).expect("src token pattern is valid"));

/// A source reference found in a fence's meta string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMeta {
    /// The quoted reference, without quotes.
    pub source: String,
    /// The meta string with the matched token removed and edges trimmed.
    pub cleaned_meta: String,
}

/// Find the first `src="..."` token in `meta`.
///
/// Returns `None` when meta is absent, has no token, or the quote is never
/// closed. Other text keeps its order and inner spacing.
///
/// # Example
///
/// ```
/// use srcfence_core::meta::parse_meta;
///
/// let found = parse_meta(Some(r#"src="a.js" title="A""#)).unwrap();
/// assert_eq!(found.source, "a.js");
/// assert_eq!(found.cleaned_meta, r#"title="A""#);
/// ```
pub fn parse_meta(meta: Option<&str>) -> Option<SourceMeta> {
    let meta = meta?;
    let captures = SRC_TOKEN.captures(meta)?;
    let token = captures.get(0)?;
    let source = captures.get(1)?.as_str().to_string();

    let mut cleaned = String::with_capacity(meta.len());
    cleaned.push_str(&meta[..token.start()]);
    cleaned.push_str(&meta[token.end()..]);

    Some(SourceMeta {
        source,
        cleaned_meta: cleaned.trim().to_string(),
    })
}

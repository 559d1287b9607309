//! Srcfence — fill fenced code blocks from local files and remote URLs.
//!
//! Re-exports the transform core and, with the `markdown` feature (on by
//! default), the pulldown-cmark document host.
//!
//! ```rust,no_run
//! use srcfence::{SourceCodeConfig, SourceTransform};
//!
//! # async fn demo() -> srcfence::Result<()> {
//! let transform = SourceTransform::new(SourceCodeConfig::new().with_base_dir("docs"))?;
//! # #[cfg(feature = "markdown")]
//! let rendered = srcfence::markdown::process_markdown(
//!     &transform,
//!     "```rust src=\"examples/demo.rs\" title=\"Demo\"\n```\n",
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub use srcfence_core::{
    CodeNode, CodeTree, Error, FetchError, Result, SourceCodeConfig, SourceTransform,
    TransformReport, config, fetch, meta, mutate, resolve, traits, transform,
};

#[cfg(feature = "markdown")]
pub use srcfence_markdown as markdown;

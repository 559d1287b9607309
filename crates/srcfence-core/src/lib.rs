//! Srcfence Core — source annotations on fenced code blocks.
//!
//! This crate rewrites code nodes whose fence meta carries a
//! `src="<reference>"` token into the literal content of that reference,
//! read from the local filesystem or fetched over HTTP. It has no
//! dependency on any concrete document tree (dependency level 0): hosts
//! expose their code blocks through [`CodeTree`] and [`CodeNode`].
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: Transform configuration (base directory, concurrency)
//! - [`traits`]: The document tree seam implemented by hosts
//! - [`meta`]: Extraction of the `src` token from fence meta
//! - [`resolve`]: Local/remote classification and target computation
//! - [`fetch`]: Local reads and remote GETs
//! - [`mutate`]: Writing outcomes back into code nodes
//! - [`transform`]: The whole-document orchestrator

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod fetch;
pub mod meta;
pub mod mutate;
pub mod resolve;
pub mod traits;
pub mod transform;

// Re-export key types at crate root for convenience
pub use config::SourceCodeConfig;
pub use error::{Error, FetchError, Result};
pub use fetch::{ContentFetcher, FsReader, HttpClient, LocalReader, RemoteClient};
pub use meta::{SourceMeta, parse_meta};
pub use mutate::Outcome;
pub use resolve::{FetchTarget, Origin, SourceResolver};
pub use traits::{CodeNode, CodeTree};
pub use transform::{SourceTransform, TransformReport};

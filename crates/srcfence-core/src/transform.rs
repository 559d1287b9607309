//! Whole-document orchestration.
//!
//! [`SourceTransform::run`] walks every code node once. Nodes whose meta
//! carries a `src` token each get one resolution future
//! (resolve → fetch → mutate); all futures are polled together on the
//! calling task and the run completes only after every one has written its
//! node. A failing source degrades its own node and nothing else.
//!
//! Each future holds the only `&mut` borrow of its node, so no two futures
//! can touch the same node.

use futures::StreamExt;
use futures::future::join_all;
use futures::stream;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::Result;
use crate::config::SourceCodeConfig;
use crate::fetch::{ContentFetcher, FsReader, HttpClient, LocalReader, RemoteClient};
use crate::meta::{SourceMeta, parse_meta};
use crate::mutate::{self, Outcome};
use crate::resolve::SourceResolver;
use crate::traits::{CodeNode, CodeTree};

/// Counts from one transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Code nodes visited.
    pub visited: usize,
    /// Nodes whose source was loaded.
    pub resolved: usize,
    /// Nodes that received an error placeholder.
    pub failed: usize,
}

impl TransformReport {
    /// Nodes that carried a `src` token.
    pub fn matched(&self) -> usize {
        self.resolved + self.failed
    }
}

/// Rewrites `src`-annotated code nodes with their source content.
#[derive(Clone)]
pub struct SourceTransform {
    resolver: SourceResolver,
    fetcher: ContentFetcher,
    max_concurrency: Option<NonZeroUsize>,
}

impl SourceTransform {
    /// Build a transform from configuration.
    ///
    /// The base directory is resolved here, once; later changes to the
    /// process working directory do not affect this transform.
    pub fn new(config: SourceCodeConfig) -> Result<Self> {
        let max_concurrency = config.concurrency_limit()?;
        let base_dir = config.resolve_base_dir()?;
        let remote = match &config.user_agent {
            Some(agent) => HttpClient::with_user_agent(agent)?,
            None => HttpClient::new(),
        };

        Ok(Self {
            resolver: SourceResolver::new(base_dir),
            fetcher: ContentFetcher::new(Arc::new(FsReader), Arc::new(remote)),
            max_concurrency,
        })
    }

    /// Replace the local reader.
    pub fn with_local_reader(mut self, reader: Arc<dyn LocalReader>) -> Self {
        self.fetcher = self.fetcher.with_local(reader);
        self
    }

    /// Replace the remote client.
    pub fn with_remote_client(mut self, client: Arc<dyn RemoteClient>) -> Self {
        self.fetcher = self.fetcher.with_remote(client);
        self
    }

    /// The directory local references resolve against.
    pub fn base_dir(&self) -> &Path {
        self.resolver.base_dir()
    }

    /// Rewrite every `src`-annotated code node in `tree`.
    ///
    /// # Errors
    ///
    /// Fails only if the tree cannot be traversed. Fetch failures are
    /// written into their nodes and counted in the report.
    pub async fn run<T: CodeTree>(&self, tree: &mut T) -> Result<TransformReport> {
        let nodes = tree.code_nodes_mut()?;
        let visited = nodes.len();

        let tasks: Vec<_> = nodes
            .into_iter()
            .filter_map(|node| {
                let found = parse_meta(node.meta())?;
                Some(self.resolve_node(node, found))
            })
            .collect();

        let outcomes: Vec<bool> = match self.max_concurrency {
            None => join_all(tasks).await,
            Some(limit) => {
                stream::iter(tasks)
                    .buffer_unordered(limit.get())
                    .collect()
                    .await
            }
        };

        let resolved = outcomes.iter().filter(|loaded| **loaded).count();
        let report = TransformReport {
            visited,
            resolved,
            failed: outcomes.len() - resolved,
        };
        info!(
            visited = report.visited,
            resolved = report.resolved,
            failed = report.failed,
            "source transform complete"
        );
        Ok(report)
    }

    async fn resolve_node<N: CodeNode + ?Sized>(&self, node: &mut N, found: SourceMeta) -> bool {
        let SourceMeta {
            source,
            cleaned_meta,
        } = found;
        let target = self.resolver.resolve(&source);
        let origin = target.origin();
        debug!(%source, %origin, ?target, "resolving code source");

        let outcome = match self.fetcher.fetch(&target).await {
            Ok(content) => Outcome::Loaded { content, origin },
            Err(error) => {
                warn!(%source, %origin, %error, "failed to load code source");
                Outcome::Failed {
                    error,
                    origin,
                    source,
                }
            }
        };

        mutate::apply(node, outcome, cleaned_meta)
    }
}

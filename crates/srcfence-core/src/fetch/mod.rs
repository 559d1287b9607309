//! Content retrieval for resolved targets.
//!
//! [`ContentFetcher`] dispatches a [`FetchTarget`] to a [`LocalReader`] or a
//! [`RemoteClient`]. Both are traits so hosts and tests can swap the
//! filesystem or HTTP stack without touching the transform.

mod local;
mod remote;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::FetchError;
use crate::resolve::FetchTarget;

pub use local::FsReader;
pub use remote::HttpClient;

/// Reads local files as UTF-8 text.
#[async_trait]
pub trait LocalReader: Send + Sync {
    /// Read the whole file at `path`.
    async fn read_text(&self, path: &Path) -> Result<String, FetchError>;
}

/// Fetches remote documents as text.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// GET `url` and return the body of a 2xx response.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Retrieves the content behind a [`FetchTarget`].
#[derive(Clone)]
pub struct ContentFetcher {
    local: Arc<dyn LocalReader>,
    remote: Arc<dyn RemoteClient>,
}

impl ContentFetcher {
    /// Create a fetcher from explicit backends.
    pub fn new(local: Arc<dyn LocalReader>, remote: Arc<dyn RemoteClient>) -> Self {
        Self { local, remote }
    }

    /// Replace the local backend.
    pub fn with_local(mut self, local: Arc<dyn LocalReader>) -> Self {
        self.local = local;
        self
    }

    /// Replace the remote backend.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteClient>) -> Self {
        self.remote = remote;
        self
    }

    /// Fetch the content behind `target`.
    pub async fn fetch(&self, target: &FetchTarget) -> Result<String, FetchError> {
        match target {
            FetchTarget::Local(path) => self.local.read_text(path).await,
            FetchTarget::Remote(url) => self.remote.get_text(url).await,
        }
    }
}

impl Default for ContentFetcher {
    fn default() -> Self {
        Self::new(Arc::new(FsReader), Arc::new(HttpClient::new()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct StaticRemote(&'static str);

    #[async_trait]
    impl RemoteClient for StaticRemote {
        async fn get_text(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_dispatch_local() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        tokio::fs::write(&path, "local body").await.unwrap();

        let fetcher = ContentFetcher::default().with_remote(Arc::new(StaticRemote("remote")));
        let text = fetcher.fetch(&FetchTarget::Local(path)).await.unwrap();

        assert_eq!(text, "local body");
    }

    #[tokio::test]
    async fn test_dispatch_remote() {
        let fetcher = ContentFetcher::default().with_remote(Arc::new(StaticRemote("remote")));
        let text = fetcher
            .fetch(&FetchTarget::Remote("https://example.invalid/a".into()))
            .await
            .unwrap();

        assert_eq!(text, "remote");
    }

    #[tokio::test]
    async fn test_local_failure_is_value_not_panic() {
        let fetcher = ContentFetcher::default();
        let err = fetcher
            .fetch(&FetchTarget::Local(PathBuf::from(
                "/nonexistent/srcfence/missing.js",
            )))
            .await
            .unwrap_err();

        assert!(err.is_local());
    }
}

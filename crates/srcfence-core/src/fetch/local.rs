//! Filesystem reads.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use super::LocalReader;
use crate::FetchError;

/// Reads files with `tokio::fs`.
///
/// The file handle is owned by the read future and closed when it
/// completes, whether or not the read succeeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

#[async_trait]
impl LocalReader for FsReader {
    async fn read_text(&self, path: &Path) -> Result<String, FetchError> {
        fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

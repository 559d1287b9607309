//! Classification of source references.
//!
//! A reference beginning with `http://` or `https://` is remote and fetched
//! as-is. Anything else is a filesystem path joined against the base
//! directory and lexically normalized. Resolution never touches the
//! filesystem.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Where a source reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A file on the local filesystem.
    Local,
    /// An `http://` or `https://` URL.
    Remote,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// The concrete thing to fetch for a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// Absolute, normalized filesystem path.
    Local(PathBuf),
    /// URL, unchanged from the reference.
    Remote(String),
}

impl FetchTarget {
    /// The origin of this target.
    pub fn origin(&self) -> Origin {
        match self {
            Self::Local(_) => Origin::Local,
            Self::Remote(_) => Origin::Remote,
        }
    }
}

/// Computes fetch targets relative to a fixed base directory.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    base_dir: PathBuf,
}

impl SourceResolver {
    /// Create a resolver anchored at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The directory local references are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Classify `source` and compute its target.
    pub fn resolve(&self, source: &str) -> FetchTarget {
        if is_remote(source) {
            FetchTarget::Remote(source.to_string())
        } else {
            FetchTarget::Local(normalize(&self.base_dir.join(source)))
        }
    }
}

/// Returns true for references fetched over HTTP.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding segment. `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

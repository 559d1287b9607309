//! Error types for Srcfence operations.
//!
//! Two families live here. [`Error`] is what a whole-document operation can
//! return; only configuration problems and a non-traversable tree produce
//! one. [`FetchError`] describes why a single source could not be loaded and
//! never leaves the per-node task that produced it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in Srcfence operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The document tree could not be traversed.
    #[error("Traversal error: {0}")]
    Traversal(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a traversal error.
    pub fn traversal(msg: impl Into<String>) -> Self {
        Self::Traversal(msg.into())
    }
}

/// Result type alias using Srcfence's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single source reference could not be loaded.
///
/// The `Display` text is the message rendered on the second line of the
/// error placeholder.
#[derive(Error, Debug)]
pub enum FetchError {
    /// A local file could not be read as UTF-8 text.
    #[error("{source}")]
    Read {
        /// Resolved path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The remote server answered with a non-success status.
    #[error("Failed to fetch {url}: {reason}")]
    Status {
        /// Requested URL.
        url: String,
        /// Numeric HTTP status.
        status: u16,
        /// Status reason phrase.
        reason: String,
    },

    /// The request failed below HTTP (DNS, connect, TLS, body decode).
    #[error("{message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Flattened error chain.
        message: String,
    },
}

impl FetchError {
    /// Create a transport error from any error, flattening its source chain.
    pub fn transport(url: impl Into<String>, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut cause = err.source();
        while let Some(inner) = cause {
            let text = inner.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            cause = inner.source();
        }
        Self::Transport {
            url: url.into(),
            message,
        }
    }

    /// Returns true if this error came from a local read.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_constructors() {
        assert!(matches!(Error::config("bad"), Error::Config(m) if m == "bad"));
        assert!(matches!(Error::traversal("x"), Error::Traversal(m) if m == "x"));
    }

    #[test]
    fn test_error_display() {
        let err = Error::traversal("not a tree");
        assert_eq!(err.to_string(), "Traversal error: not a tree");
    }

    #[test]
    fn test_read_error_displays_io_message() {
        let source = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = FetchError::Read {
            path: PathBuf::from("/tmp/missing.js"),
            source,
        };
        assert_eq!(err.to_string(), "no such file");
        assert!(err.is_local());
    }

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status {
            url: "https://example.com/a.js".to_string(),
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch https://example.com/a.js: Not Found"
        );
        assert!(!err.is_local());
    }

    #[test]
    fn test_transport_flattens_chain() {
        #[derive(Debug, Error)]
        #[error("error sending request")]
        struct Outer(#[source] io::Error);

        let outer = Outer(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        let err = FetchError::transport("http://127.0.0.1:1/", &outer);
        assert_eq!(err.to_string(), "error sending request: refused");
    }
}

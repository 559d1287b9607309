//! Writing resolved outcomes back into code nodes.

use crate::FetchError;
use crate::resolve::Origin;
use crate::traits::CodeNode;

/// Terminal result of resolving one code node's source.
#[derive(Debug)]
pub enum Outcome {
    /// The source was retrieved.
    Loaded {
        /// Retrieved text, untouched.
        content: String,
        /// Where it came from.
        origin: Origin,
    },
    /// The source could not be retrieved.
    Failed {
        /// Why retrieval failed.
        error: FetchError,
        /// Where it was supposed to come from.
        origin: Origin,
        /// The reference as written in the fence meta.
        source: String,
    },
}

impl Outcome {
    /// Returns true if the source was retrieved.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// The two-line comment written into a node whose source failed to load.
///
/// Always uses `//` regardless of the fence language.
pub fn error_placeholder(origin: Origin, source: &str, message: &str) -> String {
    let what = match origin {
        Origin::Local => "local file",
        Origin::Remote => "remote code",
    };
    format!("// Error loading {what} from {source}\n// {message}")
}

/// Overwrite `node`'s value and meta from `outcome`.
///
/// Meta is replaced with `cleaned_meta` on both branches, so the `src`
/// token is gone even when loading failed. Returns whether the outcome was
/// a success.
pub fn apply<N: CodeNode + ?Sized>(node: &mut N, outcome: Outcome, cleaned_meta: String) -> bool {
    let loaded = outcome.is_loaded();
    let value = match outcome {
        Outcome::Loaded { content, .. } => content,
        Outcome::Failed {
            error,
            origin,
            source,
        } => error_placeholder(origin, &source, &error.to_string()),
    };
    node.set_value(value);
    node.set_meta(Some(cleaned_meta));
    loaded
}

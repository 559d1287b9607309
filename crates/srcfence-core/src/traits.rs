//! The document tree seam.
//!
//! Srcfence never owns a document. Hosts implement [`CodeTree`] to hand out
//! their code nodes and [`CodeNode`] to expose the two fields the transform
//! reads and writes. Everything else about the tree stays opaque.
//!
//! # Example
//!
//! ```
//! use srcfence_core::traits::{CodeNode, CodeTree};
//! use srcfence_core::Result;
//!
//! struct Block {
//!     meta: Option<String>,
//!     value: String,
//! }
//!
//! impl CodeNode for Block {
//!     fn meta(&self) -> Option<&str> {
//!         self.meta.as_deref()
//!     }
//!     fn value(&self) -> &str {
//!         &self.value
//!     }
//!     fn set_meta(&mut self, meta: Option<String>) {
//!         self.meta = meta;
//!     }
//!     fn set_value(&mut self, value: String) {
//!         self.value = value;
//!     }
//! }
//!
//! struct Doc(Vec<Block>);
//!
//! impl CodeTree for Doc {
//!     type Node = Block;
//!
//!     fn code_nodes_mut(&mut self) -> Result<Vec<&mut Block>> {
//!         Ok(self.0.iter_mut().collect())
//!     }
//! }
//! ```

use crate::Result;

/// A mutable code block inside a host document.
pub trait CodeNode {
    /// Text following the language tag, if any.
    fn meta(&self) -> Option<&str>;

    /// Body of the code block.
    fn value(&self) -> &str;

    /// Replace the meta string.
    fn set_meta(&mut self, meta: Option<String>);

    /// Replace the body.
    fn set_value(&mut self, value: String);
}

/// Traversal capability over a host document.
pub trait CodeTree {
    /// The host's code node type.
    type Node: CodeNode;

    /// Every code node in the document, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Traversal`](crate::Error::Traversal) if the
    /// document cannot be walked. This is the only failure a transform
    /// propagates.
    fn code_nodes_mut(&mut self) -> Result<Vec<&mut Self::Node>>;
}

impl<T: CodeTree + ?Sized> CodeTree for &mut T {
    type Node = T::Node;

    fn code_nodes_mut(&mut self) -> Result<Vec<&mut Self::Node>> {
        (**self).code_nodes_mut()
    }
}

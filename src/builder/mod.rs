//! The subresource operation tree builder and the naming conventions it applies.
//!
//! - [`SubresourceOperationTreeBuilder`] - Walks the graph from one root
//! - `conventions` - Operation names, route names and paths as pure functions
//! - `frame` - Immutable traversal frames of the work stack

mod conventions;
mod frame;
mod tree;

pub use tree::SubresourceOperationTreeBuilder;

//! Subresource relations as seen by the tree builder.
//!
//! A [`SubresourceDescriptor`] describes one edge of the resource graph. The
//! [`SubresourceDescriptorResolver`] builds it from the property and resource stores and
//! computes the names the builder needs (inflected property, path segment, edge key).

mod descriptor;
mod resolver;

pub use descriptor::{SubresourceDescriptor, TargetMetadata};
pub use resolver::{ResolveError, SubresourceDescriptorResolver};

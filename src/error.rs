//! Crate-level error type.

use thiserror::Error;

use crate::metadata::{MetadataError, ResourceType};

/// Errors surfaced by tree builds and multi-root builds.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteTreeError {
    /// The requested root is not a registered resource.
    #[error("Unknown resource: {0}")]
    UnknownResource(ResourceType),

    /// Two operations produced the same route name.
    #[error("Route name collision: {route_name}")]
    RouteNameCollision { route_name: String },

    /// A metadata read failed while expanding the tree.
    #[error("Metadata resolution failed: {0}")]
    MetadataResolution(#[from] MetadataError),

    /// A resource or configuration document could not be parsed.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A build task panicked or was cancelled.
    #[error("Build task failed: {0}")]
    BuildTaskFailed(String),
}

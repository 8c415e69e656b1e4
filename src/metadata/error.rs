//! Error types for metadata lookups.

use thiserror::Error;

use super::ResourceType;

/// Errors raised by a metadata store when a lookup cannot be answered.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MetadataError {
    /// The resource type is not registered in the store.
    #[error("Resource not found: {0}")]
    ResourceNotFound(ResourceType),

    /// The resource exists but does not declare the property.
    #[error("Property not found: {resource}::{property}")]
    PropertyNotFound {
        resource: ResourceType,
        property: String,
    },
}

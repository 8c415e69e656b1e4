//! The immutable output row of a subresource tree.

use serde::{Deserialize, Serialize};

use crate::metadata::{HttpMethod, ResourceType};

use super::RouteOptions;

/// One link of the identifier chain carried by an operation.
///
/// `has_identifier` tells the routing layer whether `{identifier_name}` appears in the
/// path for this link (true for the root and for items of a collection relation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierEntry {
    pub property: String,
    pub resource: ResourceType,
    pub has_identifier: bool,
    pub identifier_name: String,
}

impl IdentifierEntry {
    pub fn new(
        property: impl Into<String>,
        resource: ResourceType,
        has_identifier: bool,
        identifier_name: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            resource,
            has_identifier,
            identifier_name: identifier_name.into(),
        }
    }

    /// The `("id", root, true, "id")` entry every chain starts with.
    pub fn root(resource: ResourceType) -> Self {
        Self::new("id", resource, true, "id")
    }
}

/// A single subresource operation ready to be registered by a routing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationRecord {
    pub(crate) property: String,
    pub(crate) is_collection: bool,
    pub(crate) method: HttpMethod,
    pub(crate) operation_name: String,
    pub(crate) route_name: String,
    pub(crate) path: String,
    pub(crate) resource_class: ResourceType,
    pub(crate) identifiers: Vec<IdentifierEntry>,
    pub(crate) short_names: Vec<String>,
    #[serde(flatten)]
    pub(crate) route_options: RouteOptions,
}

impl OperationRecord {
    pub fn property(&self) -> &str {
        &self.property
    }

    /// True for collection operations only.
    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The resource type returned by this operation.
    pub fn resource_class(&self) -> &ResourceType {
        &self.resource_class
    }

    pub fn identifiers(&self) -> &[IdentifierEntry] {
        &self.identifiers
    }

    /// Short names touched on the path, target first and root last.
    pub fn short_names(&self) -> &[String] {
        &self.short_names
    }

    pub fn route_options(&self) -> &RouteOptions {
        &self.route_options
    }
}

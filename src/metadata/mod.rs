//! # Metadata Collaborators
//!
//! The tree builder never parses resource definitions itself. It asks two read-only
//! stores for everything it needs:
//!
//! - [`ResourceMetadataStore`]: short names, route prefixes, the operations a resource
//!   exposes and the developer overrides declared for subresource operations.
//! - [`PropertyMetadataStore`]: the ordered property names of a resource, which of
//!   them is the identifier, and which of them are subresource relations.
//!
//! Both traits are object safe so the builder can borrow them as `&dyn` and stores can
//! be shared across threads behind an `Arc` (see [`crate::lifecycle::RouteSystem`]).
//!
//! [`InMemoryMetadata`] implements both traits over plain definitions and is what the
//! tests and the command-line tool use.

mod error;
mod in_memory;

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::operation::RouteOptionsOverride;

pub use error::MetadataError;
pub use in_memory::{InMemoryMetadata, InMemoryMetadataBuilder, PropertyDefinition, ResourceDefinition, ResourceDocument};

/// Collection operations populated when a resource declares none.
pub const DEFAULT_COLLECTION_OPERATIONS: &[HttpMethod] = &[HttpMethod::Get, HttpMethod::Post];

/// Item operations populated when a resource declares none.
pub const DEFAULT_ITEM_OPERATIONS: &[HttpMethod] = &[HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete];

/// Opaque identifier of a resource type, e.g. `App\Entity\Dummy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path component of the type name (`App\Entity\Dummy` -> `Dummy`).
    pub fn base_name(&self) -> &str {
        self.0
            .rsplit(['\\', ':', '.'])
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.0)
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ResourceType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// HTTP verbs an operation can be exposed with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Lower-cased verb as used inside operation names (`get`, `put`, ...).
    pub fn lowercase(self) -> String {
        self.as_ref().to_ascii_lowercase()
    }
}

/// How deep a subresource branch may be followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxDepth {
    Unlimited,
    Limited(u32),
}

impl MaxDepth {
    /// True when a frame at `depth` may not expand any further.
    pub fn is_reached(self, depth: u32) -> bool {
        matches!(self, MaxDepth::Limited(max) if depth >= max)
    }
}

/// A property-level relation to another resource, as declared on the property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubresourceRelation {
    pub target: ResourceType,
    #[serde(default)]
    pub collection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<MaxDepth>,
}

impl SubresourceRelation {
    /// A relation yielding many `target` instances.
    pub fn collection(target: impl Into<ResourceType>) -> Self {
        Self {
            target: target.into(),
            collection: true,
            max_depth: None,
        }
    }

    /// A relation yielding a single `target` instance.
    pub fn single(target: impl Into<ResourceType>) -> Self {
        Self {
            target: target.into(),
            collection: false,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: MaxDepth) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Developer override for one subresource operation, keyed by operation name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(flatten)]
    pub route_options: RouteOptionsOverride,
}

impl OperationOverride {
    /// Override that only replaces the path.
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            route_options: RouteOptionsOverride::default(),
        }
    }
}

/// Read-only resource-level metadata.
pub trait ResourceMetadataStore {
    /// Whether `resource` is a registered resource type.
    fn contains(&self, resource: &ResourceType) -> bool;

    fn short_name_of(&self, resource: &ResourceType) -> Result<String, MetadataError>;

    /// Route prefix as declared; empty when there is none.
    fn route_prefix_of(&self, resource: &ResourceType) -> Result<String, MetadataError>;

    fn declared_operation_override(
        &self,
        resource: &ResourceType,
        operation_name: &str,
    ) -> Result<Option<OperationOverride>, MetadataError>;

    /// Declared collection operations, `None` when the resource leaves them to defaults.
    fn collection_operations_of(&self, resource: &ResourceType) -> Result<Option<Vec<HttpMethod>>, MetadataError>;

    /// Declared item operations, `None` when the resource leaves them to defaults.
    fn item_operations_of(&self, resource: &ResourceType) -> Result<Option<Vec<HttpMethod>>, MetadataError>;
}

/// Read-only property-level metadata.
pub trait PropertyMetadataStore {
    /// Property names in declaration order.
    fn properties_of(&self, resource: &ResourceType) -> Result<Vec<String>, MetadataError>;

    fn is_identifier(&self, resource: &ResourceType, property: &str) -> Result<bool, MetadataError>;

    fn subresource_of(
        &self,
        resource: &ResourceType,
        property: &str,
    ) -> Result<Option<SubresourceRelation>, MetadataError>;
}

/// A store answering both kinds of queries.
pub trait MetadataStore: ResourceMetadataStore + PropertyMetadataStore {}

impl<T: ResourceMetadataStore + PropertyMetadataStore + ?Sized> MetadataStore for T {}

/// Fills in the default operations when a resource declares none.
///
/// An explicitly empty declaration stays empty.
pub fn populate_operations(declared: Option<Vec<HttpMethod>>, defaults: &[HttpMethod]) -> Vec<HttpMethod> {
    declared.unwrap_or_else(|| defaults.to_vec())
}

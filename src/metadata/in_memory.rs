//! # In-Memory Metadata
//!
//! A [`MetadataStore`](super::MetadataStore) over plain resource definitions.
//!
//! Definitions are assembled with a fluent builder, in the same spirit as the expectation
//! builders used in tests:
//!
//! ```
//! use subresource_routes::metadata::{InMemoryMetadata, PropertyDefinition, ResourceDefinition, SubresourceRelation};
//!
//! let metadata = InMemoryMetadata::builder()
//!     .resource(
//!         ResourceDefinition::new("App\\Entity\\Dummy")
//!             .with_property(PropertyDefinition::identifier("id"))
//!             .with_property(PropertyDefinition::subresource(
//!                 "relatedDummies",
//!                 SubresourceRelation::collection("App\\Entity\\RelatedDummy"),
//!             )),
//!     )
//!     .resource(ResourceDefinition::new("App\\Entity\\RelatedDummy"))
//!     .build();
//! assert_eq!(metadata.resource_types().len(), 2);
//! ```
//!
//! or deserialized from a JSON resource document with [`InMemoryMetadata::from_json_str`]:
//!
//! ```json
//! {
//!   "resources": [
//!     {
//!       "type": "App\\Entity\\Question",
//!       "properties": [
//!         { "name": "id", "identifier": true },
//!         { "name": "answers", "subresource": { "target": "App\\Entity\\Answer", "collection": true } }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RouteTreeError;

use super::{
    HttpMethod, MetadataError, OperationOverride, PropertyMetadataStore, ResourceMetadataStore, ResourceType,
    SubresourceRelation,
};

/// One property of a resource definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(default)]
    pub identifier: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subresource: Option<SubresourceRelation>,
}

impl PropertyDefinition {
    /// A property that is neither an identifier nor a subresource.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: false,
            subresource: None,
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self {
            identifier: true,
            ..Self::plain(name)
        }
    }

    pub fn subresource(name: impl Into<String>, relation: SubresourceRelation) -> Self {
        Self {
            subresource: Some(relation),
            ..Self::plain(name)
        }
    }

    /// Marks the property as the owning resource's identifier.
    pub fn as_identifier(mut self) -> Self {
        self.identifier = true;
        self
    }
}

/// Everything the store knows about one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub route_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_operations: Option<Vec<HttpMethod>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_operations: Option<Vec<HttpMethod>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub subresource_operations: BTreeMap<String, OperationOverride>,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

impl ResourceDefinition {
    pub fn new(resource_type: impl Into<ResourceType>) -> Self {
        Self {
            resource_type: resource_type.into(),
            short_name: None,
            route_prefix: String::new(),
            collection_operations: None,
            item_operations: None,
            subresource_operations: BTreeMap::new(),
            properties: Vec::new(),
        }
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn with_route_prefix(mut self, route_prefix: impl Into<String>) -> Self {
        self.route_prefix = route_prefix.into();
        self
    }

    pub fn with_collection_operations(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.collection_operations = Some(methods.into_iter().collect());
        self
    }

    pub fn with_item_operations(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.item_operations = Some(methods.into_iter().collect());
        self
    }

    /// Declares an override for the subresource operation named `operation_name`.
    pub fn with_subresource_operation(mut self, operation_name: impl Into<String>, operation: OperationOverride) -> Self {
        self.subresource_operations.insert(operation_name.into(), operation);
        self
    }

    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    /// Declared short name, or the last component of the type name.
    pub fn effective_short_name(&self) -> &str {
        self.short_name
            .as_deref()
            .unwrap_or_else(|| self.resource_type.base_name())
    }

    fn property(&self, name: &str) -> Result<&PropertyDefinition, MetadataError> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .ok_or_else(|| MetadataError::PropertyNotFound {
                resource: self.resource_type.clone(),
                property: name.to_string(),
            })
    }
}

/// Top-level shape of a JSON resource document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDocument {
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
}

/// Metadata store backed by resource definitions held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadata {
    resources: Vec<ResourceDefinition>,
    index: HashMap<ResourceType, usize>,
}

impl InMemoryMetadata {
    pub fn builder() -> InMemoryMetadataBuilder {
        InMemoryMetadataBuilder::default()
    }

    /// Indexes `definitions`; a repeated resource type replaces the earlier definition.
    pub fn from_definitions(definitions: impl IntoIterator<Item = ResourceDefinition>) -> Self {
        let mut metadata = Self::default();
        for definition in definitions {
            match metadata.index.get(&definition.resource_type) {
                Some(&position) => {
                    warn!(resource = %definition.resource_type, "Duplicate resource definition replaced");
                    metadata.resources[position] = definition;
                }
                None => {
                    metadata
                        .index
                        .insert(definition.resource_type.clone(), metadata.resources.len());
                    metadata.resources.push(definition);
                }
            }
        }
        debug!(resources = metadata.resources.len(), "Indexed resource definitions");
        metadata
    }

    pub fn from_document(document: ResourceDocument) -> Self {
        Self::from_definitions(document.resources)
    }

    /// Parses a JSON [`ResourceDocument`].
    pub fn from_json_str(json: &str) -> Result<Self, RouteTreeError> {
        let document: ResourceDocument =
            serde_json::from_str(json).map_err(|e| RouteTreeError::InvalidDocument(e.to_string()))?;
        Ok(Self::from_document(document))
    }

    /// Registered resource types in declaration order.
    pub fn resource_types(&self) -> Vec<ResourceType> {
        self.resources
            .iter()
            .map(|definition| definition.resource_type.clone())
            .collect()
    }

    pub fn definition(&self, resource: &ResourceType) -> Result<&ResourceDefinition, MetadataError> {
        self.index
            .get(resource)
            .map(|&position| &self.resources[position])
            .ok_or_else(|| MetadataError::ResourceNotFound(resource.clone()))
    }
}

/// Fluent builder for [`InMemoryMetadata`].
#[derive(Debug, Default)]
pub struct InMemoryMetadataBuilder {
    definitions: Vec<ResourceDefinition>,
}

impl InMemoryMetadataBuilder {
    pub fn resource(mut self, definition: ResourceDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn build(self) -> InMemoryMetadata {
        InMemoryMetadata::from_definitions(self.definitions)
    }
}

impl ResourceMetadataStore for InMemoryMetadata {
    fn contains(&self, resource: &ResourceType) -> bool {
        self.index.contains_key(resource)
    }

    fn short_name_of(&self, resource: &ResourceType) -> Result<String, MetadataError> {
        Ok(self.definition(resource)?.effective_short_name().to_string())
    }

    fn route_prefix_of(&self, resource: &ResourceType) -> Result<String, MetadataError> {
        Ok(self.definition(resource)?.route_prefix.clone())
    }

    fn declared_operation_override(
        &self,
        resource: &ResourceType,
        operation_name: &str,
    ) -> Result<Option<OperationOverride>, MetadataError> {
        Ok(self
            .definition(resource)?
            .subresource_operations
            .get(operation_name)
            .cloned())
    }

    fn collection_operations_of(&self, resource: &ResourceType) -> Result<Option<Vec<HttpMethod>>, MetadataError> {
        Ok(self.definition(resource)?.collection_operations.clone())
    }

    fn item_operations_of(&self, resource: &ResourceType) -> Result<Option<Vec<HttpMethod>>, MetadataError> {
        Ok(self.definition(resource)?.item_operations.clone())
    }
}

impl PropertyMetadataStore for InMemoryMetadata {
    fn properties_of(&self, resource: &ResourceType) -> Result<Vec<String>, MetadataError> {
        Ok(self
            .definition(resource)?
            .properties
            .iter()
            .map(|property| property.name.clone())
            .collect())
    }

    fn is_identifier(&self, resource: &ResourceType, property: &str) -> Result<bool, MetadataError> {
        Ok(self.definition(resource)?.property(property)?.identifier)
    }

    fn subresource_of(
        &self,
        resource: &ResourceType,
        property: &str,
    ) -> Result<Option<SubresourceRelation>, MetadataError> {
        Ok(self.definition(resource)?.property(property)?.subresource.clone())
    }
}

use std::cell::OnceCell;
use std::fmt;

use crate::metadata::{
    populate_operations, HttpMethod, MaxDepth, MetadataError, ResourceMetadataStore, ResourceType,
    DEFAULT_COLLECTION_OPERATIONS, DEFAULT_ITEM_OPERATIONS,
};

/// Target-side metadata of an edge, read on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMetadata {
    pub short_name: String,
    pub collection_operations: Vec<HttpMethod>,
    pub item_operations: Vec<HttpMethod>,
}

/// One `source.property -> target` relation, with the names derived from it.
///
/// Immutable once resolved. The target's resource metadata is only fetched when
/// [`SubresourceDescriptor::target_metadata`] is first called, so pruned edges never
/// touch the target.
pub struct SubresourceDescriptor<'s> {
    source: ResourceType,
    property: String,
    target: ResourceType,
    is_collection: bool,
    max_depth: Option<MaxDepth>,
    is_identifier_property: bool,
    inflected_property: String,
    path_segment: String,
    resources: &'s dyn ResourceMetadataStore,
    target_metadata: OnceCell<TargetMetadata>,
}

impl<'s> SubresourceDescriptor<'s> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        source: ResourceType,
        property: String,
        target: ResourceType,
        is_collection: bool,
        max_depth: Option<MaxDepth>,
        is_identifier_property: bool,
        inflected_property: String,
        path_segment: String,
        resources: &'s dyn ResourceMetadataStore,
    ) -> Self {
        Self {
            source,
            property,
            target,
            is_collection,
            max_depth,
            is_identifier_property,
            inflected_property,
            path_segment,
            resources,
            target_metadata: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &ResourceType {
        &self.source
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn target(&self) -> &ResourceType {
        &self.target
    }

    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    /// Declared depth limit of this relation, `None` when unset.
    pub fn max_depth(&self) -> Option<MaxDepth> {
        self.max_depth
    }

    pub fn is_identifier_property(&self) -> bool {
        self.is_identifier_property
    }

    /// Property name as it appears in operation names (`relatedDummies`).
    pub fn inflected_property(&self) -> &str {
        &self.inflected_property
    }

    /// Property name as it appears in paths (`related_dummies`).
    pub fn path_segment(&self) -> &str {
        &self.path_segment
    }

    /// `source:property:target`, the key used for cycle detection.
    pub fn edge_key(&self) -> String {
        format!("{}:{}:{}", self.source, self.property, self.target)
    }

    pub fn target_metadata(&self) -> Result<&TargetMetadata, MetadataError> {
        if let Some(metadata) = self.target_metadata.get() {
            return Ok(metadata);
        }
        let metadata = TargetMetadata {
            short_name: self.resources.short_name_of(&self.target)?,
            collection_operations: populate_operations(
                self.resources.collection_operations_of(&self.target)?,
                DEFAULT_COLLECTION_OPERATIONS,
            ),
            item_operations: populate_operations(
                self.resources.item_operations_of(&self.target)?,
                DEFAULT_ITEM_OPERATIONS,
            ),
        };
        Ok(self.target_metadata.get_or_init(|| metadata))
    }
}

impl fmt::Debug for SubresourceDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubresourceDescriptor")
            .field("source", &self.source)
            .field("property", &self.property)
            .field("target", &self.target)
            .field("is_collection", &self.is_collection)
            .field("max_depth", &self.max_depth)
            .field("is_identifier_property", &self.is_identifier_property)
            .field("inflected_property", &self.inflected_property)
            .field("path_segment", &self.path_segment)
            .finish_non_exhaustive()
    }
}

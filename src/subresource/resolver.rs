use thiserror::Error;
use tracing::trace;

use crate::metadata::{MetadataError, PropertyMetadataStore, ResourceMetadataStore, ResourceType};
use crate::naming::{inflect, PathSegmentNamer};

use super::SubresourceDescriptor;

/// Errors raised while resolving a descriptor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// The property exists but declares no subresource relation.
    #[error("Not a subresource: {resource}::{property}")]
    NotASubresource { resource: ResourceType, property: String },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Builds [`SubresourceDescriptor`]s from the two metadata stores.
#[derive(Clone, Copy)]
pub struct SubresourceDescriptorResolver<'s> {
    properties: &'s dyn PropertyMetadataStore,
    resources: &'s dyn ResourceMetadataStore,
    namer: &'s dyn PathSegmentNamer,
}

impl<'s> SubresourceDescriptorResolver<'s> {
    pub fn new(
        properties: &'s dyn PropertyMetadataStore,
        resources: &'s dyn ResourceMetadataStore,
        namer: &'s dyn PathSegmentNamer,
    ) -> Self {
        Self {
            properties,
            resources,
            namer,
        }
    }

    /// Resolves `resource.property`; relation fields are taken verbatim from the declaration.
    pub fn resolve(&self, resource: &ResourceType, property: &str) -> Result<SubresourceDescriptor<'s>, ResolveError> {
        let relation = self
            .properties
            .subresource_of(resource, property)?
            .ok_or_else(|| ResolveError::NotASubresource {
                resource: resource.clone(),
                property: property.to_string(),
            })?;
        let is_identifier_property = self.properties.is_identifier(resource, property)?;

        trace!(%resource, property, target = %relation.target, collection = relation.collection, "Resolved subresource");

        Ok(SubresourceDescriptor::new(
            resource.clone(),
            property.to_string(),
            relation.target,
            relation.collection,
            relation.max_depth,
            is_identifier_property,
            inflect(property, relation.collection),
            self.namer.segment_for(property, relation.collection),
            self.resources,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        HttpMethod, InMemoryMetadata, MaxDepth, PropertyDefinition, ResourceDefinition, SubresourceRelation,
    };
    use crate::naming::{DashPathSegmentNamer, UnderscorePathSegmentNamer};

    fn metadata() -> InMemoryMetadata {
        InMemoryMetadata::builder()
            .resource(
                ResourceDefinition::new("Dummy")
                    .with_property(PropertyDefinition::identifier("id"))
                    .with_property(PropertyDefinition::plain("name"))
                    .with_property(PropertyDefinition::subresource(
                        "relatedDummies",
                        SubresourceRelation::collection("RelatedDummy").with_max_depth(MaxDepth::Limited(1)),
                    ))
                    .with_property(PropertyDefinition::subresource(
                        "relatedDummy",
                        SubresourceRelation::single("RelatedDummy"),
                    )),
            )
            .resource(ResourceDefinition::new("RelatedDummy").with_item_operations([HttpMethod::Get]))
            .build()
    }

    #[test]
    fn test_resolve_collection_relation() {
        let metadata = metadata();
        let resolver = SubresourceDescriptorResolver::new(&metadata, &metadata, &UnderscorePathSegmentNamer);

        let descriptor = resolver.resolve(&ResourceType::new("Dummy"), "relatedDummies").unwrap();
        assert_eq!(descriptor.target(), &ResourceType::new("RelatedDummy"));
        assert!(descriptor.is_collection());
        assert_eq!(descriptor.max_depth(), Some(MaxDepth::Limited(1)));
        assert!(!descriptor.is_identifier_property());
        assert_eq!(descriptor.inflected_property(), "relatedDummies");
        assert_eq!(descriptor.path_segment(), "related_dummies");
        assert_eq!(descriptor.source(), &ResourceType::new("Dummy"));
        assert_eq!(descriptor.edge_key(), "Dummy:relatedDummies:RelatedDummy");
    }

    #[test]
    fn test_resolve_single_relation_with_dash_namer() {
        let metadata = metadata();
        let resolver = SubresourceDescriptorResolver::new(&metadata, &metadata, &DashPathSegmentNamer);

        let descriptor = resolver.resolve(&ResourceType::new("Dummy"), "relatedDummy").unwrap();
        assert!(!descriptor.is_collection());
        assert_eq!(descriptor.max_depth(), None);
        assert_eq!(descriptor.inflected_property(), "relatedDummy");
        assert_eq!(descriptor.path_segment(), "related-dummy");
    }

    #[test]
    fn test_target_metadata_is_populated() {
        let metadata = metadata();
        let resolver = SubresourceDescriptorResolver::new(&metadata, &metadata, &UnderscorePathSegmentNamer);
        let descriptor = resolver.resolve(&ResourceType::new("Dummy"), "relatedDummy").unwrap();

        let target = descriptor.target_metadata().unwrap();
        assert_eq!(target.short_name, "RelatedDummy");
        assert_eq!(target.collection_operations, vec![HttpMethod::Get, HttpMethod::Post]);
        assert_eq!(target.item_operations, vec![HttpMethod::Get]);
    }

    #[test]
    fn test_plain_property_is_not_a_subresource() {
        let metadata = metadata();
        let resolver = SubresourceDescriptorResolver::new(&metadata, &metadata, &UnderscorePathSegmentNamer);

        let result = resolver.resolve(&ResourceType::new("Dummy"), "name");
        assert_eq!(
            result.unwrap_err(),
            ResolveError::NotASubresource {
                resource: ResourceType::new("Dummy"),
                property: "name".to_string()
            }
        );
    }

    #[test]
    fn test_missing_target_fails_lazily() {
        let metadata = InMemoryMetadata::builder()
            .resource(
                ResourceDefinition::new("Dummy")
                    .with_property(PropertyDefinition::subresource("ghost", SubresourceRelation::single("Ghost"))),
            )
            .build();
        let resolver = SubresourceDescriptorResolver::new(&metadata, &metadata, &UnderscorePathSegmentNamer);

        let descriptor = resolver.resolve(&ResourceType::new("Dummy"), "ghost").unwrap();
        assert_eq!(
            descriptor.target_metadata(),
            Err(MetadataError::ResourceNotFound(ResourceType::new("Ghost")))
        );
    }
}

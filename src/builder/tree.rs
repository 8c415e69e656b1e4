//! # Subresource Operation Tree Builder
//!
//! Walks the resource graph from one root and emits an [`OperationRecord`] for every
//! reachable `(subresource chain, HTTP method)` pair.
//!
//! ## Traversal
//!
//! The walk uses an explicit stack of [`TraversalFrame`]s. Popping a frame expands each
//! property of its resource in store order:
//!
//! 1. resolve the descriptor (plain properties are pruned),
//! 2. resolve the effective max depth and prune when it is reached (relations leaving
//!    the root declare it, and depth restarts whenever the walk is back at the root),
//! 3. prune edges already visited on this path (`source:property:target`),
//! 4. apply the last-item fold for identifier properties,
//! 5. emit collection operations (collection relations only) and item operations,
//! 6. push a child frame when anything was emitted.
//!
//! Pruning never aborts sibling properties.

use tracing::{debug, info, instrument, trace, warn};

use crate::config::BuilderConfig;
use crate::error::RouteTreeError;
use crate::metadata::{
    HttpMethod, MaxDepth, MetadataStore, PropertyMetadataStore, ResourceMetadataStore, ResourceType,
};
use crate::operation::{IdentifierEntry, OperationRecord, OperationTable};
use crate::subresource::{ResolveError, SubresourceDescriptor, SubresourceDescriptorResolver};

use super::conventions::{
    append_identifier, collection_path, disambiguate_identifier, folded_item_path, item_path, nested_base,
    operation_name, record_short_names, root_base_path, route_name, strip_format_suffix, FOLDED_ITEM_NAME,
};
use super::frame::{FrameExpansion, TraversalFrame};

/// Overridden collection paths re-base descendants, checked in this order.
const COLLECTION_BASE_METHODS: &[HttpMethod] = &[HttpMethod::Get, HttpMethod::Post];

/// Overridden item paths re-base descendants, checked in this order.
const ITEM_BASE_METHODS: &[HttpMethod] = &[HttpMethod::Get, HttpMethod::Put, HttpMethod::Delete];

// =============================================================================
// 1. THE BUILDER
// =============================================================================

/// Computes the subresource operation table of a root resource.
///
/// # Architecture Note
/// The builder only borrows its collaborators. Every call to [`build`](Self::build)
/// owns its own stack and output table, so one builder can serve any number of
/// sequential builds, and independent builders can run on different threads against
/// the same store (see [`RouteSystem`](crate::lifecycle::RouteSystem)).
pub struct SubresourceOperationTreeBuilder<'s> {
    properties: &'s dyn PropertyMetadataStore,
    resources: &'s dyn ResourceMetadataStore,
    resolver: SubresourceDescriptorResolver<'s>,
    config: &'s BuilderConfig,
}

/// Root-level values every emitted record needs.
struct RootContext<'r> {
    resource: &'r ResourceType,
    short_name: String,
}

/// One operation about to be recorded.
struct Emission<'a> {
    property: &'a str,
    resource: &'a ResourceType,
    method: HttpMethod,
    operation_name: String,
    is_collection: bool,
    default_path: String,
    identifiers: &'a [IdentifierEntry],
    short_names: &'a [String],
}

impl<'s> SubresourceOperationTreeBuilder<'s> {
    pub fn new(
        properties: &'s dyn PropertyMetadataStore,
        resources: &'s dyn ResourceMetadataStore,
        config: &'s BuilderConfig,
    ) -> Self {
        Self {
            properties,
            resources,
            resolver: SubresourceDescriptorResolver::new(properties, resources, config.namer()),
            config,
        }
    }

    /// Builder over a store answering both kinds of metadata queries.
    pub fn from_store<S: MetadataStore + 's>(store: &'s S, config: &'s BuilderConfig) -> Self {
        Self::new(store, store, config)
    }

    /// Builds the full operation table for `root`, keyed by route name.
    ///
    /// # Errors
    ///
    /// - [`RouteTreeError::UnknownResource`] if `root` is not registered
    /// - [`RouteTreeError::MetadataResolution`] if a metadata read fails and
    ///   `skip_unresolvable_branches` is off
    /// - [`RouteTreeError::RouteNameCollision`] if two operations share a route name
    #[instrument(skip_all, fields(root = %root))]
    pub fn build(&self, root: &ResourceType) -> Result<OperationTable, RouteTreeError> {
        if !self.resources.contains(root) {
            return Err(RouteTreeError::UnknownResource(root.clone()));
        }

        let short_name = self.resources.short_name_of(root)?;
        let route_prefix = self.resources.route_prefix_of(root)?;
        let base_path = root_base_path(&route_prefix, &self.config.namer().segment_for(&short_name, true));
        let context = RootContext {
            resource: root,
            short_name: short_name.clone(),
        };

        let mut table = OperationTable::new();
        let mut stack = vec![TraversalFrame::root(root.clone(), short_name, base_path)];

        while let Some(frame) = stack.pop() {
            let properties = match self.properties.properties_of(&frame.resource) {
                Ok(properties) => properties,
                Err(error) if self.config.skip_unresolvable_branches => {
                    warn!(resource = %frame.resource, %error, "Skipping unresolvable branch");
                    continue;
                }
                Err(error) => return Err(error.into()),
            };
            debug!(
                resource = %frame.resource,
                depth = frame.depth,
                pending = properties.len(),
                "Visiting frame"
            );

            let mut children = Vec::new();
            for property in &properties {
                match self.expand_property(&context, &frame, property, &mut table) {
                    Ok(Some(child)) => children.push(child),
                    Ok(None) => {}
                    Err(RouteTreeError::MetadataResolution(error)) if self.config.skip_unresolvable_branches => {
                        warn!(resource = %frame.resource, property = %property, %error, "Skipping unresolvable branch");
                    }
                    Err(error) => return Err(error),
                }
            }
            // Reversed so the first property's subtree is popped first.
            stack.extend(children.into_iter().rev());
        }

        info!(root = %root, routes = table.len(), "Built subresource operation tree");
        Ok(table)
    }

    // =========================================================================
    // 2. EDGE EXPANSION
    // =========================================================================

    fn expand_property(
        &self,
        root: &RootContext<'_>,
        frame: &TraversalFrame,
        property: &str,
        table: &mut OperationTable,
    ) -> Result<Option<TraversalFrame>, RouteTreeError> {
        let descriptor = match self.resolver.resolve(&frame.resource, property) {
            Ok(descriptor) => descriptor,
            Err(ResolveError::NotASubresource { .. }) => {
                trace!(resource = %frame.resource, property, "Pruned: not a subresource");
                return Ok(None);
            }
            Err(ResolveError::Metadata(error)) => return Err(error.into()),
        };

        // Only a relation leaving the root declares the limit. Depth restarts at the root.
        let (depth, declared) = if frame.resource == *root.resource {
            (0, descriptor.max_depth())
        } else {
            (frame.depth, frame.max_depth)
        };
        let max_depth = declared
            .or(self.config.default_max_depth)
            .unwrap_or(MaxDepth::Unlimited);
        if max_depth.is_reached(depth) {
            trace!(resource = %frame.resource, property, depth, ?max_depth, "Pruned: max depth");
            return Ok(None);
        }

        let edge_key = descriptor.edge_key();
        if frame.has_visited(&edge_key) {
            trace!(resource = %frame.resource, property, edge = %edge_key, "Pruned: cycle");
            return Ok(None);
        }

        if descriptor.is_identifier_property() {
            if frame.allow_last_item {
                self.fold_last_item(root, frame, &descriptor, table)?;
            } else {
                trace!(resource = %frame.resource, property, "Pruned: identifier start");
            }
            return Ok(None);
        }

        let target = descriptor.target_metadata()?;
        let suffix = self.config.format_suffix.as_str();
        let segment = descriptor.path_segment();
        let identifier_name = disambiguate_identifier(&frame.identifiers, property);
        let item_identifier = descriptor.is_collection().then_some(identifier_name.as_str());
        let short_names = record_short_names(&target.short_name, &frame.short_names);

        let mut item_identifiers = frame.identifiers.clone();
        item_identifiers.push(IdentifierEntry::new(
            property,
            descriptor.target().clone(),
            descriptor.is_collection(),
            identifier_name.as_str(),
        ));

        let mut emitted = 0;
        let mut collection_overrides = Vec::new();
        if descriptor.is_collection() {
            for &method in &target.collection_operations {
                let emission = Emission {
                    property,
                    resource: descriptor.target(),
                    method,
                    operation_name: operation_name(&frame.name_prefix, descriptor.inflected_property(), method, false),
                    is_collection: true,
                    default_path: collection_path(&frame.collection_base, segment, suffix),
                    identifiers: &frame.identifiers,
                    short_names: &short_names,
                };
                if let Some(path) = self.emit(root, table, emission)? {
                    collection_overrides.push((method, path));
                }
                emitted += 1;
            }
        }

        let mut item_overrides = Vec::new();
        for &method in &target.item_operations {
            let emission = Emission {
                property,
                resource: descriptor.target(),
                method,
                operation_name: operation_name(
                    &frame.name_prefix,
                    descriptor.inflected_property(),
                    method,
                    descriptor.is_collection(),
                ),
                is_collection: false,
                default_path: item_path(&frame.item_base, segment, item_identifier, suffix),
                identifiers: &item_identifiers,
                short_names: &short_names,
            };
            if let Some(path) = self.emit(root, table, emission)? {
                item_overrides.push((method, path));
            }
            emitted += 1;
        }

        if emitted == 0 {
            trace!(resource = %frame.resource, property, "Pruned: target exposes no operations");
            return Ok(None);
        }

        let collection_base = match first_overridden(&collection_overrides, COLLECTION_BASE_METHODS) {
            Some(path) => append_identifier(strip_format_suffix(path, suffix), item_identifier),
            None => nested_base(&frame.collection_base, segment, item_identifier),
        };
        let item_base = match first_overridden(&item_overrides, ITEM_BASE_METHODS) {
            Some(path) => strip_format_suffix(path, suffix).to_string(),
            None => nested_base(&frame.item_base, segment, item_identifier),
        };

        Ok(Some(frame.expand(FrameExpansion {
            target: descriptor.target().clone(),
            depth: depth + 1,
            max_depth,
            inflected_property: descriptor.inflected_property().to_string(),
            collection_base,
            item_base,
            identifier: IdentifierEntry::new(
                property,
                descriptor.target().clone(),
                descriptor.is_collection(),
                identifier_name,
            ),
            edge_key,
            target_short_name: target.short_name.clone(),
            is_collection: descriptor.is_collection(),
        })))
    }

    /// Compatibility shim: an identifier property declared as a subresource, reached
    /// through a collection relation, is served as the item of that collection.
    ///
    /// No new path segment and no child frame are created.
    fn fold_last_item(
        &self,
        root: &RootContext<'_>,
        frame: &TraversalFrame,
        descriptor: &SubresourceDescriptor<'_>,
        table: &mut OperationTable,
    ) -> Result<(), RouteTreeError> {
        let target = descriptor.target_metadata()?;
        let short_names = record_short_names(&target.short_name, &frame.short_names);

        for &method in &target.item_operations {
            let emission = Emission {
                property: descriptor.property(),
                resource: descriptor.target(),
                method,
                operation_name: operation_name(&frame.name_prefix, FOLDED_ITEM_NAME, method, false),
                is_collection: false,
                default_path: folded_item_path(&frame.item_base, &self.config.format_suffix),
                identifiers: &frame.identifiers,
                short_names: &short_names,
            };
            self.emit(root, table, emission)?;
        }
        debug!(resource = %frame.resource, property = descriptor.property(), "Folded identifier subresource into parent item");
        Ok(())
    }

    // =========================================================================
    // 3. RECORD EMISSION
    // =========================================================================

    /// Records one operation, applying the root's override for its operation name.
    ///
    /// Returns the overridden path, if any.
    fn emit(
        &self,
        root: &RootContext<'_>,
        table: &mut OperationTable,
        emission: Emission<'_>,
    ) -> Result<Option<String>, RouteTreeError> {
        let declared = self
            .resources
            .declared_operation_override(root.resource, &emission.operation_name)?;
        let (overridden_path, route_options) = match declared {
            Some(declared) => (
                declared.path,
                self.config.default_route_options.merged_with(&declared.route_options),
            ),
            None => (None, self.config.default_route_options.clone()),
        };

        let route_name = route_name(&self.config.route_name_prefix, &root.short_name, &emission.operation_name);
        let path = overridden_path.clone().unwrap_or(emission.default_path);
        debug!(route_name = %route_name, path = %path, method = %emission.method, "Emitting operation");

        table.insert(OperationRecord {
            property: emission.property.to_string(),
            is_collection: emission.is_collection,
            method: emission.method,
            operation_name: emission.operation_name,
            route_name,
            path,
            resource_class: emission.resource.clone(),
            identifiers: emission.identifiers.to_vec(),
            short_names: emission.short_names.to_vec(),
            route_options,
        })?;
        Ok(overridden_path)
    }
}

fn first_overridden<'p>(paths: &'p [(HttpMethod, String)], priority: &[HttpMethod]) -> Option<&'p str> {
    priority.iter().find_map(|wanted| {
        paths
            .iter()
            .find(|(method, _)| method == wanted)
            .map(|(_, path)| path.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{InMemoryMetadata, OperationOverride, PropertyDefinition, ResourceDefinition, SubresourceRelation};

    fn dummy_graph() -> InMemoryMetadata {
        InMemoryMetadata::builder()
            .resource(
                ResourceDefinition::new("Dummy")
                    .with_property(PropertyDefinition::identifier("id"))
                    .with_property(PropertyDefinition::subresource(
                        "relatedDummies",
                        SubresourceRelation::collection("RelatedDummy"),
                    )),
            )
            .resource(
                ResourceDefinition::new("RelatedDummy")
                    .with_collection_operations([HttpMethod::Get])
                    .with_item_operations([HttpMethod::Get])
                    .with_property(PropertyDefinition::identifier("id"))
                    .with_property(PropertyDefinition::subresource(
                        "thirdLevel",
                        SubresourceRelation::single("ThirdLevel"),
                    )),
            )
            .resource(
                ResourceDefinition::new("ThirdLevel")
                    .with_collection_operations([HttpMethod::Get])
                    .with_item_operations([HttpMethod::Get]),
            )
            .build()
    }

    #[test]
    fn test_unknown_root() {
        let metadata = dummy_graph();
        let config = BuilderConfig::default();
        let builder = SubresourceOperationTreeBuilder::from_store(&metadata, &config);

        assert_eq!(
            builder.build(&ResourceType::new("Missing")),
            Err(RouteTreeError::UnknownResource(ResourceType::new("Missing")))
        );
    }

    #[test]
    fn test_nested_single_relation() {
        let metadata = dummy_graph();
        let config = BuilderConfig::default();
        let builder = SubresourceOperationTreeBuilder::from_store(&metadata, &config);
        let table = builder.build(&ResourceType::new("Dummy")).unwrap();

        assert_eq!(
            table.route_names().collect::<Vec<_>>(),
            vec![
                "api_dummies_relatedDummies_get_subresource",
                "api_dummies_relatedDummies_get_item_subresource",
                "api_dummies_relatedDummies_thirdLevel_get_subresource",
            ]
        );

        let third = table.get("api_dummies_relatedDummies_thirdLevel_get_subresource").unwrap();
        assert_eq!(third.path(), "/dummies/{id}/related_dummies/{relatedDummies}/third_level.{_format}");
        assert!(!third.is_collection());
        assert_eq!(third.short_names(), ["ThirdLevel", "RelatedDummy", "Dummy"]);
        assert_eq!(
            third.identifiers(),
            [
                IdentifierEntry::root(ResourceType::new("Dummy")),
                IdentifierEntry::new("relatedDummies", ResourceType::new("RelatedDummy"), true, "relatedDummies"),
                IdentifierEntry::new("thirdLevel", ResourceType::new("ThirdLevel"), false, "thirdLevel"),
            ]
        );
    }

    #[test]
    fn test_identifier_at_root_is_not_a_start() {
        let metadata = InMemoryMetadata::builder()
            .resource(
                ResourceDefinition::new("Answer").with_property(
                    PropertyDefinition::subresource("id", SubresourceRelation::single("Answer")).as_identifier(),
                ),
            )
            .build();
        let config = BuilderConfig::default();
        let builder = SubresourceOperationTreeBuilder::from_store(&metadata, &config);

        assert!(builder.build(&ResourceType::new("Answer")).unwrap().is_empty());
    }

    #[test]
    fn test_item_override_rebases_descendants() {
        let metadata = InMemoryMetadata::builder()
            .resource(
                ResourceDefinition::new("Dummy")
                    .with_subresource_operation(
                        "relatedDummies_get_item_subresource",
                        OperationOverride::path("/related/{relatedDummies}.{_format}"),
                    )
                    .with_property(PropertyDefinition::subresource(
                        "relatedDummies",
                        SubresourceRelation::collection("RelatedDummy"),
                    )),
            )
            .resource(
                ResourceDefinition::new("RelatedDummy")
                    .with_collection_operations([])
                    .with_item_operations([HttpMethod::Get])
                    .with_property(PropertyDefinition::subresource("owner", SubresourceRelation::single("Owner"))),
            )
            .resource(ResourceDefinition::new("Owner").with_item_operations([HttpMethod::Get]))
            .build();
        let config = BuilderConfig::default();
        let builder = SubresourceOperationTreeBuilder::from_store(&metadata, &config);
        let table = builder.build(&ResourceType::new("Dummy")).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("api_dummies_relatedDummies_get_item_subresource").unwrap().path(),
            "/related/{relatedDummies}.{_format}"
        );
        assert_eq!(
            table.get("api_dummies_relatedDummies_owner_get_subresource").unwrap().path(),
            "/related/{relatedDummies}/owner.{_format}"
        );
    }

    #[test]
    fn test_unresolvable_branch() {
        let metadata = InMemoryMetadata::builder()
            .resource(
                ResourceDefinition::new("Dummy")
                    .with_property(PropertyDefinition::subresource("ghost", SubresourceRelation::single("Ghost")))
                    .with_property(PropertyDefinition::subresource("owner", SubresourceRelation::single("Owner"))),
            )
            .resource(ResourceDefinition::new("Owner").with_item_operations([HttpMethod::Get]))
            .build();

        let strict = BuilderConfig::default();
        let result = SubresourceOperationTreeBuilder::from_store(&metadata, &strict).build(&ResourceType::new("Dummy"));
        assert!(matches!(result, Err(RouteTreeError::MetadataResolution(_))));

        let lenient = BuilderConfig {
            skip_unresolvable_branches: true,
            ..BuilderConfig::default()
        };
        let table = SubresourceOperationTreeBuilder::from_store(&metadata, &lenient)
            .build(&ResourceType::new("Dummy"))
            .unwrap();
        assert_eq!(table.route_names().collect::<Vec<_>>(), vec!["api_dummies_owner_get_subresource"]);
    }

    #[test]
    fn test_first_overridden_priority() {
        let paths = vec![
            (HttpMethod::Delete, "/delete".to_string()),
            (HttpMethod::Put, "/put".to_string()),
        ];
        assert_eq!(first_overridden(&paths, ITEM_BASE_METHODS), Some("/put"));
        assert_eq!(first_overridden(&paths, COLLECTION_BASE_METHODS), None);
    }
}

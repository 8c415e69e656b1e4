use std::collections::BTreeSet;

use crate::metadata::{MaxDepth, ResourceType};
use crate::operation::IdentifierEntry;

/// One unit of pending work: a resource whose properties still have to be expanded,
/// together with everything accumulated on the path from the root.
///
/// Frames are never mutated; [`TraversalFrame::expand`] builds the child frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TraversalFrame {
    pub(crate) resource: ResourceType,
    pub(crate) max_depth: Option<MaxDepth>,
    pub(crate) depth: u32,
    /// Inflected property names of the ancestors, prepended to operation names.
    pub(crate) name_prefix: Vec<String>,
    pub(crate) collection_base: String,
    pub(crate) item_base: String,
    pub(crate) identifiers: Vec<IdentifierEntry>,
    pub(crate) visited_edges: BTreeSet<String>,
    /// Short names in order of first insertion, root first.
    pub(crate) short_names: Vec<String>,
    pub(crate) allow_last_item: bool,
}

/// What a traversed edge contributes to its child frame.
pub(crate) struct FrameExpansion {
    pub(crate) target: ResourceType,
    pub(crate) depth: u32,
    pub(crate) max_depth: MaxDepth,
    pub(crate) inflected_property: String,
    pub(crate) collection_base: String,
    pub(crate) item_base: String,
    pub(crate) identifier: IdentifierEntry,
    pub(crate) edge_key: String,
    pub(crate) target_short_name: String,
    pub(crate) is_collection: bool,
}

impl TraversalFrame {
    pub(crate) fn root(resource: ResourceType, short_name: String, base_path: String) -> Self {
        Self {
            identifiers: vec![IdentifierEntry::root(resource.clone())],
            resource,
            max_depth: None,
            depth: 0,
            name_prefix: Vec::new(),
            collection_base: base_path.clone(),
            item_base: base_path,
            visited_edges: BTreeSet::new(),
            short_names: vec![short_name],
            allow_last_item: false,
        }
    }

    pub(crate) fn has_visited(&self, edge_key: &str) -> bool {
        self.visited_edges.contains(edge_key)
    }

    pub(crate) fn expand(&self, expansion: FrameExpansion) -> TraversalFrame {
        let mut name_prefix = self.name_prefix.clone();
        name_prefix.push(expansion.inflected_property);

        let mut identifiers = self.identifiers.clone();
        identifiers.push(expansion.identifier);

        let mut visited_edges = self.visited_edges.clone();
        visited_edges.insert(expansion.edge_key);

        let mut short_names = self.short_names.clone();
        if !short_names.contains(&expansion.target_short_name) {
            short_names.push(expansion.target_short_name);
        }

        TraversalFrame {
            resource: expansion.target,
            max_depth: Some(expansion.max_depth),
            depth: expansion.depth,
            name_prefix,
            collection_base: expansion.collection_base,
            item_base: expansion.item_base,
            identifiers,
            visited_edges,
            short_names,
            allow_last_item: expansion.is_collection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_frame() {
        let frame = TraversalFrame::root(ResourceType::new("Dummy"), "Dummy".to_string(), "/dummies/{id}".to_string());

        assert_eq!(frame.depth, 0);
        assert_eq!(frame.max_depth, None);
        assert_eq!(frame.identifiers, vec![IdentifierEntry::root(ResourceType::new("Dummy"))]);
        assert_eq!(frame.collection_base, "/dummies/{id}");
        assert_eq!(frame.item_base, "/dummies/{id}");
        assert!(frame.visited_edges.is_empty());
        assert!(!frame.allow_last_item);
    }

    #[test]
    fn test_expand_leaves_parent_untouched() {
        let root = TraversalFrame::root(ResourceType::new("Dummy"), "Dummy".to_string(), "/dummies/{id}".to_string());
        let child = root.expand(FrameExpansion {
            target: ResourceType::new("RelatedDummy"),
            depth: 1,
            max_depth: MaxDepth::Limited(2),
            inflected_property: "relatedDummies".to_string(),
            collection_base: "/dummies/{id}/related_dummies/{relatedDummies}".to_string(),
            item_base: "/dummies/{id}/related_dummies/{relatedDummies}".to_string(),
            identifier: IdentifierEntry::new(
                "relatedDummies",
                ResourceType::new("RelatedDummy"),
                true,
                "relatedDummies",
            ),
            edge_key: "Dummy:relatedDummies:RelatedDummy".to_string(),
            target_short_name: "RelatedDummy".to_string(),
            is_collection: true,
        });

        assert_eq!(child.depth, 1);
        assert_eq!(child.max_depth, Some(MaxDepth::Limited(2)));
        assert_eq!(child.name_prefix, vec!["relatedDummies".to_string()]);
        assert_eq!(child.identifiers.len(), 2);
        assert!(child.has_visited("Dummy:relatedDummies:RelatedDummy"));
        assert_eq!(child.short_names, vec!["Dummy".to_string(), "RelatedDummy".to_string()]);
        assert!(child.allow_last_item);

        assert_eq!(root.depth, 0);
        assert!(root.visited_edges.is_empty());
        assert_eq!(root.identifiers.len(), 1);
    }
}

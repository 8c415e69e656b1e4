//! Naming conventions for subresource operations.
//!
//! Pure functions over the state a frame has accumulated. The tree builder only
//! combines their results.

use crate::metadata::HttpMethod;
use crate::naming::{capitalize, inflect};
use crate::operation::IdentifierEntry;

/// Property name used in operation names for a last-item fold.
pub(crate) const FOLDED_ITEM_NAME: &str = "item";

/// `<prefix..>_<inflected>_<method>[_item]_subresource`.
///
/// `item_of_collection` marks an item operation on a collection relation.
pub(crate) fn operation_name(prefix: &[String], inflected: &str, method: HttpMethod, item_of_collection: bool) -> String {
    let mut name = String::new();
    for part in prefix {
        name.push_str(part);
        name.push('_');
    }
    name.push_str(inflected);
    name.push('_');
    name.push_str(&method.lowercase());
    if item_of_collection {
        name.push_str("_item");
    }
    name.push_str("_subresource");
    name
}

/// `<route_name_prefix>_<inflected root>_<operation_name>`.
pub(crate) fn route_name(route_name_prefix: &str, root_short_name: &str, operation_name: &str) -> String {
    let root = inflect(root_short_name, true);
    if route_name_prefix.is_empty() {
        format!("{root}_{operation_name}")
    } else {
        format!("{route_name_prefix}_{root}_{operation_name}")
    }
}

/// `/<route prefix/><root segment>/{id}`.
pub(crate) fn root_base_path(route_prefix: &str, root_segment: &str) -> String {
    let prefix = route_prefix.trim().trim_matches('/');
    if prefix.is_empty() {
        format!("/{root_segment}/{{id}}")
    } else {
        format!("/{prefix}/{root_segment}/{{id}}")
    }
}

/// Base for the descendants of an edge: `<base>/<segment>[/{identifier}]`.
pub(crate) fn nested_base(base: &str, segment: &str, identifier: Option<&str>) -> String {
    append_identifier(&format!("{base}/{segment}"), identifier)
}

pub(crate) fn append_identifier(base: &str, identifier: Option<&str>) -> String {
    match identifier {
        Some(identifier) => format!("{base}/{{{identifier}}}"),
        None => base.to_string(),
    }
}

pub(crate) fn collection_path(base: &str, segment: &str, format_suffix: &str) -> String {
    format!("{base}/{segment}{format_suffix}")
}

/// Item path; `identifier` is set for items of a collection relation.
pub(crate) fn item_path(base: &str, segment: &str, identifier: Option<&str>, format_suffix: &str) -> String {
    format!("{}{format_suffix}", nested_base(base, segment, identifier))
}

/// A folded item is served at its parent's item path.
pub(crate) fn folded_item_path(base: &str, format_suffix: &str) -> String {
    format!("{base}{format_suffix}")
}

pub(crate) fn strip_format_suffix<'p>(path: &'p str, format_suffix: &str) -> &'p str {
    if format_suffix.is_empty() {
        return path;
    }
    path.strip_suffix(format_suffix).unwrap_or(path)
}

/// Placeholder name for `property` that no earlier link of `chain` uses.
///
/// On a clash the clashing link's property is prepended (`a` -> `aA`), repeated until
/// the name is free.
pub(crate) fn disambiguate_identifier(chain: &[IdentifierEntry], property: &str) -> String {
    let mut name = property.to_string();
    while let Some(entry) = chain.iter().rev().find(|entry| entry.identifier_name == name) {
        if entry.property.is_empty() {
            break;
        }
        name = format!("{}{}", entry.property, capitalize(&name));
    }
    name
}

/// Target short name first, then the collected names most recent first, no repeats.
pub(crate) fn record_short_names(target_short_name: &str, seen: &[String]) -> Vec<String> {
    let mut names = vec![target_short_name.to_string()];
    for name in seen.iter().rev() {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

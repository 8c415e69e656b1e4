//! Path-segment naming and inflection helpers.
//!
//! # Main Components
//!
//! - [`PathSegmentNamer`] - Turns a resource or property name into a URL path segment
//! - [`UnderscorePathSegmentNamer`] / [`DashPathSegmentNamer`] - The two built-in styles
//! - [`inflector`] - Pluralization and case conversion shared with route-name generation

pub mod inflector;

use serde::{Deserialize, Serialize};

pub use inflector::{capitalize, inflect, pluralize};

/// Generates the URL path segment for a resource or property name.
pub trait PathSegmentNamer {
    /// Returns the segment for `name`, pluralized when `is_collection` is set.
    fn segment_for(&self, name: &str, is_collection: bool) -> String;
}

/// `relatedDummies` -> `related_dummies`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderscorePathSegmentNamer;

impl PathSegmentNamer for UnderscorePathSegmentNamer {
    fn segment_for(&self, name: &str, is_collection: bool) -> String {
        let segment = inflector::tableize(name);
        if is_collection {
            pluralize(&segment)
        } else {
            segment
        }
    }
}

/// `relatedDummies` -> `related-dummies`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashPathSegmentNamer;

impl PathSegmentNamer for DashPathSegmentNamer {
    fn segment_for(&self, name: &str, is_collection: bool) -> String {
        let segment = inflector::dasherize(name);
        if is_collection {
            pluralize(&segment)
        } else {
            segment
        }
    }
}

/// Selects one of the built-in [`PathSegmentNamer`]s from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStyle {
    #[default]
    Underscore,
    Dash,
}

impl SegmentStyle {
    pub fn namer(self) -> &'static dyn PathSegmentNamer {
        match self {
            SegmentStyle::Underscore => &UnderscorePathSegmentNamer,
            SegmentStyle::Dash => &DashPathSegmentNamer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_segments() {
        let namer = UnderscorePathSegmentNamer;
        assert_eq!(namer.segment_for("Dummy", true), "dummies");
        assert_eq!(namer.segment_for("relatedDummies", true), "related_dummies");
        assert_eq!(namer.segment_for("relatedDummy", false), "related_dummy");
        assert_eq!(namer.segment_for("DummyEntity", true), "dummy_entities");
    }

    #[test]
    fn test_dash_segments() {
        let namer = DashPathSegmentNamer;
        assert_eq!(namer.segment_for("relatedDummy", true), "related-dummies");
        assert_eq!(namer.segment_for("thirdLevel", false), "third-level");
    }

    #[test]
    fn test_segment_style_selects_namer() {
        assert_eq!(SegmentStyle::default(), SegmentStyle::Underscore);
        assert_eq!(SegmentStyle::Dash.namer().segment_for("relatedPerson", true), "related-people");
        assert_eq!(SegmentStyle::Underscore.namer().segment_for("relatedPerson", true), "related_people");
    }
}

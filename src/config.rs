//! Builder configuration.
//!
//! Every field has a default, so an empty JSON object is a valid configuration:
//!
//! ```json
//! {
//!   "route_name_prefix": "api",
//!   "format_suffix": ".{_format}",
//!   "segment_style": "dash",
//!   "default_max_depth": { "limited": 3 },
//!   "skip_unresolvable_branches": true,
//!   "default_route_options": { "schemes": ["https"] }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RouteTreeError;
use crate::metadata::MaxDepth;
use crate::naming::{PathSegmentNamer, SegmentStyle};
use crate::operation::RouteOptions;

/// Settings shared by every tree build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// First component of every route name.
    pub route_name_prefix: String,
    /// Marker appended to every path, expanded by the routing layer.
    pub format_suffix: String,
    pub segment_style: SegmentStyle,
    /// Used when neither the relation nor an ancestor sets a depth limit.
    pub default_max_depth: Option<MaxDepth>,
    /// Prune a branch whose metadata cannot be read instead of failing the build.
    pub skip_unresolvable_branches: bool,
    pub default_route_options: RouteOptions,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            route_name_prefix: "api".to_string(),
            format_suffix: ".{_format}".to_string(),
            segment_style: SegmentStyle::default(),
            default_max_depth: None,
            skip_unresolvable_branches: false,
            default_route_options: RouteOptions::default(),
        }
    }
}

impl BuilderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, RouteTreeError> {
        serde_json::from_str(json).map_err(|e| RouteTreeError::InvalidDocument(e.to_string()))
    }

    pub fn namer(&self) -> &'static dyn PathSegmentNamer {
        self.segment_style.namer()
    }
}

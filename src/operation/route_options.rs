//! Route options attached to every operation record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The seven route option keys handed to the routing engine.
///
/// Every field has an empty default; [`RouteOptions::merged_with`] lets a developer
/// override replace individual fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    pub defaults: BTreeMap<String, Value>,
    pub requirements: BTreeMap<String, String>,
    pub options: BTreeMap<String, Value>,
    pub host: String,
    pub schemes: Vec<String>,
    pub condition: String,
    pub controller: Option<String>,
}

/// Partial [`RouteOptions`] as declared in a subresource operation override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptionsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
}

impl RouteOptions {
    /// Field-by-field merge: a field set on `overrides` wins, everything else keeps `self`.
    pub fn merged_with(&self, overrides: &RouteOptionsOverride) -> RouteOptions {
        RouteOptions {
            defaults: overrides.defaults.clone().unwrap_or_else(|| self.defaults.clone()),
            requirements: overrides.requirements.clone().unwrap_or_else(|| self.requirements.clone()),
            options: overrides.options.clone().unwrap_or_else(|| self.options.clone()),
            host: overrides.host.clone().unwrap_or_else(|| self.host.clone()),
            schemes: overrides.schemes.clone().unwrap_or_else(|| self.schemes.clone()),
            condition: overrides.condition.clone().unwrap_or_else(|| self.condition.clone()),
            controller: overrides.controller.clone().or_else(|| self.controller.clone()),
        }
    }
}

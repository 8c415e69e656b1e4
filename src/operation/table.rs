//! Route-name keyed table of operation records.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::error;

use crate::error::RouteTreeError;

use super::OperationRecord;

/// Output of a tree build: records in emission order, unique by route name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationTable {
    records: Vec<OperationRecord>,
    index: HashMap<String, usize>,
}

impl OperationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, refusing a route name that is already taken.
    pub(crate) fn insert(&mut self, record: OperationRecord) -> Result<(), RouteTreeError> {
        if self.index.contains_key(&record.route_name) {
            error!(route_name = %record.route_name, path = %record.path, "Route name collision");
            return Err(RouteTreeError::RouteNameCollision {
                route_name: record.route_name,
            });
        }
        self.index.insert(record.route_name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Moves every record of `other` into this table.
    ///
    /// Stops at the first route name both tables share.
    pub fn merge(&mut self, other: OperationTable) -> Result<(), RouteTreeError> {
        for record in other.records {
            self.insert(record)?;
        }
        Ok(())
    }

    pub fn get(&self, route_name: &str) -> Option<&OperationRecord> {
        self.index.get(route_name).map(|&position| &self.records[position])
    }

    pub fn contains_route(&self, route_name: &str) -> bool {
        self.index.contains_key(route_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in the order they were emitted.
    pub fn iter(&self) -> std::slice::Iter<'_, OperationRecord> {
        self.records.iter()
    }

    pub fn route_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.route_name.as_str())
    }
}

impl<'a> IntoIterator for &'a OperationTable {
    type Item = &'a OperationRecord;
    type IntoIter = std::slice::Iter<'a, OperationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for OperationTable {
    type Item = OperationRecord;
    type IntoIter = std::vec::IntoIter<OperationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl Serialize for OperationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.route_name, record)?;
        }
        map.end()
    }
}

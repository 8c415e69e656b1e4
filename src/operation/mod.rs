//! Output types of a subresource tree build.
//!
//! - [`OperationRecord`] - One operation: route name, path, method, identifier chain
//! - [`OperationTable`] - All records of a build, keyed by unique route name
//! - [`RouteOptions`] - The seven route option fields and their override merge

mod record;
mod route_options;
mod table;

pub use record::{IdentifierEntry, OperationRecord};
pub use route_options::{RouteOptions, RouteOptionsOverride};
pub use table::OperationTable;

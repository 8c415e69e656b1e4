//! # Subresource Routes
//!
//! > **Nested resource routes, derived from metadata.**
//!
//! A resource type can expose some of its properties as *subresources*: a property
//! `relatedDummies` on `Dummy` becomes `/dummies/{id}/related_dummies`, and the
//! related resource's own subresources nest below it. This crate walks that graph from a
//! root resource and computes the complete, deterministic table of operations a routing
//! engine has to register: route name, path template, HTTP method, identifier chain,
//! short names and route options.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Metadata in, table out
//! The builder never parses resource definitions and never registers routes. It reads
//! two narrow traits ([`metadata::ResourceMetadataStore`] and
//! [`metadata::PropertyMetadataStore`]) and returns an [`OperationTable`]. Anything that
//! can answer those queries can drive it.
//!
//! ### Explicit stack, immutable frames
//! The walk is an explicit stack of traversal frames. A frame is built once when pushed
//! and never changed afterwards, so there is no builder state to reset between edges.
//!
//! ### Conventions as functions
//! Operation names, route names and paths come from small pure functions over the
//! chain a frame has accumulated. They are tested in isolation.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Pruning is not failure
//! Plain properties, depth limits, cycles and identifier properties that cannot start a
//! subresource all prune a branch silently. Sibling properties keep going. A graph where
//! everything is pruned yields an empty table.
//!
//! ### 2. Cycle detection per path
//! Each frame carries the `source:property:target` edges visited on its own path. A
//! self-referencing relation is followed once per path and then stops, even with an
//! unlimited depth. Depth limits are declared on relations leaving the root, and the
//! depth count restarts whenever a path comes back to the root.
//!
//! ### 3. Type-Safe Error Handling
//! Collaborator failures are [`metadata::MetadataError`]s, the resolver adds
//! [`subresource::ResolveError`], and everything reaching the caller is a
//! [`RouteTreeError`]. The `#[from]` conversions keep `?` working across the seams.
//!
//! ### 4. Observability
//! Every decision of the walk is logged with `tracing`, from one `info` line per tree
//! down to a `trace` line per pruned property. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`builder`])
//! - **Role**: Walks the graph, applies depth, cycle and last-item rules, emits records.
//! - **Key items**: [`SubresourceOperationTreeBuilder`].
//!
//! ### 2. The Collaborators ([`metadata`], [`subresource`], [`naming`])
//! - **Role**: Read-only metadata traits, the in-memory store, edge descriptors and the
//!   path-segment namers.
//! - **Key items**: [`InMemoryMetadata`](metadata::InMemoryMetadata),
//!   [`SubresourceDescriptorResolver`](subresource::SubresourceDescriptorResolver),
//!   [`PathSegmentNamer`](naming::PathSegmentNamer).
//!
//! ### 3. The Output ([`operation`])
//! - **Role**: Immutable operation records keyed by unique route name.
//! - **Key items**: [`OperationRecord`], [`OperationTable`].
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Builds many roots concurrently against one shared store.
//! - **Key items**: [`RouteSystem`](lifecycle::RouteSystem), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## 🚀 Quick Start
//!
//! ```
//! use subresource_routes::metadata::{InMemoryMetadata, PropertyDefinition, ResourceDefinition, SubresourceRelation};
//! use subresource_routes::{BuilderConfig, SubresourceOperationTreeBuilder};
//!
//! let metadata = InMemoryMetadata::builder()
//!     .resource(ResourceDefinition::new("Dummy").with_property(PropertyDefinition::subresource(
//!         "relatedDummies",
//!         SubresourceRelation::collection("RelatedDummy"),
//!     )))
//!     .resource(ResourceDefinition::new("RelatedDummy"))
//!     .build();
//!
//! let config = BuilderConfig::default();
//! let table = SubresourceOperationTreeBuilder::from_store(&metadata, &config)
//!     .build(&"Dummy".into())
//!     .unwrap();
//!
//! let route = table.get("api_dummies_relatedDummies_get_subresource").unwrap();
//! assert_eq!(route.path(), "/dummies/{id}/related_dummies.{_format}");
//! ```
//!
//! ### Running the command-line tool
//!
//! ```bash
//! RUST_LOG=info cargo run -- demos/question_answer.json
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod metadata;
pub mod naming;
pub mod operation;
pub mod subresource;

pub use builder::SubresourceOperationTreeBuilder;
pub use config::BuilderConfig;
pub use error::RouteTreeError;
pub use operation::{OperationRecord, OperationTable};

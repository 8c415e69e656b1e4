//! Multi-root orchestration and observability setup.

mod route_system;
pub mod tracing;

pub use route_system::RouteSystem;
pub use self::tracing::setup_tracing;

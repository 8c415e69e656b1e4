//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); the
//! structured fields (`root`, `resource`, `property`, `route_name`) carry the context.
//!
//! ## What Gets Traced
//!
//! | level | event |
//! |---|---|
//! | `info` | one line per built tree and per merged registry |
//! | `debug` | every visited frame and every emitted operation |
//! | `trace` | every pruned property, with the reason |
//! | `warn` | branches skipped because their metadata could not be read |
//! | `error` | route-name collisions and failed build tasks |
//!
//! ## Usage Examples
//!
//! ```bash
//! # One line per tree
//! RUST_LOG=info subresource-routes resources.json
//!
//! # Every emitted route with its path
//! RUST_LOG=debug subresource-routes resources.json
//!
//! # Why a property produced no routes
//! RUST_LOG=subresource_routes::builder=trace subresource-routes resources.json
//! ```
//!
//! With `RUST_LOG=debug` a build of the question/answer demo shows:
//!
//! ```text
//! DEBUG build: Visiting frame resource=App\Entity\Question depth=0 pending=2
//! DEBUG build: Emitting operation route_name=api_questions_answers_get_subresource path=/questions/{id}/answers.{_format} method=GET
//! DEBUG build: Folded identifier subresource into parent item resource=App\Entity\Answer property="id"
//! INFO build: Built subresource operation tree root=App\Entity\Question routes=8
//! ```

/// Installs a compact formatter filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

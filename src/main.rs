//! # Subresource Routes CLI
//!
//! Builds the subresource operation table of every resource in a JSON resource
//! document and prints the merged table as JSON.
//!
//! ```bash
//! subresource-routes <resources.json> [config.json]
//! ```

use std::fs;

use subresource_routes::lifecycle::{setup_tracing, RouteSystem};
use subresource_routes::metadata::InMemoryMetadata;
use subresource_routes::BuilderConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let mut args = std::env::args().skip(1);
    let Some(resources_path) = args.next() else {
        return Err("usage: subresource-routes <resources.json> [config.json]".to_string());
    };

    let document = fs::read_to_string(&resources_path).map_err(|e| format!("{resources_path}: {e}"))?;
    let metadata = InMemoryMetadata::from_json_str(&document).map_err(|e| e.to_string())?;

    let config = match args.next() {
        Some(config_path) => {
            let raw = fs::read_to_string(&config_path).map_err(|e| format!("{config_path}: {e}"))?;
            BuilderConfig::from_json_str(&raw).map_err(|e| e.to_string())?
        }
        None => BuilderConfig::default(),
    };

    let roots = metadata.resource_types();
    info!(resources = roots.len(), path = %resources_path, "Loaded resource document");

    let system = RouteSystem::new(metadata, config);
    let registry = system.build_registry(&roots).await.map_err(|e| {
        error!(%e, "Failed to build route registry");
        e.to_string()
    })?;

    let output = serde_json::to_string_pretty(&registry).map_err(|e| e.to_string())?;
    println!("{output}");
    Ok(())
}

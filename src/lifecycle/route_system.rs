use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::builder::SubresourceOperationTreeBuilder;
use crate::config::BuilderConfig;
use crate::error::RouteTreeError;
use crate::metadata::{MetadataStore, ResourceType};
use crate::operation::OperationTable;

/// Builds the subresource trees of many roots against one shared metadata store.
///
/// `RouteSystem` is responsible for:
/// - **Sharing**: The store and configuration live behind `Arc`s and are only read
/// - **Isolation**: Every root gets its own builder on its own blocking task
/// - **Collection**: Results are gathered in root order, failures surface as errors
///
/// # Example
///
/// ```ignore
/// let system = RouteSystem::new(metadata, BuilderConfig::default());
///
/// let trees = system.build_all(&roots).await?;
/// let registry = system.build_registry(&roots).await?;
/// ```
pub struct RouteSystem<S> {
    store: Arc<S>,
    config: Arc<BuilderConfig>,
}

impl<S> Clone for RouteSystem<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: MetadataStore + Send + Sync + 'static> RouteSystem<S> {
    pub fn new(store: S, config: BuilderConfig) -> Self {
        Self::from_shared(Arc::new(store), Arc::new(config))
    }

    pub fn from_shared(store: Arc<S>, config: Arc<BuilderConfig>) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Builds the tree of every root concurrently.
    ///
    /// # Returns
    ///
    /// - `Ok(map)` with one table per root, ordered by root type
    /// - `Err(RouteTreeError)` with the first failing root's error, or
    ///   [`RouteTreeError::BuildTaskFailed`] if a task panicked or was cancelled
    #[instrument(skip_all, fields(roots = roots.len()))]
    pub async fn build_all(
        &self,
        roots: &[ResourceType],
    ) -> Result<BTreeMap<ResourceType, OperationTable>, RouteTreeError> {
        let mut handles = Vec::with_capacity(roots.len());
        for root in roots {
            let store = Arc::clone(&self.store);
            let config = Arc::clone(&self.config);
            let task_root = root.clone();
            let handle = tokio::task::spawn_blocking(move || {
                SubresourceOperationTreeBuilder::from_store(store.as_ref(), config.as_ref()).build(&task_root)
            });
            handles.push((root.clone(), handle));
        }

        let mut trees = BTreeMap::new();
        for (root, handle) in handles {
            match handle.await {
                Ok(result) => {
                    let table = result?;
                    debug!(root = %root, routes = table.len(), "Tree built");
                    trees.insert(root, table);
                }
                Err(e) => {
                    error!(root = %root, "Build task failed: {:?}", e);
                    return Err(RouteTreeError::BuildTaskFailed(format!("{root}: {e:?}")));
                }
            }
        }
        Ok(trees)
    }

    /// Builds every root and merges the trees into one table.
    ///
    /// Route names must be unique across roots, a shared name is reported as
    /// [`RouteTreeError::RouteNameCollision`].
    pub async fn build_registry(&self, roots: &[ResourceType]) -> Result<OperationTable, RouteTreeError> {
        let trees = self.build_all(roots).await?;

        let mut registry = OperationTable::new();
        for (_, tree) in trees {
            registry.merge(tree)?;
        }
        info!(roots = roots.len(), routes = registry.len(), "Route registry ready");
        Ok(registry)
    }
}

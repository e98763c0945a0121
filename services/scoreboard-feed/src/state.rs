//! Shared application state

use std::sync::Arc;

use crate::metrics::FeedMetrics;
use crate::publisher::ScorePublisher;
use crate::registry::{RegistryConfig, SubscriptionRegistry};
use crate::snapshot::SnapshotBuilder;
use crate::store::InMemoryContestStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryContestStore>,
    pub publisher: Arc<ScorePublisher>,
    pub registry: Arc<SubscriptionRegistry>,
    pub snapshots: Arc<SnapshotBuilder>,
    pub metrics: Arc<FeedMetrics>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let store = Arc::new(InMemoryContestStore::new());
        let registry = Arc::new(SubscriptionRegistry::new(config));
        let metrics = Arc::new(FeedMetrics::new());
        let publisher = Arc::new(ScorePublisher::new(
            store.clone(),
            registry.clone(),
            metrics.clone(),
        ));

        Self {
            store,
            publisher,
            registry,
            snapshots: Arc::new(SnapshotBuilder::new()),
            metrics,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

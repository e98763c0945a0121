//! Subscription registry
//!
//! One broadcast topic per contest id, created lazily on first subscribe
//! and pruned once no receiver remains. Publishing never awaits
//! subscribers: the broadcast ring buffer bounds each subscriber's backlog,
//! and a subscriber that falls behind observes a lag error on its receiver
//! instead of stalling the sender or its peers.
//!
//! Deltas for the same contender reach every connected subscriber in
//! publish order.

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use types::ids::ContestId;
use types::score::ScoreboardPush;

/// Configuration for the subscription registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Per-subscriber ring buffer capacity. A subscriber more than this
    /// many pushes behind is lagged out and must resync from a snapshot.
    pub channel_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}

/// Maps contest ids to broadcast topics and fans deltas out to viewers.
pub struct SubscriptionRegistry {
    topics: DashMap<ContestId, broadcast::Sender<ScoreboardPush>>,
    config: RegistryConfig,
}

impl SubscriptionRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            topics: DashMap::new(),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RegistryConfig::default())
    }

    /// Subscribe to a contest's delta stream from this moment onward.
    ///
    /// There is no replay: a viewer joining mid-contest pairs this with a
    /// point-in-time snapshot fetched separately.
    pub fn subscribe(&self, contest_id: ContestId) -> broadcast::Receiver<ScoreboardPush> {
        let receiver = self
            .topics
            .entry(contest_id)
            .or_insert_with(|| {
                debug!(%contest_id, "creating broadcast topic");
                broadcast::channel(self.config.channel_capacity).0
            })
            .subscribe();
        receiver
    }

    /// Publish a delta to every subscriber of a contest.
    ///
    /// Returns the number of subscribers reached; zero subscribers is a
    /// silent no-op. Never blocks on subscriber consumption.
    pub fn publish(&self, contest_id: ContestId, push: ScoreboardPush) -> usize {
        if let Some(sender) = self.topics.get(&contest_id) {
            if let Ok(delivered) = sender.send(push) {
                return delivered;
            }
        }
        // All receivers are gone; prune the topic so idle contests hold no
        // channel memory. Dropped subscribers are silent cleanup.
        self.topics
            .remove_if(&contest_id, |_, sender| sender.receiver_count() == 0);
        0
    }

    /// Number of live subscribers for a contest.
    pub fn subscriber_count(&self, contest_id: ContestId) -> usize {
        self.topics
            .get(&contest_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Number of contests with an open topic.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

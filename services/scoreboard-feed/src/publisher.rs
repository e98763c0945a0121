//! Score publisher
//!
//! Owns the authoritative per-contender score cache for the process. On a
//! tick mutation the publisher recomputes the affected contender's scores
//! from its full tick set, updates the cache, and broadcasts a
//! single-contender delta to the contest's topic.
//!
//! The cache is a sharded map: writes to one contender's entry are
//! serialized, entries for different contenders never contend. Publishing
//! is fire-and-forget relative to the mutation path; the broadcast send
//! returns without awaiting any subscriber.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use thiserror::Error;
use tracing::debug;

use scoring_engine::compute_scores;
use types::contender::Contender;
use types::ids::{ContenderId, ContestId};
use types::score::{ScoreSnapshot, ScoreboardPush, ScoreboardPushItem};

use crate::metrics::FeedMetrics;
use crate::registry::SubscriptionRegistry;
use crate::store::ContestDataSource;

/// Failures the publisher can hit on its own.
///
/// Mutation validation belongs to the data source; these only guard
/// against callers that bypassed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("contender not found: {0}")]
    UnknownContender(ContenderId),

    #[error("contest not found: {0}")]
    UnknownContest(ContestId),
}

pub struct ScorePublisher {
    source: Arc<dyn ContestDataSource>,
    registry: Arc<SubscriptionRegistry>,
    metrics: Arc<FeedMetrics>,
    /// Authoritative score cache. Exposed only through copies.
    cache: DashMap<ContenderId, ScoreSnapshot>,
}

impl ScorePublisher {
    pub fn new(
        source: Arc<dyn ContestDataSource>,
        registry: Arc<SubscriptionRegistry>,
        metrics: Arc<FeedMetrics>,
    ) -> Self {
        Self {
            source,
            registry,
            metrics,
            cache: DashMap::new(),
        }
    }

    /// Handle a successful tick mutation for one contender.
    ///
    /// Recomputes the contender's scores from its current full tick set,
    /// updates the cache (last write wins; the recompute itself is
    /// idempotent for a given tick set), and publishes a delta carrying the
    /// absolute total score. Exactly one publish per successful mutation.
    pub fn on_tick_mutation(
        &self,
        contender_id: ContenderId,
    ) -> Result<ScoreboardPush, PublishError> {
        let started = Instant::now();

        let contender = self
            .source
            .contender(contender_id)
            .ok_or(PublishError::UnknownContender(contender_id))?;
        let contest = self
            .source
            .contest(contender.contest_id)
            .ok_or(PublishError::UnknownContest(contender.contest_id))?;

        let ticks = self.source.ticks_for_contender(contender_id);
        let problems = self.source.problems_for_contest(contender.contest_id);
        let snapshot = compute_scores(&ticks, &problems, contest.qualifying_problems);

        self.cache.insert(contender_id, snapshot);
        self.metrics
            .record_recompute(started.elapsed().as_nanos() as u64);

        let push = ScoreboardPush {
            comp_class_id: contender.comp_class_id,
            item: ScoreboardPushItem {
                contender_id,
                contender_name: contender.name,
                score: snapshot.total_score,
            },
        };

        let delivered = self.registry.publish(contender.contest_id, push.clone());
        self.metrics.record_push(delivered);
        debug!(
            %contender_id,
            total = snapshot.total_score,
            qualifying = snapshot.qualifying_score,
            delivered,
            "score recomputed and published"
        );

        Ok(push)
    }

    /// Read-only copies of every contender's scores in a contest, in
    /// contender-id order. Contenders not yet cached are computed and
    /// primed on the way out.
    pub fn contest_scores(
        &self,
        contest_id: ContestId,
    ) -> Result<Vec<(Contender, ScoreSnapshot)>, PublishError> {
        let contest = self
            .source
            .contest(contest_id)
            .ok_or(PublishError::UnknownContest(contest_id))?;
        let problems = self.source.problems_for_contest(contest_id);

        let mut scores = Vec::new();
        for contender in self.source.contenders_for_contest(contest_id) {
            let snapshot = match self.cache.get(&contender.id) {
                Some(cached) => *cached,
                None => {
                    let ticks = self.source.ticks_for_contender(contender.id);
                    let computed =
                        compute_scores(&ticks, &problems, contest.qualifying_problems);
                    self.cache.insert(contender.id, computed);
                    computed
                }
            };
            scores.push((contender, snapshot));
        }
        Ok(scores)
    }

    /// The cached scores for one contender, if any mutation or snapshot
    /// has touched it since startup.
    pub fn cached_score(&self, contender_id: ContenderId) -> Option<ScoreSnapshot> {
        self.cache.get(&contender_id).map(|snapshot| *snapshot)
    }
}

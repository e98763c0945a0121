//! Client-side scoreboard reconciler
//!
//! A viewer seeds its state from a snapshot, then merges the delta stream
//! into it: each push fully replaces the contender's score (the event
//! carries the absolute value, never an increment). Ranked views are
//! re-derived through the ranking engine whenever the underlying entry set
//! changes, and memoized on a per-class version so untouched classes and
//! unrelated state changes never trigger a re-rank.
//!
//! Deltas carry the total score only; qualifying scores come from the
//! snapshot stream and refresh on resync.

use std::collections::HashMap;

use tracing::warn;

use scoring_engine::{rank, RankingItem};
use types::ids::{CompClassId, ContenderId, ContestId};
use types::score::{ScoreboardListItem, ScoreboardPush};

use crate::snapshot::ScoreboardSnapshot;

/// Latest known state for one contender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContenderEntry {
    pub name: String,
    pub total_score: u32,
    pub qualifying_score: u32,
}

/// The two ranked lists derived for a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedViews {
    /// Unlimited ranking by total score.
    pub total: Vec<ScoreboardListItem>,
    /// Finalist ranking by qualifying score; empty when finals are disabled.
    pub finalists: Vec<ScoreboardListItem>,
}

struct CachedViews {
    version: u64,
    views: RankedViews,
}

#[derive(Default)]
struct ClassState {
    /// Insertion order; ranking ties break on stable order, so it matters.
    order: Vec<ContenderId>,
    entries: HashMap<ContenderId, ContenderEntry>,
    version: u64,
    cached: Option<CachedViews>,
}

/// Merges snapshot plus deltas into memoized ranked views per class.
pub struct ScoreboardReconciler {
    contest_id: ContestId,
    finalists: u32,
    classes: HashMap<CompClassId, ClassState>,
}

impl ScoreboardReconciler {
    pub fn new(contest_id: ContestId, finalists: u32) -> Self {
        Self {
            contest_id,
            finalists,
            classes: HashMap::new(),
        }
    }

    /// Replace all state from a freshly fetched snapshot.
    pub fn seed(&mut self, snapshot: &ScoreboardSnapshot) {
        if snapshot.contest_id != self.contest_id {
            warn!(
                expected = %self.contest_id,
                received = %snapshot.contest_id,
                "dropping snapshot for wrong contest"
            );
            return;
        }

        self.classes.clear();
        for class in &snapshot.classes {
            let mut state = ClassState {
                version: 1,
                ..ClassState::default()
            };
            for standing in &class.contenders {
                state.order.push(standing.contender_id);
                state.entries.insert(
                    standing.contender_id,
                    ContenderEntry {
                        name: standing.contender_name.clone(),
                        total_score: standing.total_score,
                        qualifying_score: standing.qualifying_score,
                    },
                );
            }
            self.classes.insert(class.comp_class_id, state);
        }
    }

    /// Merge one delta. Returns whether the entry set changed (and the
    /// class's views therefore need re-rendering).
    ///
    /// A push for a class this contest does not have is dropped and logged;
    /// it never disturbs the other classes.
    pub fn apply(&mut self, push: &ScoreboardPush) -> bool {
        let Some(class) = self.classes.get_mut(&push.comp_class_id) else {
            warn!(
                comp_class_id = %push.comp_class_id,
                contender_id = %push.item.contender_id,
                "dropping push for unknown comp class"
            );
            return false;
        };

        let item = &push.item;
        match class.entries.get_mut(&item.contender_id) {
            Some(entry) => {
                if entry.total_score == item.score && entry.name == item.contender_name {
                    return false;
                }
                // Replace, never accumulate.
                entry.total_score = item.score;
                entry.name = item.contender_name.clone();
            }
            None => {
                class.order.push(item.contender_id);
                class.entries.insert(
                    item.contender_id,
                    ContenderEntry {
                        name: item.contender_name.clone(),
                        total_score: item.score,
                        // Unknown until the next snapshot resync.
                        qualifying_score: 0,
                    },
                );
            }
        }
        class.version += 1;
        true
    }

    /// The ranked views for a class, recomputed only if the entry set
    /// changed since the cached rank was built.
    pub fn views(&mut self, comp_class_id: CompClassId) -> Option<&RankedViews> {
        let finalists = self.finalists;
        let class = self.classes.get_mut(&comp_class_id)?;

        let stale = class
            .cached
            .as_ref()
            .map_or(true, |cached| cached.version != class.version);
        if stale {
            let total_items: Vec<RankingItem> = class
                .order
                .iter()
                .filter_map(|id| {
                    class.entries.get(id).map(|entry| RankingItem {
                        contender_id: *id,
                        contender_name: entry.name.clone(),
                        score: entry.total_score,
                    })
                })
                .collect();
            let qualifying_items: Vec<RankingItem> = class
                .order
                .iter()
                .filter_map(|id| {
                    class.entries.get(id).map(|entry| RankingItem {
                        contender_id: *id,
                        contender_name: entry.name.clone(),
                        score: entry.qualifying_score,
                    })
                })
                .collect();

            let views = RankedViews {
                total: rank(&total_items, 0),
                finalists: if finalists == 0 {
                    Vec::new()
                } else {
                    rank(&qualifying_items, finalists)
                },
            };
            class.cached = Some(CachedViews {
                version: class.version,
                views,
            });
        }

        class.cached.as_ref().map(|cached| &cached.views)
    }

    /// The entry version of a class; bumps exactly when its set changes.
    pub fn class_version(&self, comp_class_id: CompClassId) -> Option<u64> {
        self.classes.get(&comp_class_id).map(|class| class.version)
    }

    /// All classes this reconciler tracks.
    pub fn class_ids(&self) -> Vec<CompClassId> {
        let mut ids: Vec<CompClassId> = self.classes.keys().copied().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::score::ScoreboardPushItem;

    use crate::snapshot::{ClassStandings, ContenderStanding, ScoreboardSnapshot};

    fn snapshot(contenders: Vec<(u32, &str, u32, u32)>) -> ScoreboardSnapshot {
        let standings = contenders
            .into_iter()
            .map(|(id, name, total, qualifying)| ContenderStanding {
                contender_id: ContenderId::new(id),
                contender_name: name.to_string(),
                total_score: total,
                qualifying_score: qualifying,
            })
            .collect();
        ScoreboardSnapshot {
            version: 1,
            contest_id: ContestId::new(1),
            classes: vec![ClassStandings {
                comp_class_id: CompClassId::new(1),
                comp_class_name: "Open".to_string(),
                contenders: standings,
            }],
            timestamp: 1715400000000,
            checksum: String::new(),
        }
    }

    fn push(contender_id: u32, name: &str, score: u32) -> ScoreboardPush {
        ScoreboardPush {
            comp_class_id: CompClassId::new(1),
            item: ScoreboardPushItem {
                contender_id: ContenderId::new(contender_id),
                contender_name: name.to_string(),
                score,
            },
        }
    }

    #[test]
    fn test_push_replaces_score() {
        let mut reconciler = ScoreboardReconciler::new(ContestId::new(1), 3);
        reconciler.seed(&snapshot(vec![(7, "Alex", 0, 0)]));

        assert!(reconciler.apply(&push(7, "Alex", 12)));
        assert!(reconciler.apply(&push(7, "Alex", 15)));

        let views = reconciler.views(CompClassId::new(1)).unwrap();
        assert_eq!(views.total.len(), 1);
        // Replace, not accumulate: 15, not 27.
        assert_eq!(views.total[0].score, 15);
    }

    #[test]
    fn test_unknown_class_dropped() {
        let mut reconciler = ScoreboardReconciler::new(ContestId::new(1), 3);
        reconciler.seed(&snapshot(vec![(7, "Alex", 10, 10)]));

        let stray = ScoreboardPush {
            comp_class_id: CompClassId::new(99),
            item: ScoreboardPushItem {
                contender_id: ContenderId::new(7),
                contender_name: "Alex".to_string(),
                score: 50,
            },
        };
        assert!(!reconciler.apply(&stray));

        // Known class untouched.
        let views = reconciler.views(CompClassId::new(1)).unwrap();
        assert_eq!(views.total[0].score, 10);
    }

    #[test]
    fn test_identical_push_does_not_bump_version() {
        let mut reconciler = ScoreboardReconciler::new(ContestId::new(1), 3);
        reconciler.seed(&snapshot(vec![(7, "Alex", 0, 0)]));

        assert!(reconciler.apply(&push(7, "Alex", 12)));
        let version = reconciler.class_version(CompClassId::new(1)).unwrap();

        assert!(!reconciler.apply(&push(7, "Alex", 12)));
        assert_eq!(
            reconciler.class_version(CompClassId::new(1)).unwrap(),
            version
        );
    }

    #[test]
    fn test_views_are_memoized_until_change() {
        let mut reconciler = ScoreboardReconciler::new(ContestId::new(1), 3);
        reconciler.seed(&snapshot(vec![(1, "Alex", 30, 30), (2, "Brooke", 20, 20)]));

        let first = reconciler.views(CompClassId::new(1)).unwrap().clone();
        let second = reconciler.views(CompClassId::new(1)).unwrap().clone();
        assert_eq!(first, second);

        reconciler.apply(&push(2, "Brooke", 40));
        let third = reconciler.views(CompClassId::new(1)).unwrap();
        assert_eq!(third.total[0].contender_id, ContenderId::new(2));
    }

    #[test]
    fn test_new_contender_appended_mid_stream() {
        let mut reconciler = ScoreboardReconciler::new(ContestId::new(1), 3);
        reconciler.seed(&snapshot(vec![(1, "Alex", 10, 10)]));

        assert!(reconciler.apply(&push(2, "Brooke", 25)));

        let views = reconciler.views(CompClassId::new(1)).unwrap();
        assert_eq!(views.total.len(), 2);
        assert_eq!(views.total[0].contender_id, ContenderId::new(2));
        assert_eq!(views.total[0].position, 1);
    }

    #[test]
    fn test_finalist_view_uses_qualifying_scores() {
        let mut reconciler = ScoreboardReconciler::new(ContestId::new(1), 2);
        reconciler.seed(&snapshot(vec![
            (1, "Alex", 50, 10),
            (2, "Brooke", 40, 30),
            (3, "Chris", 30, 20),
        ]));

        let views = reconciler.views(CompClassId::new(1)).unwrap();
        // Total view orders by total score.
        assert_eq!(views.total[0].contender_id, ContenderId::new(1));
        // Finalist view orders by qualifying score with the cutoff applied.
        assert_eq!(views.finalists.len(), 2);
        assert_eq!(views.finalists[0].contender_id, ContenderId::new(2));
        assert_eq!(views.finalists[1].contender_id, ContenderId::new(3));
    }

    #[test]
    fn test_finals_disabled_yields_empty_finalists() {
        let mut reconciler = ScoreboardReconciler::new(ContestId::new(1), 0);
        reconciler.seed(&snapshot(vec![(1, "Alex", 50, 50)]));

        let views = reconciler.views(CompClassId::new(1)).unwrap();
        assert_eq!(views.total.len(), 1);
        assert!(views.finalists.is_empty());
    }

    #[test]
    fn test_wrong_contest_snapshot_ignored() {
        let mut reconciler = ScoreboardReconciler::new(ContestId::new(2), 3);
        reconciler.seed(&snapshot(vec![(1, "Alex", 10, 10)]));
        assert!(reconciler.class_ids().is_empty());
    }
}

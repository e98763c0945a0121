//! Scoreboard snapshots
//!
//! A snapshot is the point-in-time state a viewer loads before subscribing
//! to the delta stream, and again after any reconnect. It carries every
//! class of the contest with both scores per contender, a monotonic
//! version, and a SHA-256 checksum for integrity.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use types::contender::Contender;
use types::contest::CompClass;
use types::ids::{CompClassId, ContenderId, ContestId};
use types::score::ScoreSnapshot;

/// One contender's standing inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContenderStanding {
    pub contender_id: ContenderId,
    pub contender_name: String,
    pub total_score: u32,
    pub qualifying_score: u32,
}

/// One competition class's standings, contenders in stable store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStandings {
    pub comp_class_id: CompClassId,
    pub comp_class_name: String,
    pub contenders: Vec<ContenderStanding>,
}

/// A versioned, checksummed snapshot of a contest's scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardSnapshot {
    /// Monotonic snapshot version.
    pub version: u64,
    pub contest_id: ContestId,
    /// Every class of the contest, including classes with no contenders.
    pub classes: Vec<ClassStandings>,
    /// Unix milliseconds when the snapshot was built.
    pub timestamp: i64,
    /// SHA-256 checksum of the snapshot content.
    pub checksum: String,
}

/// Builds versioned snapshots from the publisher's score copies.
pub struct SnapshotBuilder {
    version_counter: AtomicU64,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            version_counter: AtomicU64::new(0),
        }
    }

    pub fn build(
        &self,
        contest_id: ContestId,
        comp_classes: &[CompClass],
        scores: &[(Contender, ScoreSnapshot)],
        timestamp: i64,
    ) -> ScoreboardSnapshot {
        let version = self.version_counter.fetch_add(1, Ordering::Relaxed) + 1;

        let mut classes: Vec<ClassStandings> = comp_classes
            .iter()
            .map(|comp_class| ClassStandings {
                comp_class_id: comp_class.id,
                comp_class_name: comp_class.name.clone(),
                contenders: Vec::new(),
            })
            .collect();

        for (contender, snapshot) in scores {
            if let Some(class) = classes
                .iter_mut()
                .find(|c| c.comp_class_id == contender.comp_class_id)
            {
                class.contenders.push(ContenderStanding {
                    contender_id: contender.id,
                    contender_name: contender.name.clone(),
                    total_score: snapshot.total_score,
                    qualifying_score: snapshot.qualifying_score,
                });
            }
        }

        let checksum = compute_checksum(contest_id, &classes);

        ScoreboardSnapshot {
            version,
            contest_id,
            classes,
            timestamp,
            checksum,
        }
    }

    /// Version of the most recently built snapshot.
    pub fn current_version(&self) -> u64 {
        self.version_counter.load(Ordering::Relaxed)
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute a SHA-256 checksum over the standings content.
fn compute_checksum(contest_id: ContestId, classes: &[ClassStandings]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contest_id.as_u32().to_le_bytes());
    hasher.update(b"---");

    for class in classes {
        hasher.update(class.comp_class_id.as_u32().to_le_bytes());
        hasher.update(class.comp_class_name.as_bytes());
        hasher.update(b":");
        for standing in &class.contenders {
            hasher.update(standing.contender_id.as_u32().to_le_bytes());
            hasher.update(standing.contender_name.as_bytes());
            hasher.update(standing.total_score.to_le_bytes());
            hasher.update(standing.qualifying_score.to_le_bytes());
            hasher.update(b"|");
        }
        hasher.update(b"---");
    }

    format!("{:x}", hasher.finalize())
}

/// Verify that a snapshot's checksum matches its content.
pub fn verify_snapshot_integrity(snapshot: &ScoreboardSnapshot) -> bool {
    snapshot.checksum == compute_checksum(snapshot.contest_id, &snapshot.classes)
}

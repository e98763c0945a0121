//! Derived score types and wire-level scoreboard items
//!
//! Scores are never stored: a `ScoreSnapshot` is recomputed from a
//! contender's full tick set on every mutation, and ranked positions are
//! derived by every receiver from the set of scores it holds. The
//! `ScoreboardPush` is the single-contender delta broadcast to viewers; it
//! always carries the current absolute score, never an increment.

use serde::{Deserialize, Serialize};

use crate::ids::{CompClassId, ContenderId};

/// The two scores derived from one contender's tick set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    /// Sum of all tick values.
    pub total_score: u32,
    /// Sum of the best N tick values, N = the contest's qualifying problems.
    pub qualifying_score: u32,
}

/// One row of a ranked scoreboard list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardListItem {
    pub contender_id: ContenderId,
    pub contender_name: String,
    /// Competition-ranking position: tied scores share it, the next
    /// distinct score continues at its 0-based index + 1.
    pub position: u32,
    pub score: u32,
}

/// The delta payload of a `ScoreboardPush`.
///
/// Position is intentionally absent: it is a pure function of the receiver's
/// full score set and is derived client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardPushItem {
    pub contender_id: ContenderId,
    pub contender_name: String,
    pub score: u32,
}

/// A single-contender score update broadcast to all viewers of a contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardPush {
    pub comp_class_id: CompClassId,
    pub item: ScoreboardPushItem,
}

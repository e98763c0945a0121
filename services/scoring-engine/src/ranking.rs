//! Competition ranking
//!
//! Produces the ranked scoreboard list for one competition class. Tied
//! scores share a position; the next distinct score continues at its
//! 0-based index + 1. A finalist cutoff admits whole score groups: a tie
//! group whose first member sits inside the cutoff is kept in full, and
//! once a new, lower score group starts at or past the cutoff index, that
//! group and everything after it is excluded.

use serde::{Deserialize, Serialize};

use types::ids::ContenderId;
use types::score::ScoreboardListItem;

/// One contender's entry into a ranking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingItem {
    pub contender_id: ContenderId,
    pub contender_name: String,
    pub score: u32,
}

/// Rank a class's scores into a scoreboard list.
///
/// `cutoff = 0` produces the unlimited total list; a non-zero cutoff
/// produces a finalist list. Equal scores keep their input order, so
/// callers must pass entries in a stable order.
///
/// Finalist lists only: when the last included item has score 0 the entire
/// list is discarded. A zero-score finalist is meaningless and must not be
/// displayed.
pub fn rank(items: &[RankingItem], cutoff: u32) -> Vec<ScoreboardListItem> {
    let mut sorted: Vec<&RankingItem> = items.iter().collect();
    // Stable: equal scores keep input order.
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    let mut list = Vec::with_capacity(sorted.len());
    let mut last_score: Option<u32> = None;
    let mut position = 0u32;
    let mut cutoff_reached = false;

    for (index, item) in sorted.iter().enumerate() {
        if last_score != Some(item.score) {
            last_score = Some(item.score);
            position = (index + 1) as u32;
            cutoff_reached = cutoff != 0 && index >= cutoff as usize;
        }
        if cutoff_reached {
            // Latched: the index only grows, so no later group re-enters.
            break;
        }
        list.push(ScoreboardListItem {
            contender_id: item.contender_id,
            contender_name: item.contender_name.clone(),
            position,
            score: item.score,
        });
    }

    if cutoff != 0 {
        if let Some(last) = list.last() {
            if last.score == 0 {
                return Vec::new();
            }
        }
    }

    list
}

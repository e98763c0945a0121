//! Tick records
//!
//! A tick is one recorded ascent of a problem by a contender. Ticks are the
//! only scoring events in the system: every create, update, or delete of a
//! tick invalidates exactly one contender's cached scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ContenderId, ProblemId, TickId};

/// A single recorded ascent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub id: TickId,
    pub contender_id: ContenderId,
    pub problem_id: ProblemId,
    /// When the ascent was registered.
    pub timestamp: DateTime<Utc>,
    /// Ascent on the first attempt, earning the flash bonus.
    pub is_flash: bool,
}

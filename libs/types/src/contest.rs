//! Contest and competition class records
//!
//! The contest record carries the two scoring scalars shared by all of its
//! classes: the number of problems that count toward the qualifying score,
//! and the finalist cutoff.

use serde::{Deserialize, Serialize};

use crate::errors::ScoreboardError;
use crate::ids::{CompClassId, ContestId};

/// A contest with its scoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: ContestId,
    pub name: String,
    /// Number of best ticks counted toward the qualifying score. Must be >= 1.
    pub qualifying_problems: u32,
    /// Number of top qualifying positions admitted to the finals view.
    /// 0 disables the finals view entirely.
    pub finalists: u32,
    /// Minutes after the official end during which ticks are still accepted.
    pub grace_period_minutes: Option<u32>,
}

impl Contest {
    /// Validate the scoring configuration.
    pub fn validate(&self) -> Result<(), ScoreboardError> {
        if self.qualifying_problems == 0 {
            return Err(ScoreboardError::InvalidConfig {
                field: "qualifyingProblems".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A competition class partitioning a contest's contenders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompClass {
    pub id: CompClassId,
    pub contest_id: ContestId,
    pub name: String,
}

//! Error types for the scoreboard system
//!
//! Domain error taxonomy using thiserror

use thiserror::Error;

use crate::ids::{CompClassId, ContenderId, ContestId, ProblemId, TickId};

/// Top-level scoreboard domain error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreboardError {
    #[error("contest not found: {0}")]
    ContestNotFound(ContestId),

    #[error("competition class not found: {0}")]
    CompClassNotFound(CompClassId),

    #[error("contender not found: {0}")]
    ContenderNotFound(ContenderId),

    #[error("problem not found: {0}")]
    ProblemNotFound(ProblemId),

    #[error("tick not found: {0}")]
    TickNotFound(TickId),

    #[error("tick references problem {problem} outside contest {contest}")]
    CrossContestTick {
        problem: ProblemId,
        contest: ContestId,
    },

    #[error("contender {contender} already ticked problem {problem}")]
    DuplicateTick {
        contender: ContenderId,
        problem: ProblemId,
    },

    #[error("invalid contest config: {field} {reason}")]
    InvalidConfig { field: String, reason: String },
}

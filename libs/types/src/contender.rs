//! Contender registration records
//!
//! A contender belongs to exactly one competition class for the lifetime of
//! the contest. The registration code is the short token printed on the
//! contender's scorecard.

use serde::{Deserialize, Serialize};

use crate::ids::{CompClassId, ContenderId, ContestId};

/// A registered contest participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contender {
    pub id: ContenderId,
    pub contest_id: ContestId,
    pub comp_class_id: CompClassId,
    pub name: String,
    pub registration_code: String,
}

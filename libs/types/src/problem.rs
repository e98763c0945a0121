//! Boulder problem records
//!
//! A problem is worth a fixed number of points, plus an optional flash bonus
//! awarded when the ascent succeeds on the first attempt. Problems are
//! immutable for the duration of a contest once ticks reference them; that
//! rule is enforced by the registration layer, not here.

use serde::{Deserialize, Serialize};

use crate::ids::{ContestId, ProblemId};

/// A numbered boulder problem within a contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: ProblemId,
    pub contest_id: ContestId,
    /// Human-facing problem number as printed at the wall.
    pub number: u32,
    /// Base points for a successful ascent.
    pub points: u32,
    /// Extra points awarded when the ascent is a flash.
    pub flash_bonus_points: u32,
    /// Hold color of the problem, when the organizer assigned one.
    pub color_id: Option<u32>,
}

impl Problem {
    /// The value of a single tick on this problem.
    pub fn tick_value(&self, is_flash: bool) -> u32 {
        if is_flash {
            self.points + self.flash_bonus_points
        } else {
            self.points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(points: u32, flash_bonus: u32) -> Problem {
        Problem {
            id: ProblemId::new(1),
            contest_id: ContestId::new(1),
            number: 1,
            points,
            flash_bonus_points: flash_bonus,
            color_id: None,
        }
    }

    #[test]
    fn test_tick_value_without_flash() {
        assert_eq!(problem(10, 2).tick_value(false), 10);
    }

    #[test]
    fn test_tick_value_with_flash() {
        assert_eq!(problem(10, 2).tick_value(true), 12);
    }

    #[test]
    fn test_tick_value_zero_bonus() {
        assert_eq!(problem(25, 0).tick_value(true), 25);
    }

    #[test]
    fn test_problem_serialization_roundtrip() {
        let p = Problem {
            id: ProblemId::new(3),
            contest_id: ContestId::new(1),
            number: 3,
            points: 50,
            flash_bonus_points: 10,
            color_id: Some(2),
        };
        let json = serde_json::to_string(&p).unwrap();
        let deserialized: Problem = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }
}

//! Score aggregation
//!
//! Turns one contender's full tick set into its two scores. The aggregator
//! never fails: an empty tick set yields zero scores, and a tick whose
//! problem is unknown contributes nothing (the registration layer rejects
//! such ticks before they reach scoring).

use std::collections::HashMap;

use types::ids::ProblemId;
use types::problem::Problem;
use types::score::ScoreSnapshot;
use types::tick::Tick;

/// Compute a contender's total and qualifying score from its tick set.
///
/// The total score sums every tick's value (problem points plus flash bonus
/// when flashed). The qualifying score sums only the best
/// `qualifying_problems` tick values; with fewer ticks than that, all of
/// them count. Equal tick values at the selection boundary are taken in
/// input order.
pub fn compute_scores(
    ticks: &[Tick],
    problems_by_id: &HashMap<ProblemId, Problem>,
    qualifying_problems: u32,
) -> ScoreSnapshot {
    let mut values: Vec<u32> = ticks
        .iter()
        .filter_map(|tick| {
            problems_by_id
                .get(&tick.problem_id)
                .map(|problem| problem.tick_value(tick.is_flash))
        })
        .collect();

    let total_score: u32 = values.iter().sum();

    // Stable sort keeps input order among equal values, so the boundary
    // tie-break is deterministic.
    values.sort_by(|a, b| b.cmp(a));
    let qualifying_score: u32 = values
        .iter()
        .take(qualifying_problems as usize)
        .sum();

    ScoreSnapshot {
        total_score,
        qualifying_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use types::ids::{ContenderId, ContestId, TickId};

    fn problem(id: u32, points: u32, flash_bonus: u32) -> Problem {
        Problem {
            id: ProblemId::new(id),
            contest_id: ContestId::new(1),
            number: id,
            points,
            flash_bonus_points: flash_bonus,
            color_id: None,
        }
    }

    fn tick(id: u32, problem_id: u32, is_flash: bool) -> Tick {
        Tick {
            id: TickId::new(id),
            contender_id: ContenderId::new(1),
            problem_id: ProblemId::new(problem_id),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 11, 10, 0, id).unwrap(),
            is_flash,
        }
    }

    fn problem_map(problems: Vec<Problem>) -> HashMap<ProblemId, Problem> {
        problems.into_iter().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn test_zero_ticks_scores_zero() {
        let problems = problem_map(vec![problem(1, 10, 2)]);
        let snap = compute_scores(&[], &problems, 5);
        assert_eq!(snap, ScoreSnapshot::default());
    }

    #[test]
    fn test_flash_earns_bonus() {
        // One 10-point problem with a 2-point flash bonus, flashed.
        let problems = problem_map(vec![problem(1, 10, 2)]);
        let ticks = vec![tick(1, 1, true)];

        let snap = compute_scores(&ticks, &problems, 5);
        assert_eq!(snap.total_score, 12);
        assert_eq!(snap.qualifying_score, 12);
    }

    #[test]
    fn test_qualifying_sums_best_two_of_three() {
        // Tick values [10, 8, 5] with two qualifying problems.
        let problems = problem_map(vec![
            problem(1, 10, 0),
            problem(2, 8, 0),
            problem(3, 5, 0),
        ]);
        let ticks = vec![tick(1, 1, false), tick(2, 2, false), tick(3, 3, false)];

        let snap = compute_scores(&ticks, &problems, 2);
        assert_eq!(snap.total_score, 23);
        assert_eq!(snap.qualifying_score, 18);
    }

    #[test]
    fn test_fewer_ticks_than_limit_all_count() {
        let problems = problem_map(vec![problem(1, 10, 0), problem(2, 8, 0)]);
        let ticks = vec![tick(1, 1, false), tick(2, 2, false)];

        let snap = compute_scores(&ticks, &problems, 5);
        assert_eq!(snap.total_score, snap.qualifying_score);
        assert_eq!(snap.total_score, 18);
    }

    #[test]
    fn test_unknown_problem_contributes_nothing() {
        let problems = problem_map(vec![problem(1, 10, 0)]);
        let ticks = vec![tick(1, 1, false), tick(2, 99, true)];

        let snap = compute_scores(&ticks, &problems, 5);
        assert_eq!(snap.total_score, 10);
    }

    #[test]
    fn test_deterministic() {
        let problems = problem_map(vec![
            problem(1, 10, 2),
            problem(2, 8, 1),
            problem(3, 5, 3),
        ]);
        let ticks = vec![tick(1, 1, true), tick(2, 2, false), tick(3, 3, true)];

        let first = compute_scores(&ticks, &problems, 2);
        let second = compute_scores(&ticks, &problems, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_boundary_tie_keeps_input_order() {
        // Three equal-value ticks, two qualifying slots: the sum is the
        // same whichever two are taken, and the selection is stable.
        let problems = problem_map(vec![
            problem(1, 10, 0),
            problem(2, 10, 0),
            problem(3, 10, 0),
        ]);
        let ticks = vec![tick(1, 1, false), tick(2, 2, false), tick(3, 3, false)];

        let snap = compute_scores(&ticks, &problems, 2);
        assert_eq!(snap.qualifying_score, 20);
        assert_eq!(snap.total_score, 30);
    }
}

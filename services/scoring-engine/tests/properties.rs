//! Property-based tests for the scoring engine
//!
//! Validates the scoring and ranking invariants over generated inputs:
//! determinism, total/qualifying ordering, tie sharing, position
//! continuity, cutoff fairness, and zero-score finalist suppression.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use scoring_engine::{compute_scores, rank, RankingItem};
use types::ids::{ContenderId, ContestId, ProblemId, TickId};
use types::problem::Problem;
use types::tick::Tick;

fn build_inputs(specs: &[(u32, u32, bool)]) -> (Vec<Tick>, HashMap<ProblemId, Problem>) {
    let mut ticks = Vec::new();
    let mut problems = HashMap::new();

    for (i, &(points, flash_bonus, is_flash)) in specs.iter().enumerate() {
        let id = i as u32 + 1;
        problems.insert(
            ProblemId::new(id),
            Problem {
                id: ProblemId::new(id),
                contest_id: ContestId::new(1),
                number: id,
                points,
                flash_bonus_points: flash_bonus,
                color_id: None,
            },
        );
        ticks.push(Tick {
            id: TickId::new(id),
            contender_id: ContenderId::new(1),
            problem_id: ProblemId::new(id),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 11, 10, 0, 0).unwrap(),
            is_flash,
        });
    }

    (ticks, problems)
}

fn ranking_items(scores: &[u32]) -> Vec<RankingItem> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| RankingItem {
            contender_id: ContenderId::new(i as u32 + 1),
            contender_name: format!("contender-{}", i + 1),
            score,
        })
        .collect()
}

proptest! {
    #[test]
    fn compute_scores_is_deterministic(
        specs in prop::collection::vec((0u32..200, 0u32..50, any::<bool>()), 0..30),
        qualifying in 1u32..10,
    ) {
        let (ticks, problems) = build_inputs(&specs);
        let first = compute_scores(&ticks, &problems, qualifying);
        let second = compute_scores(&ticks, &problems, qualifying);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn total_never_below_qualifying(
        specs in prop::collection::vec((0u32..200, 0u32..50, any::<bool>()), 0..30),
        qualifying in 1u32..10,
    ) {
        let (ticks, problems) = build_inputs(&specs);
        let snap = compute_scores(&ticks, &problems, qualifying);
        prop_assert!(snap.total_score >= snap.qualifying_score);
        if ticks.len() <= qualifying as usize {
            prop_assert_eq!(snap.total_score, snap.qualifying_score);
        }
    }

    #[test]
    fn equal_scores_share_positions(
        scores in prop::collection::vec(0u32..50, 0..40),
    ) {
        let list = rank(&ranking_items(&scores), 0);
        for a in &list {
            for b in &list {
                if a.score == b.score {
                    prop_assert_eq!(a.position, b.position);
                }
            }
        }
    }

    #[test]
    fn positions_continue_at_index_plus_one(
        scores in prop::collection::vec(0u32..50, 0..40),
    ) {
        // Output is sorted descending; each new score group's position must
        // equal its first member's 0-based index + 1.
        let list = rank(&ranking_items(&scores), 0);
        let mut last_score: Option<u32> = None;
        for (i, item) in list.iter().enumerate() {
            if last_score != Some(item.score) {
                prop_assert_eq!(item.position, i as u32 + 1);
                last_score = Some(item.score);
            }
        }
    }

    #[test]
    fn reranking_is_idempotent(
        scores in prop::collection::vec(0u32..50, 0..40),
    ) {
        let first = rank(&ranking_items(&scores), 0);
        let fed_back: Vec<RankingItem> = first
            .iter()
            .map(|item| RankingItem {
                contender_id: item.contender_id,
                contender_name: item.contender_name.clone(),
                score: item.score,
            })
            .collect();
        let second = rank(&fed_back, 0);

        let first_positions: Vec<u32> = first.iter().map(|i| i.position).collect();
        let second_positions: Vec<u32> = second.iter().map(|i| i.position).collect();
        prop_assert_eq!(first_positions, second_positions);
    }

    #[test]
    fn cutoff_admits_whole_score_groups(
        scores in prop::collection::vec(1u32..50, 1..40),
        cutoff in 1u32..8,
    ) {
        // With no zero scores the suppression rule cannot fire, so every
        // score equal to the last included one must be included in full.
        let items = ranking_items(&scores);
        let list = rank(&items, cutoff);
        prop_assert!(!list.is_empty());

        let boundary = list.last().unwrap().score;
        let included = list.iter().filter(|i| i.score == boundary).count();
        let present = scores.iter().filter(|&&s| s == boundary).count();
        prop_assert_eq!(included, present);

        // Everything excluded scores strictly below the boundary.
        prop_assert!(scores.iter().filter(|&&s| s > boundary).count() <= list.len());
    }

    #[test]
    fn finalist_list_never_ends_at_zero(
        scores in prop::collection::vec(0u32..50, 0..40),
        cutoff in 1u32..8,
    ) {
        let list = rank(&ranking_items(&scores), cutoff);
        if let Some(last) = list.last() {
            prop_assert!(last.score > 0);
        }
    }
}

//! Scoring Engine
//!
//! Pure, deterministic score aggregation and ranking for the contest
//! scoreboard. This crate has no side effects and no runtime dependencies;
//! every function is safe to call concurrently.
//!
//! **Key Invariants:**
//! - A contender's scores are a deterministic function of its tick set and
//!   the contest scoring config (same inputs → same outputs)
//! - Ranked positions are a deterministic function of the multiset of
//!   scores in a class; no rank is ever stored
//! - Tied scores share a position; the next distinct score continues at its
//!   0-based index + 1 (standard competition ranking)
//! - A tie group straddling the finalist cutoff is included in full

pub mod aggregator;
pub mod ranking;

pub use aggregator::compute_scores;
pub use ranking::{rank, RankingItem};

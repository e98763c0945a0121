//! Scoreboard Feed Service
//!
//! Consumes tick mutations and produces:
//! - Authoritative per-contender score recomputation
//! - Single-contender delta broadcasts to all viewers of a contest
//! - Versioned, checksummed scoreboard snapshots for connect/reconnect
//! - WebSocket real-time feeds with per-subscriber bounded buffering
//! - A client-side reconciler that merges snapshot + deltas into ranked views
//!
//! # Architecture
//!
//! ```text
//! Tick mutation (HTTP)
//!        │
//!    ┌───▼──────┐
//!    │Publisher │  ← Recomputes one contender, owns the score cache
//!    └───┬──────┘
//!        │
//!    ┌───▼──────┐
//!    │Registry  │  ← One broadcast topic per contest
//!    └───┬──────┘
//!        │
//! ┌──────▼────────────┐
//! │WebSocket fan-out  │  ← One task per viewer, lag = disconnect
//! └──────┬────────────┘
//!        │
//!    ┌───▼──────────┐
//!    │Reconciler    │  ← Merge deltas, memoized re-rank per class
//!    └──────────────┘
//! ```

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod publisher;
pub mod reconciler;
pub mod registry;
pub mod router;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod websocket;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";

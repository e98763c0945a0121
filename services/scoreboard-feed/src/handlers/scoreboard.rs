//! Scoreboard snapshot endpoint
//!
//! Serves the point-in-time snapshot a viewer loads before subscribing to
//! the live stream, and again after any reconnect.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use types::ids::ContestId;

use crate::error::AppError;
use crate::snapshot::ScoreboardSnapshot;
use crate::state::AppState;
use crate::store::ContestDataSource;

pub async fn get_scoreboard(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    let contest_id = ContestId::new(id);

    let scores = state.publisher.contest_scores(contest_id)?;
    let comp_classes = state.store.comp_classes_for_contest(contest_id);
    let snapshot = state.snapshots.build(
        contest_id,
        &comp_classes,
        &scores,
        Utc::now().timestamp_millis(),
    );

    Ok(Json(snapshot))
}

//! Tick mutation endpoints
//!
//! Create, update, and delete of a tick each trigger the publisher for the
//! single affected contender before the response is returned. Fan-out to
//! viewers is not awaited. A mutation the store rejects publishes nothing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use types::ids::{ContenderId, ProblemId, TickId};
use types::tick::Tick;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTickRequest {
    pub contender_id: ContenderId,
    pub problem_id: ProblemId,
    #[serde(default)]
    pub is_flash: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTickRequest {
    pub is_flash: bool,
}

pub async fn create_tick(
    State(state): State<AppState>,
    Json(request): Json<CreateTickRequest>,
) -> Result<(StatusCode, Json<Tick>), AppError> {
    let tick = state
        .store
        .create_tick(request.contender_id, request.problem_id, request.is_flash)?;
    state.publisher.on_tick_mutation(tick.contender_id)?;
    Ok((StatusCode::CREATED, Json(tick)))
}

pub async fn update_tick(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(request): Json<UpdateTickRequest>,
) -> Result<Json<Tick>, AppError> {
    let tick = state.store.update_tick(TickId::new(id), request.is_flash)?;
    state.publisher.on_tick_mutation(tick.contender_id)?;
    Ok(Json(tick))
}

pub async fn delete_tick(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, AppError> {
    let tick = state.store.delete_tick(TickId::new(id))?;
    state.publisher.on_tick_mutation(tick.contender_id)?;
    Ok(StatusCode::NO_CONTENT)
}

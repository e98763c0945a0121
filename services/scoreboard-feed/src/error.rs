//! HTTP error mapping for the feed service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use types::errors::ScoreboardError;

use crate::publisher::PublishError;

/// Central error type for the feed service's HTTP surface
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ScoreboardError> for AppError {
    fn from(err: ScoreboardError) -> Self {
        match err {
            ScoreboardError::ContestNotFound(_)
            | ScoreboardError::CompClassNotFound(_)
            | ScoreboardError::ContenderNotFound(_)
            | ScoreboardError::ProblemNotFound(_)
            | ScoreboardError::TickNotFound(_) => AppError::NotFound(err.to_string()),
            ScoreboardError::DuplicateTick { .. } => AppError::Conflict(err.to_string()),
            ScoreboardError::CrossContestTick { .. }
            | ScoreboardError::InvalidConfig { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        match err {
            // A snapshot request for a contest nobody registered.
            PublishError::UnknownContest(_) => AppError::NotFound(err.to_string()),
            // The store accepted a mutation it can no longer resolve.
            PublishError::UnknownContender(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(json!({
            "error": code,
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

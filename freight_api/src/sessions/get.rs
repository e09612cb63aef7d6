use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use freight_estimator::view::{SessionView, render};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Re-renders the last outcome of a session without estimating again.
pub async fn get_handler(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown session {}", session_id)))?;

    let session = session.lock().await;
    Ok(Json(render(&session)))
}

use std::sync::Arc;

use axum::{Json, extract::State};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::debug;

use crate::state::AppState;

#[derive(Serialize, JsonSchema)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

pub async fn create_handler(State(state): State<Arc<AppState>>) -> Json<CreateSessionResponse> {
    let session_id = state.sessions.create();
    debug!("Created session {}", session_id);

    Json(CreateSessionResponse {
        session_id: session_id.to_string(),
    })
}

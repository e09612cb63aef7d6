use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    sessions::{create::create_handler, estimate::estimate_handler, get::get_handler},
    state::AppState,
};

pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_handler))
        .route("/{session_id}", get(get_handler))
        .route("/{session_id}/estimate", post(estimate_handler))
}

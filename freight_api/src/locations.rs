use std::sync::Arc;

use axum::{Json, extract::State};
use freight_estimator::{cost::Pricing, gazetteer::Location};
use schemars::JsonSchema;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, JsonSchema)]
pub struct LocationsResponse {
    pub locations: Vec<Location>,
    pub default_start: String,
    pub default_end: String,
    pub default_pricing: Pricing,
}

pub async fn locations_handler(State(state): State<Arc<AppState>>) -> Json<LocationsResponse> {
    let gazetteer = state.estimator.gazetteer();

    Json(LocationsResponse {
        locations: gazetteer.locations().to_vec(),
        default_start: gazetteer.default_start().to_owned(),
        default_end: gazetteer.default_end().to_owned(),
        default_pricing: Pricing::default(),
    })
}

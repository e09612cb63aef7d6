use axum::Json;
use freight_estimator::view::SessionView;
use schemars::schema_for;
use serde_json::{Value, json};

use crate::{
    locations::LocationsResponse, sessions::create::CreateSessionResponse,
    sessions::estimate::EstimateRequestBody,
};

/// JSON schemas of the bodies exchanged with the page.
pub async fn schema_handler() -> Json<Value> {
    Json(json!({
        "EstimateRequest": schema_for!(EstimateRequestBody),
        "SessionView": schema_for!(SessionView),
        "Locations": schema_for!(LocationsResponse),
        "CreateSession": schema_for!(CreateSessionResponse),
    }))
}

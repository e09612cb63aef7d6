use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use freight_estimator::{
    cost::{
        DEFAULT_FUEL_COST_PER_KM, DEFAULT_RENTAL_FEE_PER_DAY, DEFAULT_UNPAVED_SURCHARGE_FACTOR,
        Pricing,
    },
    estimator::Itinerary,
    view::{SessionView, render},
};
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

fn default_rental_fee_per_day() -> f64 {
    DEFAULT_RENTAL_FEE_PER_DAY
}

fn default_fuel_cost_per_km() -> f64 {
    DEFAULT_FUEL_COST_PER_KM
}

fn default_unpaved_surcharge_factor() -> f64 {
    DEFAULT_UNPAVED_SURCHARGE_FACTOR
}

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "EstimateRequest")]
pub struct EstimateRequestBody {
    pub start: String,

    /// Omitted or null for a direct trip
    #[serde(default)]
    pub stopover: Option<String>,

    pub end: String,

    #[serde(default = "default_rental_fee_per_day")]
    pub rental_fee_per_day: f64,

    #[serde(default = "default_fuel_cost_per_km")]
    pub fuel_cost_per_km: f64,

    #[serde(default = "default_unpaved_surcharge_factor")]
    pub unpaved_surcharge_factor: f64,

    /// Used when no deployment secret is configured
    #[serde(default)]
    pub api_key: Option<String>,
}

impl EstimateRequestBody {
    fn itinerary(&self) -> Itinerary {
        Itinerary {
            start: self.start.clone(),
            stopover: self
                .stopover
                .clone()
                .filter(|stopover| !stopover.trim().is_empty()),
            end: self.end.clone(),
        }
    }

    fn pricing(&self) -> Pricing {
        Pricing {
            rental_fee_per_day: self.rental_fee_per_day,
            fuel_cost_per_km: self.fuel_cost_per_km,
            unpaved_surcharge_factor: self.unpaved_surcharge_factor,
        }
    }
}

pub async fn estimate_handler(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<EstimateRequestBody>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown session {}", session_id)))?;

    let mut session = session.lock().await;

    let credentials = state.config.credential_chain(body.api_key.clone());
    let result = state
        .estimator
        .estimate(&body.itinerary(), &body.pricing(), &credentials)
        .await;

    let error = result.as_ref().err().map(ApiError::from);
    session.record(result);

    match error {
        Some(error) => Err(error),
        None => Ok(Json(render(&session))),
    }
}

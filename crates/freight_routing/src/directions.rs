use std::fmt::Display;

use geojson::{FeatureCollection, Geometry, JsonObject};
use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::RoutingError,
    meters::Meters,
    surface::{RawSurfaceExtra, SurfaceSegment},
};

pub type OrsPoint = [f64; 2];

#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum OrsProfile {
    DrivingHgv,
}

impl Display for OrsProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OrsProfile::DrivingHgv => "driving-hgv",
            }
        )
    }
}

#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtraInfo {
    Surface,
}

/// Ordered waypoints plus the routing options sent with them.
#[derive(Debug, Clone)]
pub struct DirectionsRequest {
    pub coordinates: Vec<geo_types::Point>,
    pub profile: OrsProfile,
    pub extra_info: Vec<ExtraInfo>,
}

impl DirectionsRequest {
    /// Heavy goods vehicle route with per-segment road surface metadata.
    pub fn heavy_goods_with_surface<P>(points: &[P]) -> Self
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        Self {
            coordinates: points.iter().map(|point| point.into()).collect(),
            profile: OrsProfile::DrivingHgv,
            extra_info: vec![ExtraInfo::Surface],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequestBody {
    /// Waypoints as [lon, lat] in travel order
    pub coordinates: Vec<OrsPoint>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_info: Vec<ExtraInfo>,
}

impl From<&DirectionsRequest> for DirectionsRequestBody {
    fn from(request: &DirectionsRequest) -> Self {
        Self {
            coordinates: request
                .coordinates
                .iter()
                .map(|point| [point.x(), point.y()])
                .collect(),
            extra_info: request.extra_info.clone(),
        }
    }
}

/// Route returned by the directions service. Values are kept as delivered,
/// only unit conversions are offered on top.
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub distance: Meters,
    pub duration: SignedDuration,
    pub geometry: Geometry,
    pub surface: Vec<SurfaceSegment>,
}

impl RouteResult {
    pub fn distance_km(&self) -> f64 {
        self.distance.km()
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration.as_secs_f64() / 3600.0
    }
}

#[derive(Deserialize)]
struct RouteSummary {
    /// Meters
    distance: f64,

    /// Seconds
    duration: f64,
}

fn route_summary(properties: &JsonObject) -> Result<RouteSummary, RoutingError> {
    let summary = properties
        .get("summary")
        .ok_or_else(|| RoutingError::MalformedResponse(String::from("missing route summary")))?;

    serde_json::from_value(summary.clone())
        .map_err(|e| RoutingError::MalformedResponse(format!("invalid route summary: {}", e)))
}

fn surface_segments(properties: &JsonObject) -> Vec<SurfaceSegment> {
    let Some(surface) = properties
        .get("extras")
        .and_then(|extras| extras.get("surface"))
    else {
        return vec![];
    };

    match serde_json::from_value::<RawSurfaceExtra>(surface.clone()) {
        Ok(raw) => raw.into_segments(),
        Err(err) => {
            debug!("Ignoring unreadable surface extra: {}", err);
            vec![]
        }
    }
}

/// Reads the first feature of a GeoJSON directions response.
pub fn parse_directions_response(body: &str) -> Result<RouteResult, RoutingError> {
    let collection: FeatureCollection = serde_json::from_str(body)?;

    let feature = collection.features.into_iter().next().ok_or_else(|| {
        RoutingError::MalformedResponse(String::from("response contains no route"))
    })?;

    let properties = feature.properties.ok_or_else(|| {
        RoutingError::MalformedResponse(String::from("route has no properties"))
    })?;

    let summary = route_summary(&properties)?;
    let geometry = feature.geometry.ok_or_else(|| {
        RoutingError::MalformedResponse(String::from("route has no geometry"))
    })?;

    if !summary.distance.is_finite() || summary.distance < 0.0 {
        return Err(RoutingError::MalformedResponse(format!(
            "invalid route distance: {}",
            summary.distance
        )));
    }

    if summary.duration < 0.0 {
        return Err(RoutingError::MalformedResponse(format!(
            "invalid route duration: {}",
            summary.duration
        )));
    }

    let duration = SignedDuration::try_from_secs_f64(summary.duration).map_err(|e| {
        RoutingError::MalformedResponse(format!("invalid route duration: {}", e))
    })?;

    Ok(RouteResult {
        distance: Meters::new(summary.distance),
        duration,
        geometry,
        surface: surface_segments(&properties),
    })
}

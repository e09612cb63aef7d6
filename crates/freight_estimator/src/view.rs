use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{
    estimator::{CostEstimate, Stop, StopRole},
    gazetteer::Coordinates,
    session::{Notice, Outcome, Session},
};

pub const ROUTE_COLOR: &str = "#E74C3C";
pub const ROUTE_WEIGHT: u32 = 5;
pub const ROUTE_OPACITY: f64 = 0.8;
pub const MAP_ZOOM: u8 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Tile {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BreakdownRow {
    pub category: String,
    pub formula: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,

    /// Route line followed by one point per stop, styling in the properties
    #[schemars(with = "serde_json::Value")]
    pub overlay: FeatureCollection,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SurfaceView {
    pub paved_segments: usize,
    pub unpaved_segments: usize,
    pub unknown_segments: usize,

    /// Surcharge factor entered by the user, shown for reference only
    pub unpaved_surcharge_factor: f64,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct EstimateView {
    pub tiles: Vec<Tile>,
    pub breakdown: Vec<BreakdownRow>,
    pub map: MapView,
    pub surface: SurfaceView,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionView {
    /// Nothing requested yet
    Idle,
    Estimate(EstimateView),
    Notice(Notice),
}

/// Formats whole dollars with thousands separators, e.g. `$12,345`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn properties(value: serde_json::Value) -> Option<JsonObject> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

fn marker(stop: &Stop) -> Feature {
    let (color, icon, popup) = match stop.role {
        StopRole::Start => ("green", "play", "Start"),
        StopRole::Stopover => ("blue", "pause", "Stopover"),
        StopRole::End => ("black", "stop", "End"),
    };

    Feature {
        geometry: Some(Geometry::new(Value::Point(vec![
            stop.coordinates.lon,
            stop.coordinates.lat,
        ]))),
        properties: properties(serde_json::json!({
            "kind": "marker",
            "role": stop.role,
            "name": stop.name,
            "popup": popup,
            "color": color,
            "icon": icon,
        })),
        ..Default::default()
    }
}

fn route_line(estimate: &CostEstimate) -> Feature {
    Feature {
        geometry: Some(estimate.route_geometry.clone()),
        properties: properties(serde_json::json!({
            "kind": "route",
            "color": ROUTE_COLOR,
            "weight": ROUTE_WEIGHT,
            "opacity": ROUTE_OPACITY,
        })),
        ..Default::default()
    }
}

fn map_view(estimate: &CostEstimate) -> MapView {
    let center = match (
        estimate.stop(StopRole::Start),
        estimate.stop(StopRole::End),
    ) {
        (Some(start), Some(end)) => start.coordinates.midpoint(&end.coordinates),
        _ => Coordinates::new(0.0, 0.0),
    };

    let mut features = vec![route_line(estimate)];
    features.extend(estimate.stops.iter().map(marker));

    MapView {
        center,
        zoom: MAP_ZOOM,
        overlay: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
    }
}

pub fn estimate_view(estimate: &CostEstimate) -> EstimateView {
    let tiles = vec![
        Tile {
            label: String::from("Total distance"),
            value: format!("{:.1} km", estimate.distance_km),
        },
        Tile {
            label: String::from("Driving time"),
            value: format!("{:.1} h", estimate.duration_hours),
        },
        Tile {
            label: String::from("Days needed (8 h/day)"),
            value: format!("{:.1} days", estimate.days_needed()),
        },
        Tile {
            label: String::from("Total estimate"),
            value: format_usd(estimate.total_cost()),
        },
    ];

    let breakdown = vec![
        BreakdownRow {
            category: String::from("Equipment & crew (Fixed)"),
            formula: format!(
                "${} × {:.1} days",
                estimate.pricing.rental_fee_per_day,
                estimate.days_needed()
            ),
            amount: format_usd(estimate.labor_cost()),
        },
        BreakdownRow {
            category: String::from("Fuel & wear (Variable)"),
            formula: format!(
                "${} × {:.1} km",
                estimate.pricing.fuel_cost_per_km, estimate.distance_km
            ),
            amount: format_usd(estimate.driving_cost()),
        },
        BreakdownRow {
            category: String::from("Total"),
            formula: String::from("-"),
            amount: format_usd(estimate.total_cost()),
        },
    ];

    EstimateView {
        tiles,
        breakdown,
        map: map_view(estimate),
        surface: SurfaceView {
            paved_segments: estimate.surface.paved_segments,
            unpaved_segments: estimate.surface.unpaved_segments,
            unknown_segments: estimate.surface.unknown_segments,
            unpaved_surcharge_factor: estimate.pricing.unpaved_surcharge_factor,
        },
    }
}

/// Renders whatever the session last produced, without running anything.
pub fn render(session: &Session) -> SessionView {
    match session.last() {
        None => SessionView::Idle,
        Some(Outcome::Estimate(estimate)) => SessionView::Estimate(estimate_view(estimate)),
        Some(Outcome::Failed(notice)) => SessionView::Notice(notice.clone()),
    }
}

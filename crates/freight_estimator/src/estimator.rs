use freight_routing::{
    directions::DirectionsRequest, directions_provider::DirectionsProvider, error::RoutingError,
    surface::SurfaceSummary,
};
use geojson::Geometry;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    cost::{CostBreakdown, Pricing, PricingError},
    credentials::{CredentialChain, CredentialMissing},
    gazetteer::{Coordinates, Gazetteer},
};

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error(transparent)]
    CredentialMissing(#[from] CredentialMissing),

    #[error("Start and end are the same location: {0}")]
    IdenticalEndpoints(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("An itinerary needs 2 or 3 waypoints, got {0}")]
    InvalidWaypointCount(usize),

    #[error(transparent)]
    InvalidPricing(#[from] PricingError),

    #[error("Routing failed: {0}")]
    Routing(#[from] RoutingError),
}

impl EstimateError {
    /// Input mistakes the user can fix without changing anything else.
    pub fn is_warning(&self) -> bool {
        matches!(self, EstimateError::IdenticalEndpoints(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Itinerary {
    pub start: String,
    pub stopover: Option<String>,
    pub end: String,
}

impl Itinerary {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            stopover: None,
            end: end.into(),
        }
    }

    pub fn with_stopover(mut self, stopover: impl Into<String>) -> Self {
        self.stopover = Some(stopover.into());
        self
    }

    /// Builds an itinerary from names in travel order.
    pub fn from_waypoints(waypoints: &[&str]) -> Result<Self, EstimateError> {
        match waypoints {
            [start, end] => Ok(Itinerary::new(*start, *end)),
            [start, stopover, end] => Ok(Itinerary::new(*start, *end).with_stopover(*stopover)),
            other => Err(EstimateError::InvalidWaypointCount(other.len())),
        }
    }

    pub fn waypoints(&self) -> Vec<(StopRole, &str)> {
        let mut waypoints = vec![(StopRole::Start, self.start.as_str())];
        if let Some(stopover) = &self.stopover {
            waypoints.push((StopRole::Stopover, stopover.as_str()));
        }
        waypoints.push((StopRole::End, self.end.as_str()));
        waypoints
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StopRole {
    Start,
    Stopover,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Stop {
    pub role: StopRole,
    pub name: String,
    pub coordinates: Coordinates,
}

/// Everything shown for one estimation. Built once and never updated.
#[derive(Debug, Clone, Serialize)]
pub struct CostEstimate {
    pub stops: Vec<Stop>,
    pub pricing: Pricing,
    pub distance_km: f64,
    pub duration_hours: f64,

    #[serde(flatten)]
    pub costs: CostBreakdown,

    pub route_geometry: Geometry,
    pub surface: SurfaceSummary,
}

impl CostEstimate {
    pub fn stop(&self, role: StopRole) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.role == role)
    }

    pub fn days_needed(&self) -> f64 {
        self.costs.days_needed
    }

    pub fn labor_cost(&self) -> f64 {
        self.costs.labor_cost
    }

    pub fn driving_cost(&self) -> f64 {
        self.costs.driving_cost
    }

    pub fn total_cost(&self) -> f64 {
        self.costs.total_cost
    }
}

pub struct Estimator<P> {
    gazetteer: Gazetteer,
    provider: P,
}

impl<P> Estimator<P>
where
    P: DirectionsProvider,
{
    pub fn new(gazetteer: Gazetteer, provider: P) -> Self {
        Self {
            gazetteer,
            provider,
        }
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    fn resolve_stops(&self, itinerary: &Itinerary) -> Result<Vec<Stop>, EstimateError> {
        itinerary
            .waypoints()
            .into_iter()
            .map(|(role, name)| {
                let coordinates = self
                    .gazetteer
                    .resolve(name)
                    .map_err(|_| EstimateError::UnknownLocation(name.to_owned()))?;

                Ok(Stop {
                    role,
                    name: name.to_owned(),
                    coordinates,
                })
            })
            .collect()
    }

    /// Runs one estimation. All input checks happen before the directions
    /// service is called, and a failed call is reported as is, without retry.
    #[instrument(skip_all, fields(start = %itinerary.start, end = %itinerary.end))]
    pub async fn estimate(
        &self,
        itinerary: &Itinerary,
        pricing: &Pricing,
        credentials: &CredentialChain,
    ) -> Result<CostEstimate, EstimateError> {
        let api_key = credentials.resolve()?;

        if itinerary.start == itinerary.end {
            return Err(EstimateError::IdenticalEndpoints(itinerary.start.clone()));
        }

        let stops = self.resolve_stops(itinerary)?;
        pricing.validate()?;

        let coordinates: Vec<Coordinates> = stops.iter().map(|stop| stop.coordinates).collect();
        let request = DirectionsRequest::heavy_goods_with_surface(&coordinates);

        let route = self.provider.directions(&api_key, &request).await?;

        let distance_km = route.distance_km();
        let duration_hours = route.duration_hours();
        let costs = CostBreakdown::compute(distance_km, duration_hours, pricing);

        info!(
            "Estimated {:.1} km, {:.1} h, {} days, total ${:.0}",
            distance_km, duration_hours, costs.days_needed, costs.total_cost
        );

        Ok(CostEstimate {
            stops,
            pricing: *pricing,
            distance_km,
            duration_hours,
            costs,
            route_geometry: route.geometry,
            surface: SurfaceSummary::from_segments(&route.surface),
        })
    }
}

#[cfg(test)]
mod tests {
    use freight_routing::directions::OrsProfile;

    use super::*;
    use crate::{
        credentials::ManualInput,
        test_utils::{MockDirections, MockReply, credentials},
    };

    fn estimator(reply: MockReply) -> Estimator<MockDirections> {
        Estimator::new(Gazetteer::default(), MockDirections::new(reply))
    }

    #[tokio::test]
    async fn test_estimate_full_day() {
        let estimator = estimator(MockReply::Route {
            distance_m: 100_000.0,
            duration_s: 8.0 * 3600.0,
        });

        let estimate = estimator
            .estimate(
                &Itinerary::new("Phnom Penh", "Sihanoukville (Port)"),
                &Pricing::default(),
                &credentials(),
            )
            .await
            .unwrap();

        assert_eq!(estimate.distance_km, 100.0);
        assert_eq!(estimate.duration_hours, 8.0);
        assert_eq!(estimate.days_needed(), 1.0);
        assert_eq!(estimate.labor_cost(), 250.0);
        assert!((estimate.driving_cost() - 80.0).abs() < 1e-9);
        assert!((estimate.total_cost() - 330.0).abs() < 1e-9);
        assert_eq!(estimate.stops.len(), 2);
    }

    #[tokio::test]
    async fn test_estimate_short_trip() {
        let estimator = estimator(MockReply::Route {
            distance_m: 100_000.0,
            duration_s: 2.0 * 3600.0,
        });

        let estimate = estimator
            .estimate(
                &Itinerary::new("Kampot", "Phnom Penh"),
                &Pricing::default(),
                &credentials(),
            )
            .await
            .unwrap();

        assert_eq!(estimate.days_needed(), 0.5);
        assert!((estimate.total_cost() - 205.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_request_goes_through_stopover() {
        let estimator = estimator(MockReply::Route {
            distance_m: 550_000.0,
            duration_s: 9.0 * 3600.0,
        });

        let itinerary = Itinerary::new("Phnom Penh", "Poipet (Border)").with_stopover("Siem Reap");
        let estimate = estimator
            .estimate(&itinerary, &Pricing::default(), &credentials())
            .await
            .unwrap();

        let requests = estimator.provider.requests();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.profile, OrsProfile::DrivingHgv);
        assert_eq!(
            request
                .coordinates
                .iter()
                .map(|point| (point.x(), point.y()))
                .collect::<Vec<_>>(),
            vec![
                (104.9282, 11.5564),
                (103.8552, 13.3633),
                (102.5636, 13.6565)
            ]
        );

        assert_eq!(
            estimate.stop(StopRole::Stopover).map(|stop| stop.name.as_str()),
            Some("Siem Reap")
        );
    }

    #[tokio::test]
    async fn test_stopover_may_repeat_an_endpoint() {
        let estimator = estimator(MockReply::Route {
            distance_m: 10_000.0,
            duration_s: 600.0,
        });

        let itinerary = Itinerary::new("Kampot", "Kratie").with_stopover("Kampot");
        let result = estimator
            .estimate(&itinerary, &Pricing::default(), &credentials())
            .await;

        assert!(result.is_ok());
        assert_eq!(estimator.provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_identical_endpoints_are_refused() {
        let estimator = estimator(MockReply::Route {
            distance_m: 1.0,
            duration_s: 1.0,
        });

        let error = estimator
            .estimate(
                &Itinerary::new("Kratie", "Kratie"),
                &Pricing::default(),
                &credentials(),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, EstimateError::IdenticalEndpoints(_)));
        assert!(error.is_warning());
        assert_eq!(estimator.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_is_refused() {
        let estimator = estimator(MockReply::Route {
            distance_m: 1.0,
            duration_s: 1.0,
        });

        let chain = CredentialChain::new()
            .with(ManualInput::new(None))
            .with(ManualInput::new(Some(String::from(" "))));

        let error = estimator
            .estimate(
                &Itinerary::new("Phnom Penh", "Kampot"),
                &Pricing::default(),
                &chain,
            )
            .await
            .unwrap_err();

        assert!(matches!(error, EstimateError::CredentialMissing(_)));
        assert!(!error.is_warning());
        assert_eq!(estimator.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_location_is_refused() {
        let estimator = estimator(MockReply::Route {
            distance_m: 1.0,
            duration_s: 1.0,
        });

        let error = estimator
            .estimate(
                &Itinerary::new("Phnom Penh", "Vientiane"),
                &Pricing::default(),
                &credentials(),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, EstimateError::UnknownLocation(name) if name == "Vientiane"));
        assert_eq!(estimator.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_pricing_is_refused() {
        let estimator = estimator(MockReply::Route {
            distance_m: 1.0,
            duration_s: 1.0,
        });

        let pricing = Pricing {
            rental_fee_per_day: -10.0,
            ..Pricing::default()
        };

        let error = estimator
            .estimate(
                &Itinerary::new("Phnom Penh", "Kampot"),
                &pricing,
                &credentials(),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, EstimateError::InvalidPricing(_)));
        assert_eq!(estimator.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_routing_failure_keeps_cause() {
        let estimator = estimator(MockReply::Malformed);

        let error = estimator
            .estimate(
                &Itinerary::new("Phnom Penh", "Kampot"),
                &Pricing::default(),
                &credentials(),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, EstimateError::Routing(_)));
        assert!(error.to_string().contains("distance"), "{}", error);
        assert_eq!(estimator.provider.call_count(), 1);
    }

    #[test]
    fn test_itinerary_from_waypoints() {
        let itinerary = Itinerary::from_waypoints(&["A", "B"]).unwrap();
        assert_eq!(itinerary, Itinerary::new("A", "B"));

        let itinerary = Itinerary::from_waypoints(&["A", "B", "C"]).unwrap();
        assert_eq!(itinerary, Itinerary::new("A", "C").with_stopover("B"));

        assert!(matches!(
            Itinerary::from_waypoints(&["A"]),
            Err(EstimateError::InvalidWaypointCount(1))
        ));
        assert!(matches!(
            Itinerary::from_waypoints(&["A", "B", "C", "D"]),
            Err(EstimateError::InvalidWaypointCount(4))
        ));
    }
}

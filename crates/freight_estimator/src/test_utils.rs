use std::sync::atomic::{AtomicUsize, Ordering};

use freight_routing::{
    api_key::ApiKey,
    directions::{DirectionsRequest, RouteResult, parse_directions_response},
    directions_provider::DirectionsProvider,
    error::RoutingError,
};
use parking_lot::Mutex;

use crate::credentials::{CredentialChain, ManualInput};

pub fn credentials() -> CredentialChain {
    CredentialChain::new().with(ManualInput::new(Some(String::from("test-key"))))
}

pub enum MockReply {
    Route { distance_m: f64, duration_s: f64 },
    /// Summary without a distance
    Malformed,
}

impl MockReply {
    fn body(&self, request: &DirectionsRequest) -> String {
        let coordinates: Vec<[f64; 2]> = request
            .coordinates
            .iter()
            .map(|point| [point.x(), point.y()])
            .collect();

        let summary = match self {
            MockReply::Route {
                distance_m,
                duration_s,
            } => serde_json::json!({ "distance": distance_m, "duration": duration_s }),
            MockReply::Malformed => serde_json::json!({ "duration": 60.0 }),
        };

        serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {
                    "summary": summary,
                    "extras": { "surface": { "values": [[0, 1, 3], [1, 2, 11]] } }
                },
                "geometry": { "type": "LineString", "coordinates": coordinates }
            }]
        })
        .to_string()
    }
}

/// Directions service answering every request with the same canned route.
pub struct MockDirections {
    reply: MockReply,
    calls: AtomicUsize,
    requests: Mutex<Vec<DirectionsRequest>>,
}

impl MockDirections {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests.lock().clone()
    }
}

impl DirectionsProvider for MockDirections {
    async fn directions(
        &self,
        _api_key: &ApiKey,
        request: &DirectionsRequest,
    ) -> Result<RouteResult, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        parse_directions_response(&self.reply.body(request))
    }
}

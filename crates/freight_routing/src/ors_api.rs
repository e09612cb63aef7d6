use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    api_key::ApiKey,
    directions::{DirectionsRequest, DirectionsRequestBody, RouteResult, parse_directions_response},
    directions_provider::DirectionsProvider,
    error::RoutingError,
};

pub const ORS_API_URL: &str = "https://api.openrouteservice.org";
pub const ORS_DIRECTIONS_API_PATH: &str = "/v2/directions";

#[derive(Deserialize)]
#[serde(untagged)]
enum OrsErrorBody {
    Detailed { code: u32, message: String },
    Text(String),
}

#[derive(Deserialize)]
struct OrsErrorPayload {
    error: OrsErrorBody,
}

/// Turns a non-success response into an API error, keeping the service
/// message when the body follows the ORS error format.
pub(crate) fn api_error(status: u16, body: &str) -> RoutingError {
    match serde_json::from_str::<OrsErrorPayload>(body) {
        Ok(OrsErrorPayload {
            error: OrsErrorBody::Detailed { code, message },
        }) => RoutingError::Api {
            status,
            code: Some(code),
            message,
        },
        Ok(OrsErrorPayload {
            error: OrsErrorBody::Text(message),
        }) => RoutingError::Api {
            status,
            code: None,
            message,
        },
        Err(_) => RoutingError::Api {
            status,
            code: None,
            message: if body.trim().is_empty() {
                String::from("empty response body")
            } else {
                body.trim().to_owned()
            },
        },
    }
}

#[derive(Debug, Clone)]
pub struct OrsClientParams {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for OrsClientParams {
    fn default() -> Self {
        Self {
            base_url: String::from(ORS_API_URL),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct OrsDirectionsClient {
    params: OrsClientParams,
    client: reqwest::Client,
}

impl OrsDirectionsClient {
    pub fn new(params: OrsClientParams) -> Result<Self, RoutingError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self { params, client })
    }

    pub fn directions_url(&self, request: &DirectionsRequest) -> String {
        format!(
            "{}{}/{}/geojson",
            self.params.base_url.trim_end_matches('/'),
            ORS_DIRECTIONS_API_PATH,
            request.profile
        )
    }
}

impl DirectionsProvider for OrsDirectionsClient {
    async fn directions(
        &self,
        api_key: &ApiKey,
        request: &DirectionsRequest,
    ) -> Result<RouteResult, RoutingError> {
        let url = self.directions_url(request);
        let body = DirectionsRequestBody::from(request);

        debug!(
            "OrsApi: Requesting {} route through {} waypoints",
            request.profile,
            body.coordinates.len()
        );

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, api_key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error = api_error(status.as_u16(), &text);
            warn!("OrsApi: Directions request failed: {}", error);
            return Err(error);
        }

        parse_directions_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detailed_error_payload() {
        let error = api_error(
            404,
            r#"{"error": {"code": 2010, "message": "Could not find routable point within a radius of 350.0 meters"}, "info": {}}"#,
        );

        match error {
            RoutingError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, Some(2010));
                assert!(message.starts_with("Could not find routable point"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_text_error_payload() {
        let error = api_error(403, r#"{"error": "Access to this API has been disallowed"}"#);

        assert_eq!(
            error.to_string(),
            "API error: 403 - Access to this API has been disallowed"
        );
    }

    #[test]
    fn test_unstructured_error_body() {
        let error = api_error(502, "  <html>Bad Gateway</html>\n");
        assert_eq!(error.to_string(), "API error: 502 - <html>Bad Gateway</html>");

        let error = api_error(500, "");
        assert_eq!(error.to_string(), "API error: 500 - empty response body");
    }

    #[test]
    fn test_directions_url() {
        let client = OrsDirectionsClient::new(OrsClientParams {
            base_url: String::from("http://localhost:8082/ors/"),
            ..OrsClientParams::default()
        })
        .unwrap();

        let request = DirectionsRequest {
            coordinates: vec![],
            profile: crate::directions::OrsProfile::DrivingHgv,
            extra_info: vec![],
        };

        assert_eq!(
            client.directions_url(&request),
            "http://localhost:8082/ors/v2/directions/driving-hgv/geojson"
        );
    }

    /// Address of a local port that was just released, so nothing listens on it.
    fn closed_local_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        format!("http://{}", address)
    }

    #[tokio::test]
    async fn test_unreachable_service_is_request_error() {
        let client = OrsDirectionsClient::new(OrsClientParams {
            base_url: closed_local_url(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let request = DirectionsRequest {
            coordinates: vec![
                geo_types::Point::new(104.9282, 11.5564),
                geo_types::Point::new(103.5299, 10.6253),
            ],
            profile: crate::directions::OrsProfile::DrivingHgv,
            extra_info: vec![],
        };

        let error = client
            .directions(&ApiKey::new("key").unwrap(), &request)
            .await
            .unwrap_err();

        assert!(matches!(error, RoutingError::Request(_)));
    }
}

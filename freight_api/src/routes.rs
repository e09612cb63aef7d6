use std::sync::Arc;

use axum::{Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    docs::schema_handler, locations::locations_handler, page::index_handler,
    sessions::routes::session_routes, state::AppState,
};

pub fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/locations", get(locations_handler))
        .route("/docs/schema", get(schema_handler))
        .nest("/sessions", session_routes())
        .layer(cors_layer)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use freight_estimator::{
        config::FreightConfig,
        estimator::Estimator,
        gazetteer::{Gazetteer, GazetteerPreset},
    };
    use freight_routing::ors_api::OrsDirectionsClient;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::state::SessionStore;

    /// Address of a local port that was just released, so routing calls fail fast.
    fn closed_local_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        format!("http://{}", address)
    }

    fn test_app_with_ttl(session_ttl: Duration) -> Router {
        let config = FreightConfig {
            ors_base_url: closed_local_url(),
            http_timeout: Duration::from_secs(2),
            session_ttl,
            ..FreightConfig::default()
        };
        let client = OrsDirectionsClient::new(config.ors_params()).unwrap();

        app(Arc::new(AppState {
            sessions: SessionStore::new(config.session_ttl),
            estimator: Estimator::new(Gazetteer::from_preset(GazetteerPreset::Cambodia), client),
            config,
        }))
    }

    fn test_app() -> Router {
        test_app_with_ttl(Duration::from_secs(60))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn create_session(app: &Router) -> String {
        let response = send(app, Request::post("/sessions").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);

        json_body(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = test_app();
        let response = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("leaflet"));
    }

    #[tokio::test]
    async fn test_locations() {
        let app = test_app();
        let response = send(&app, Request::get("/locations").body(Body::empty()).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;

        assert_eq!(body["locations"].as_array().unwrap().len(), 8);
        assert_eq!(body["default_start"], "Phnom Penh");
        assert_eq!(body["default_end"], "Sihanoukville (Port)");
        assert_eq!(body["default_pricing"]["rental_fee_per_day"], 250.0);
    }

    #[tokio::test]
    async fn test_new_session_renders_idle() {
        let app = test_app();
        let session_id = create_session(&app).await;

        let response = send(
            &app,
            Request::get(format!("/sessions/{}", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "idle" }));
    }

    #[tokio::test]
    async fn test_identical_endpoints_are_rejected_and_remembered() {
        let app = test_app();
        let session_id = create_session(&app).await;

        let response = send(
            &app,
            post_json(
                &format!("/sessions/{}/estimate", session_id),
                json!({ "start": "Kampot", "end": "Kampot", "api_key": "typed-key" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Request::get(format!("/sessions/{}", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        let body = json_body(response).await;

        assert_eq!(body["status"], "notice");
        assert_eq!(body["level"], "warning");
    }

    #[tokio::test]
    async fn test_routing_failure_is_bad_gateway() {
        let app = test_app();
        let session_id = create_session(&app).await;

        let response = send(
            &app,
            post_json(
                &format!("/sessions/{}/estimate", session_id),
                json!({
                    "start": "Phnom Penh",
                    "stopover": "Kampot",
                    "end": "Sihanoukville (Port)",
                    "api_key": "typed-key"
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = send(
            &app,
            Request::get(format!("/sessions/{}", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        let body = json_body(response).await;

        assert_eq!(body["status"], "notice");
        assert_eq!(body["level"], "error");
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let app = test_app();

        let response = send(
            &app,
            post_json(
                "/sessions/7d444840-9dc0-11d1-b245-5ffdce74fad2/estimate",
                json!({ "start": "Kampot", "end": "Kratie" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_found() {
        let app = test_app_with_ttl(Duration::ZERO);
        let session_id = create_session(&app).await;

        let response = send(
            &app,
            Request::get(format!("/sessions/{}", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_schema_document() {
        let app = test_app();
        let response = send(&app, Request::get("/docs/schema").body(Body::empty()).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["EstimateRequest"].is_object());
        assert!(body["SessionView"].is_object());
    }
}

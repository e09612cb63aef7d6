use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use freight_estimator::estimator::EstimateError;

pub enum ApiError {
    BadRequest(String),
    BadGateway(String),
    NotFound(String),
}

impl From<&EstimateError> for ApiError {
    fn from(error: &EstimateError) -> Self {
        match error {
            EstimateError::Routing(_) => ApiError::BadGateway(error.to_string()),
            _ => ApiError::BadRequest(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message).into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
        }
    }
}

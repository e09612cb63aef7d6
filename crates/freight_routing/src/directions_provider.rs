use std::future::Future;

use crate::{
    api_key::ApiKey,
    directions::{DirectionsRequest, RouteResult},
    error::RoutingError,
};

/// A hosted service able to compute a driving route through ordered waypoints.
pub trait DirectionsProvider {
    fn directions(
        &self,
        api_key: &ApiKey,
        request: &DirectionsRequest,
    ) -> impl Future<Output = Result<RouteResult, RoutingError>> + Send;
}

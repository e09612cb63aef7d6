pub mod api_key;
pub mod directions;
pub mod directions_provider;
pub mod error;
pub mod meters;
pub mod ors_api;
pub mod surface;

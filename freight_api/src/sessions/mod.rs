pub mod create;
pub mod estimate;
pub mod get;
pub mod routes;

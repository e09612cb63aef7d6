pub mod config;
pub mod cost;
pub mod credentials;
pub mod estimator;
pub mod gazetteer;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod test_utils;

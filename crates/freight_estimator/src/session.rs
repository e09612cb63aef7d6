use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::estimator::{CostEstimate, EstimateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// User facing message for a refused or failed estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl From<&EstimateError> for Notice {
    fn from(err: &EstimateError) -> Self {
        Notice {
            level: if err.is_warning() {
                NoticeLevel::Warning
            } else {
                NoticeLevel::Error
            },
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Estimate(Box<CostEstimate>),
    Failed(Notice),
}

/// State kept between interactions of one user. Only an explicit estimation
/// changes it, re-rendering reads it as is.
#[derive(Debug, Default)]
pub struct Session {
    has_run: bool,
    last: Option<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    pub fn last(&self) -> Option<&Outcome> {
        self.last.as_ref()
    }

    /// Replaces the previous outcome, successful or not.
    pub fn record(&mut self, result: Result<CostEstimate, EstimateError>) -> &Outcome {
        self.has_run = true;

        let outcome = match result {
            Ok(estimate) => Outcome::Estimate(Box::new(estimate)),
            Err(err) => {
                if err.is_warning() {
                    warn!("Estimation refused: {}", err);
                } else {
                    error!("Estimation failed: {}", err);
                }
                Outcome::Failed(Notice::from(&err))
            }
        };

        self.last.insert(outcome)
    }
}

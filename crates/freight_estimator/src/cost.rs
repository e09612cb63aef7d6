use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of one operating day used to turn driving time into rental days.
pub const OPERATING_HOURS_PER_DAY: f64 = 8.0;

/// Shortest rental billed, half a day.
pub const MINIMUM_DAYS: f64 = 0.5;

pub const DEFAULT_RENTAL_FEE_PER_DAY: f64 = 250.0;
pub const DEFAULT_FUEL_COST_PER_KM: f64 = 0.8;
pub const DEFAULT_UNPAVED_SURCHARGE_FACTOR: f64 = 1.5;

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("Rental fee per day must be a positive number, got {0}")]
    RentalFee(f64),

    #[error("Fuel cost per km must be a positive number, got {0}")]
    FuelCost(f64),

    #[error("Unpaved surcharge factor must be between 1.0 and 3.0, got {0}")]
    SurchargeFactor(f64),
}

/// Unit prices entered for an estimate, in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pricing {
    pub rental_fee_per_day: f64,
    pub fuel_cost_per_km: f64,

    /// Offered as an input but not applied: surface segments come as vertex
    /// index ranges with no distance attached.
    pub unpaved_surcharge_factor: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            rental_fee_per_day: DEFAULT_RENTAL_FEE_PER_DAY,
            fuel_cost_per_km: DEFAULT_FUEL_COST_PER_KM,
            unpaved_surcharge_factor: DEFAULT_UNPAVED_SURCHARGE_FACTOR,
        }
    }
}

impl Pricing {
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.rental_fee_per_day.is_finite() && self.rental_fee_per_day > 0.0) {
            return Err(PricingError::RentalFee(self.rental_fee_per_day));
        }

        if !(self.fuel_cost_per_km.is_finite() && self.fuel_cost_per_km > 0.0) {
            return Err(PricingError::FuelCost(self.fuel_cost_per_km));
        }

        if !(1.0..=3.0).contains(&self.unpaved_surcharge_factor) {
            return Err(PricingError::SurchargeFactor(self.unpaved_surcharge_factor));
        }

        Ok(())
    }
}

/// Rounds the stored value to one decimal with ties to even: 1.25 gives 1.2,
/// 0.85 (stored as 0.8499..) gives 0.8.
fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Rental days for a trip, rounded to a tenth and never below half a day.
pub fn days_needed(duration_hours: f64) -> f64 {
    round_to_tenth(duration_hours / OPERATING_HOURS_PER_DAY).max(MINIMUM_DAYS)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CostBreakdown {
    pub days_needed: f64,

    /// Truck and crew rental
    pub labor_cost: f64,

    /// Fuel and wear, proportional to distance
    pub driving_cost: f64,

    pub total_cost: f64,
}

impl CostBreakdown {
    pub fn compute(distance_km: f64, duration_hours: f64, pricing: &Pricing) -> Self {
        let days_needed = days_needed(duration_hours);
        let labor_cost = days_needed * pricing.rental_fee_per_day;
        let driving_cost = distance_km * pricing.fuel_cost_per_km;

        Self {
            days_needed,
            labor_cost,
            driving_cost,
            total_cost: labor_cost + driving_cost,
        }
    }
}

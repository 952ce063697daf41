//! Per-trip derived metrics
//!
//! Every function here is total and side-effect free: trips still in
//! progress are frequently missing fuel or odometer data, so missing or
//! degenerate inputs degrade to `None` or a zero amount instead of
//! raising. Metrics are recomputed from trip primitives on every use;
//! they are never stored as authoritative input.

use serde::{Deserialize, Serialize};

use crate::models::{Fee, Trip};

/// Distance covered in km: `max(end - start, 0)`.
///
/// Returns 0 when the trip has no end odometer yet or the reading does
/// not exceed the start, so a distance is never negative.
pub fn distance(start: i64, end: Option<i64>) -> i64 {
    match end {
        Some(end) if end > start => end - start,
        _ => 0,
    }
}

/// Purchased minus planned fuel, in liters, sign preserved.
///
/// `None` unless both operands are present. Positive means more fuel was
/// bought than planned.
pub fn fuel_variance(planned: Option<f64>, purchased: Option<f64>) -> Option<f64> {
    match (planned, purchased) {
        (Some(planned), Some(purchased)) => Some(purchased - planned),
        _ => None,
    }
}

/// Fuel consumption in liters per 100 km.
///
/// `None` when the distance is zero or no fuel was purchased; the zero
/// distance guard doubles as the division-by-zero guard.
pub fn consumption_per_100(purchased: Option<f64>, distance_km: i64) -> Option<f64> {
    match purchased {
        Some(liters) if distance_km > 0 => Some(liters / distance_km as f64 * 100.0),
        _ => None,
    }
}

/// Fuel cost of the trip, missing operands treated as 0.
///
/// A trip with no purchase data costs 0 in fuel, which is distinct from
/// "unknown".
pub fn fuel_cost(purchased: Option<f64>, price_per_liter: Option<f64>) -> f64 {
    purchased.unwrap_or(0.0) * price_per_liter.unwrap_or(0.0)
}

/// Fuel cost plus the sum of all ad-hoc fees
pub fn total_cost(fuel_cost: f64, fees: &[Fee]) -> f64 {
    fuel_cost + fees.iter().map(|f| f.amount).sum::<f64>()
}

/// All derived metrics for one trip, computed in a single place so no
/// caller re-implements a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripMetrics {
    pub distance_km: i64,
    pub fuel_variance_liters: Option<f64>,
    pub consumption_per_100km: Option<f64>,
    pub fuel_cost: f64,
    pub fee_cost: f64,
    pub total_cost: f64,
}

impl TripMetrics {
    pub fn compute(trip: &Trip) -> Self {
        let distance_km = distance(trip.start_odometer, trip.end_odometer);
        let fuel_cost = fuel_cost(trip.purchased_fuel_liters, trip.price_per_liter);
        let fee_cost: f64 = trip.fees.iter().map(|f| f.amount).sum();
        Self {
            distance_km,
            fuel_variance_liters: fuel_variance(
                trip.planned_fuel_liters,
                trip.purchased_fuel_liters,
            ),
            consumption_per_100km: consumption_per_100(trip.purchased_fuel_liters, distance_km),
            fuel_cost,
            fee_cost,
            total_cost: fuel_cost + fee_cost,
        }
    }
}

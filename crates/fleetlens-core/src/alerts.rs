//! Trip anomaly alerts
//!
//! Flags a trip's derived metrics against fixed thresholds and optional
//! fleet baselines. Each alert is independent; a trip may raise zero,
//! one, or all three kinds. Evaluation never mutates trip state.

use serde::{Deserialize, Serialize};

use crate::metrics::TripMetrics;

/// Absolute fuel variance above which a trip is flagged, in liters.
/// The boundary is exclusive: a variance of exactly 10 L does not alert.
pub const FUEL_VARIANCE_THRESHOLD_LITERS: f64 = 10.0;

/// A trip alerts when its consumption exceeds the fleet baseline by this factor
pub const CONSUMPTION_BASELINE_FACTOR: f64 = 1.3;

/// A trip alerts when its price per liter exceeds the fleet baseline by this factor
pub const PRICE_BASELINE_FACTOR: f64 = 1.2;

/// Kinds of anomaly a trip can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Bought fuel deviates from the plan by more than the fixed threshold
    FuelVariance,
    /// Consumption well above the fleet average
    AbnormalConsumption,
    /// Price per liter well above the fleet average
    UnusualCost,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FuelVariance => "fuel_variance",
            Self::AbnormalConsumption => "abnormal_consumption",
            Self::UnusualCost => "unusual_cost",
        }
    }

    /// Short label for report detail rows
    pub fn label(&self) -> &'static str {
        match self {
            Self::FuelVariance => "Fuel variance",
            Self::AbnormalConsumption => "Abnormal consumption",
            Self::UnusualCost => "Unusual fuel cost",
        }
    }
}

impl std::str::FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fuel_variance" => Ok(Self::FuelVariance),
            "abnormal_consumption" => Ok(Self::AbnormalConsumption),
            "unusual_cost" => Ok(Self::UnusualCost),
            _ => Err(format!("Unknown alert kind: {}", s)),
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional fleet-wide baselines used by the relative alert kinds.
/// A missing baseline simply disables its alert.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Baselines {
    pub avg_consumption_per_100km: Option<f64>,
    pub avg_price_per_liter: Option<f64>,
}

impl Baselines {
    pub fn none() -> Self {
        Self::default()
    }
}

/// A raised alert with a human-readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Evaluate all alert kinds for one trip's derived metrics.
///
/// `price_per_liter` is the trip's own purchase price, compared against
/// the baseline average when both are present.
pub fn evaluate(
    metrics: &TripMetrics,
    price_per_liter: Option<f64>,
    baselines: &Baselines,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(variance) = metrics.fuel_variance_liters {
        if variance.abs() > FUEL_VARIANCE_THRESHOLD_LITERS {
            alerts.push(Alert {
                kind: AlertKind::FuelVariance,
                message: format!(
                    "Fuel variance of {:+.1} L exceeds the {:.0} L threshold",
                    variance, FUEL_VARIANCE_THRESHOLD_LITERS
                ),
            });
        }
    }

    if let (Some(consumption), Some(baseline)) = (
        metrics.consumption_per_100km,
        baselines.avg_consumption_per_100km,
    ) {
        if consumption > baseline * CONSUMPTION_BASELINE_FACTOR {
            alerts.push(Alert {
                kind: AlertKind::AbnormalConsumption,
                message: format!(
                    "Consumption of {:.1} L/100km is more than {:.0}% of the fleet average ({:.1})",
                    consumption,
                    CONSUMPTION_BASELINE_FACTOR * 100.0,
                    baseline
                ),
            });
        }
    }

    if let (Some(price), Some(baseline)) = (price_per_liter, baselines.avg_price_per_liter) {
        if price > baseline * PRICE_BASELINE_FACTOR {
            alerts.push(Alert {
                kind: AlertKind::UnusualCost,
                message: format!(
                    "Price of {:.0} per liter is more than {:.0}% of the fleet average ({:.0})",
                    price,
                    PRICE_BASELINE_FACTOR * 100.0,
                    baseline
                ),
            });
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(variance: Option<f64>, consumption: Option<f64>) -> TripMetrics {
        TripMetrics {
            distance_km: 100,
            fuel_variance_liters: variance,
            consumption_per_100km: consumption,
            fuel_cost: 0.0,
            fee_cost: 0.0,
            total_cost: 0.0,
        }
    }

    #[test]
    fn test_fuel_variance_boundary_is_exclusive() {
        let baselines = Baselines::none();

        // Exactly 10 L does not alert, on either side of zero
        assert!(evaluate(&metrics(Some(10.0), None), None, &baselines).is_empty());
        assert!(evaluate(&metrics(Some(-10.0), None), None, &baselines).is_empty());

        let raised = evaluate(&metrics(Some(10.1), None), None, &baselines);
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].kind, AlertKind::FuelVariance);

        // Sign does not matter, magnitude does
        let raised = evaluate(&metrics(Some(-15.0), None), None, &baselines);
        assert_eq!(raised[0].kind, AlertKind::FuelVariance);
    }

    #[test]
    fn test_consumption_alert_requires_baseline() {
        // No baseline supplied, no alert no matter the rate
        assert!(evaluate(&metrics(None, Some(80.0)), None, &Baselines::none()).is_empty());

        let baselines = Baselines {
            avg_consumption_per_100km: Some(30.0),
            avg_price_per_liter: None,
        };
        // 30 * 1.3 = 39: at the boundary no alert, above it alerts
        assert!(evaluate(&metrics(None, Some(39.0)), None, &baselines).is_empty());
        let raised = evaluate(&metrics(None, Some(39.5)), None, &baselines);
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].kind, AlertKind::AbnormalConsumption);
    }

    #[test]
    fn test_unusual_cost_alert() {
        let baselines = Baselines {
            avg_consumption_per_100km: None,
            avg_price_per_liter: Some(650.0),
        };
        // 650 * 1.2 = 780
        assert!(evaluate(&metrics(None, None), Some(780.0), &baselines).is_empty());
        let raised = evaluate(&metrics(None, None), Some(800.0), &baselines);
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].kind, AlertKind::UnusualCost);

        // Trip without a purchase price never raises this kind
        assert!(evaluate(&metrics(None, None), None, &baselines).is_empty());
    }

    #[test]
    fn test_alerts_are_independent() {
        let baselines = Baselines {
            avg_consumption_per_100km: Some(30.0),
            avg_price_per_liter: Some(650.0),
        };
        let raised = evaluate(&metrics(Some(20.0), Some(50.0)), Some(900.0), &baselines);
        let kinds: Vec<AlertKind> = raised.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::FuelVariance,
                AlertKind::AbnormalConsumption,
                AlertKind::UnusualCost
            ]
        );
    }
}

//! Report structures — the output contract consumed by export renderers
//!
//! Everything here is plain values, dates, and nested lists; no
//! references back to storage-layer objects. A report is immutable once
//! built.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::DateWindow;
use crate::error::{Error, Result};
use crate::metrics::TripMetrics;
use crate::models::TripStatus;

/// The reporting period, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(Error::InvalidData(format!(
                "report period starts {} after it ends {}",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    /// The immediately preceding period of equal length, used for
    /// period-over-period deltas.
    pub fn previous(&self) -> ReportPeriod {
        let length_days = (self.to - self.from).num_days();
        let to = self.from - Duration::days(1);
        ReportPeriod {
            from: to - Duration::days(length_days),
            to,
        }
    }

    pub fn window(&self) -> DateWindow {
        DateWindow::between(self.from, self.to)
    }
}

/// Period-over-period percentage change.
///
/// Defined as 100 when the previous value is 0 and the current is
/// positive, and 0 when both are 0, so a first active period never
/// divides by zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// One KPI with its previous-period value and delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub current: f64,
    pub previous: f64,
    pub change_pct: f64,
}

impl Kpi {
    pub fn new(current: f64, previous: f64) -> Self {
        Self {
            current,
            previous,
            change_pct: percent_change(current, previous),
        }
    }
}

/// KPI snapshot with period-over-period deltas and textual highlights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub total_trips: Kpi,
    pub total_containers: Kpi,
    pub total_cost: Kpi,
    pub total_fuel_cost: Kpi,
    pub avg_consumption_per_100km: Kpi,
    pub alert_count: Kpi,
    pub highlights: Vec<String>,
}

/// A driver in the container-volume leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDriver {
    pub rank: usize,
    pub driver_id: i64,
    pub name: String,
    pub trip_count: i64,
    pub total_containers: i64,
    pub total_km: i64,
    /// Bounded 0-100, higher is better
    pub efficiency_score: f64,
}

/// A vehicle in the efficiency leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVehicle {
    pub rank: usize,
    pub vehicle_id: i64,
    pub plate: String,
    pub trip_count: i64,
    pub avg_consumption_per_100km: f64,
    pub cost_per_km: f64,
    /// Bounded 0-100, higher is better
    pub efficiency_score: f64,
}

/// Top-N leaderboards for the fleet-performance section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetPerformance {
    pub top_drivers_by_containers: Vec<RankedDriver>,
    pub top_vehicles_by_efficiency: Vec<RankedVehicle>,
}

/// Cost category for the fuel/fees split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    Fuel,
    Fees,
}

impl CostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Fees => "fees",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One slice of the cost-by-category breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCost {
    pub category: CostCategory,
    pub amount: f64,
    /// Share of the period total; percentages sum to 100 for a non-empty
    /// cost set
    pub percentage: f64,
}

/// Aggregated cost for one destination locality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationCost {
    pub destination: String,
    pub trip_count: i64,
    pub total_cost: f64,
}

/// Fleet-wide per-unit averages, each guarded against a zero denominator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetAverages {
    pub price_per_liter: f64,
    pub cost_per_km: f64,
    pub cost_per_trip: f64,
    pub cost_per_container: f64,
}

/// Financial-analysis section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub cost_by_category: Vec<CategoryCost>,
    /// Top destinations by total cost, descending
    pub cost_by_destination: Vec<DestinationCost>,
    pub averages: FleetAverages,
}

/// One flat row per trip for detail-sheet export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDetailRow {
    pub trip_id: i64,
    pub date: NaiveDate,
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub destination: String,
    pub status: TripStatus,
    pub metrics: TripMetrics,
    /// Labels of the alert kinds this trip raised
    pub alerts: Vec<String>,
}

/// Knobs for report assembly
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportOptions {
    pub top_drivers: usize,
    pub top_vehicles: usize,
    pub top_destinations: usize,
    /// Include the flat per-trip rows for detail sheets
    pub include_trip_details: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_drivers: 5,
            top_vehicles: 5,
            top_destinations: 10,
            include_trip_details: false,
        }
    }
}

/// The finished report. Built once per export request, immutable once
/// returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub period: ReportPeriod,
    pub generated_at: DateTime<Utc>,
    pub summary: ExecutiveSummary,
    pub fleet: FleetPerformance,
    pub financial: FinancialAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_details: Option<Vec<TripDetailRow>>,
}

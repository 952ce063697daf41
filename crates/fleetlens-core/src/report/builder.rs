//! Report assembly
//!
//! A pure transform over already-fetched trip/driver/vehicle collections:
//! the builder performs no I/O and once given valid collections it has no
//! failure path. Cancelled trips are excluded from every aggregate and
//! KPI; they still appear in the optional detail rows for audit.

use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

use crate::aggregate::{aggregate_per_entity, fold_trips, EntityStats};
use crate::alerts::{self, Baselines};
use crate::metrics::TripMetrics;
use crate::models::{Driver, Trip, TripStatus, Vehicle};
use crate::ranking::{rank_by_efficiency, rank_by_volume, EfficiencyOrder, VolumeMetric};

use super::types::{
    CategoryCost, CostCategory, DestinationCost, ExecutiveSummary, FinancialAnalysis,
    FleetAverages, FleetPerformance, Kpi, RankedDriver, RankedVehicle, Report, ReportOptions,
    ReportPeriod, TripDetailRow,
};

/// Assembles a [`Report`] for a period and its immediately preceding
/// period of equal length.
pub struct ReportBuilder<'a> {
    trips: &'a [Trip],
    drivers: &'a [Driver],
    vehicles: &'a [Vehicle],
    options: ReportOptions,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(trips: &'a [Trip], drivers: &'a [Driver], vehicles: &'a [Vehicle]) -> Self {
        Self {
            trips,
            drivers,
            vehicles,
            options: ReportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the report. A period with no trips still yields a complete,
    /// internally consistent structure with zeros and empty lists.
    pub fn build(&self, period: ReportPeriod) -> Report {
        let in_period: Vec<Trip> = self
            .trips
            .iter()
            .filter(|t| period.window().contains(t.date))
            .cloned()
            .collect();
        let current: Vec<Trip> = in_period
            .iter()
            .filter(|t| t.status != TripStatus::Cancelled)
            .cloned()
            .collect();
        let previous: Vec<Trip> = self
            .trips
            .iter()
            .filter(|t| {
                period.previous().window().contains(t.date) && t.status != TripStatus::Cancelled
            })
            .cloned()
            .collect();

        tracing::info!(
            from = %period.from,
            to = %period.to,
            current_trips = current.len(),
            previous_trips = previous.len(),
            "Building fleet report"
        );

        let summary = self.executive_summary(&current, &previous);
        let fleet = self.fleet_performance(&current);
        let financial = self.financial_analysis(&current);
        let trip_details = self
            .options
            .include_trip_details
            .then(|| self.detail_rows(&in_period, &fleet_baselines(&current)));

        tracing::debug!(
            ranked_drivers = fleet.top_drivers_by_containers.len(),
            ranked_vehicles = fleet.top_vehicles_by_efficiency.len(),
            destinations = financial.cost_by_destination.len(),
            "Fleet report sections assembled"
        );

        Report {
            period,
            generated_at: Utc::now(),
            summary,
            fleet,
            financial,
            trip_details,
        }
    }

    fn executive_summary(&self, current: &[Trip], previous: &[Trip]) -> ExecutiveSummary {
        let now = fold_trips(0, current.iter());
        let then = fold_trips(0, previous.iter());

        let current_alerts = period_alert_count(current);
        let previous_alerts = period_alert_count(previous);

        let total_trips = Kpi::new(now.trip_count as f64, then.trip_count as f64);
        let total_cost = Kpi::new(now.total_cost(), then.total_cost());

        let mut highlights = Vec::new();
        if now.trip_count == 0 {
            highlights.push("No trips recorded in this period".to_string());
        } else {
            highlights.push(format!(
                "{} trips covered {} km and moved {} containers",
                now.trip_count, now.total_km, now.total_containers
            ));
            if then.trip_count > 0 {
                let direction = if total_cost.change_pct >= 0.0 { "up" } else { "down" };
                highlights.push(format!(
                    "Total cost {} {:.1}% versus the previous period",
                    direction,
                    total_cost.change_pct.abs()
                ));
            }
            if current_alerts > 0 {
                highlights.push(format!("{} anomaly alerts raised", current_alerts));
            }
        }

        ExecutiveSummary {
            total_trips,
            total_containers: Kpi::new(now.total_containers as f64, then.total_containers as f64),
            total_cost,
            total_fuel_cost: Kpi::new(now.total_fuel_cost, then.total_fuel_cost),
            avg_consumption_per_100km: Kpi::new(
                now.avg_consumption_per_100km,
                then.avg_consumption_per_100km,
            ),
            alert_count: Kpi::new(current_alerts as f64, previous_alerts as f64),
            highlights,
        }
    }

    fn fleet_performance(&self, current: &[Trip]) -> FleetPerformance {
        let driver_stats = aggregate_per_entity(current, None, |t| t.driver_id);
        let vehicle_stats = aggregate_per_entity(current, None, |t| t.vehicle_id);

        let driver_scores = efficiency_scores(&driver_stats);
        let vehicle_scores = efficiency_scores(&vehicle_stats);

        let top_drivers_by_containers = rank_by_volume(driver_stats, VolumeMetric::Containers)
            .into_iter()
            .take(self.options.top_drivers)
            .map(|ranked| RankedDriver {
                rank: ranked.rank,
                driver_id: ranked.stats.entity_id,
                name: self.driver_name(ranked.stats.entity_id),
                trip_count: ranked.stats.trip_count,
                total_containers: ranked.stats.total_containers,
                total_km: ranked.stats.total_km,
                efficiency_score: driver_scores
                    .get(&ranked.stats.entity_id)
                    .copied()
                    .unwrap_or(0.0),
            })
            .collect();

        let top_vehicles_by_efficiency =
            rank_by_efficiency(vehicle_stats, EfficiencyOrder::MostEconomical)
                .into_iter()
                .take(self.options.top_vehicles)
                .map(|ranked| RankedVehicle {
                    rank: ranked.rank,
                    vehicle_id: ranked.stats.entity_id,
                    plate: self.vehicle_plate(ranked.stats.entity_id),
                    trip_count: ranked.stats.trip_count,
                    avg_consumption_per_100km: ranked.stats.avg_consumption_per_100km,
                    cost_per_km: ranked.stats.cost_per_km(),
                    efficiency_score: vehicle_scores
                        .get(&ranked.stats.entity_id)
                        .copied()
                        .unwrap_or(0.0),
                })
                .collect();

        FleetPerformance {
            top_drivers_by_containers,
            top_vehicles_by_efficiency,
        }
    }

    fn financial_analysis(&self, current: &[Trip]) -> FinancialAnalysis {
        let totals = fold_trips(0, current.iter());
        let fuel_total = totals.total_fuel_cost;
        let fee_total = totals.total_fee_cost;
        let grand_total = totals.total_cost();

        // Empty cost set yields no categories rather than a 0%/0% split
        let cost_by_category = if grand_total > 0.0 {
            vec![
                CategoryCost {
                    category: CostCategory::Fuel,
                    amount: fuel_total,
                    percentage: fuel_total / grand_total * 100.0,
                },
                CategoryCost {
                    category: CostCategory::Fees,
                    amount: fee_total,
                    percentage: fee_total / grand_total * 100.0,
                },
            ]
        } else {
            vec![]
        };

        let mut by_destination: BTreeMap<&str, (i64, f64)> = BTreeMap::new();
        for trip in current {
            let metrics = TripMetrics::compute(trip);
            let entry = by_destination.entry(trip.destination.as_str()).or_default();
            entry.0 += 1;
            entry.1 += metrics.total_cost;
        }
        let mut cost_by_destination: Vec<DestinationCost> = by_destination
            .into_iter()
            .map(|(destination, (trip_count, total_cost))| DestinationCost {
                destination: destination.to_string(),
                trip_count,
                total_cost,
            })
            .collect();
        // Costliest first; BTreeMap iteration already fixed the name order
        // for ties since the sort is stable.
        cost_by_destination.sort_by(|a, b| {
            b.total_cost
                .partial_cmp(&a.total_cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        cost_by_destination.truncate(self.options.top_destinations);

        let liters_purchased: f64 = current.iter().filter_map(|t| t.purchased_fuel_liters).sum();

        let averages = FleetAverages {
            price_per_liter: guarded_div(fuel_total, liters_purchased),
            cost_per_km: guarded_div(grand_total, totals.total_km as f64),
            cost_per_trip: guarded_div(grand_total, totals.trip_count as f64),
            cost_per_container: guarded_div(grand_total, totals.total_containers as f64),
        };

        FinancialAnalysis {
            cost_by_category,
            cost_by_destination,
            averages,
        }
    }

    fn detail_rows(&self, trips: &[Trip], baselines: &Baselines) -> Vec<TripDetailRow> {
        trips
            .iter()
            .map(|trip| {
                let metrics = TripMetrics::compute(trip);
                let alerts = alerts::evaluate(&metrics, trip.price_per_liter, baselines)
                    .into_iter()
                    .map(|a| a.kind.label().to_string())
                    .collect();
                TripDetailRow {
                    trip_id: trip.id,
                    date: trip.date,
                    driver_id: trip.driver_id,
                    vehicle_id: trip.vehicle_id,
                    destination: trip.destination.clone(),
                    status: trip.status,
                    metrics,
                    alerts,
                }
            })
            .collect()
    }

    fn driver_name(&self, driver_id: i64) -> String {
        self.drivers
            .iter()
            .find(|d| d.id == driver_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| format!("driver #{}", driver_id))
    }

    fn vehicle_plate(&self, vehicle_id: i64) -> String {
        self.vehicles
            .iter()
            .find(|v| v.id == vehicle_id)
            .map(|v| v.plate.clone())
            .unwrap_or_else(|| format!("vehicle #{}", vehicle_id))
    }
}

/// Fleet-average baselines derived from the period's own trips
pub fn fleet_baselines(trips: &[Trip]) -> Baselines {
    let rates: Vec<f64> = trips
        .iter()
        .filter_map(|t| TripMetrics::compute(t).consumption_per_100km)
        .collect();
    let prices: Vec<f64> = trips.iter().filter_map(|t| t.price_per_liter).collect();

    Baselines {
        avg_consumption_per_100km: mean(&rates),
        avg_price_per_liter: mean(&prices),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Total number of alerts raised by a period's trips, evaluated against
/// that period's own fleet baselines.
fn period_alert_count(trips: &[Trip]) -> usize {
    let baselines = fleet_baselines(trips);
    trips
        .iter()
        .map(|trip| {
            let metrics = TripMetrics::compute(trip);
            alerts::evaluate(&metrics, trip.price_per_liter, &baselines).len()
        })
        .sum()
}

/// Bounded 0-100 efficiency score per entity.
///
/// Min-max normalizes average consumption and cost-per-km across the
/// candidate set and averages the two normalized axes; lower consumption
/// and lower cost both push the score toward 100. A degenerate axis
/// (all candidates equal) contributes 0, i.e. the best normalized value.
fn efficiency_scores(stats: &[EntityStats]) -> HashMap<i64, f64> {
    let consumption_bounds = bounds(stats.iter().map(|s| s.avg_consumption_per_100km));
    let cost_bounds = bounds(stats.iter().map(|s| s.cost_per_km()));

    stats
        .iter()
        .map(|s| {
            let norm_consumption = normalize(s.avg_consumption_per_100km, consumption_bounds);
            let norm_cost = normalize(s.cost_per_km(), cost_bounds);
            let score = (1.0 - (norm_consumption + norm_cost) / 2.0) * 100.0;
            (s.entity_id, score.clamp(0.0, 100.0))
        })
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}

fn normalize(value: f64, (min, max): (f64, f64)) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.0
    }
}

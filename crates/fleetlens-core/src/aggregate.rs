//! Per-entity aggregation
//!
//! One canonical single-pass fold turns a trip set into summary
//! statistics for a driver or vehicle. Rankings, month buckets, and the
//! report builder all reuse this fold; no caller re-implements it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metrics::TripMetrics;
use crate::models::Trip;

/// An inclusive date window. An unset bound is open-ended.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// Window covering all dates
    pub fn all() -> Self {
        Self::default()
    }

    /// Inclusive `[from, to]` window
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Summary statistics for one driver or vehicle over a trip set.
/// Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStats {
    pub entity_id: i64,
    pub trip_count: i64,
    pub total_km: i64,
    pub total_containers: i64,
    /// Mean of the per-trip consumption rates; 0 when no trips matched,
    /// reporting consistently expects a number here
    pub avg_consumption_per_100km: f64,
    pub total_fuel_cost: f64,
    pub total_fee_cost: f64,
}

impl EntityStats {
    /// All-zero record for an entity with no matching activity
    pub fn empty(entity_id: i64) -> Self {
        Self {
            entity_id,
            trip_count: 0,
            total_km: 0,
            total_containers: 0,
            avg_consumption_per_100km: 0.0,
            total_fuel_cost: 0.0,
            total_fee_cost: 0.0,
        }
    }

    pub fn total_cost(&self) -> f64 {
        self.total_fuel_cost + self.total_fee_cost
    }

    /// Total cost per km, 0 when no distance was covered
    pub fn cost_per_km(&self) -> f64 {
        if self.total_km > 0 {
            self.total_cost() / self.total_km as f64
        } else {
            0.0
        }
    }
}

/// The canonical fold. Callers hand in the trips already scoped to one
/// entity; month bucketing and the report builder reuse it directly.
pub(crate) fn fold_trips<'a>(
    entity_id: i64,
    trips: impl Iterator<Item = &'a Trip>,
) -> EntityStats {
    let mut stats = EntityStats::empty(entity_id);
    let mut consumption_sum = 0.0;

    for trip in trips {
        let metrics = TripMetrics::compute(trip);
        stats.trip_count += 1;
        stats.total_km += metrics.distance_km;
        stats.total_containers += trip.container_count();
        if let Some(rate) = metrics.consumption_per_100km {
            consumption_sum += rate;
        }
        stats.total_fuel_cost += metrics.fuel_cost;
        stats.total_fee_cost += metrics.fee_cost;
    }

    if stats.trip_count > 0 {
        stats.avg_consumption_per_100km = consumption_sum / stats.trip_count as f64;
    }
    stats
}

/// Aggregate trips already filtered to one entity, optionally restricted
/// to an inclusive date window.
///
/// An entity with zero matching trips yields a valid all-zero record;
/// absence of activity is a normal outcome, not a fault.
pub fn aggregate(entity_id: i64, trips: &[Trip], window: Option<&DateWindow>) -> EntityStats {
    fold_trips(
        entity_id,
        trips
            .iter()
            .filter(|trip| window.map_or(true, |w| w.contains(trip.date))),
    )
}

/// Group a mixed trip collection by entity and aggregate each group.
/// Output is ordered by entity id ascending.
pub fn aggregate_per_entity<F>(
    trips: &[Trip],
    window: Option<&DateWindow>,
    entity_of: F,
) -> Vec<EntityStats>
where
    F: Fn(&Trip) -> i64,
{
    let mut grouped: BTreeMap<i64, Vec<&Trip>> = BTreeMap::new();
    for trip in trips {
        if window.map_or(true, |w| w.contains(trip.date)) {
            grouped.entry(entity_of(trip)).or_default().push(trip);
        }
    }
    grouped
        .into_iter()
        .map(|(entity_id, group)| fold_trips(entity_id, group.into_iter()))
        .collect()
}

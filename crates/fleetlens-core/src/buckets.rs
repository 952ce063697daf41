//! Calendar-month bucketing
//!
//! Groups trips into `YYYY-MM` buckets keyed on the trip date (never the
//! record-creation time) and re-runs the canonical aggregation fold per
//! bucket. The series is sparse: a month with no trips is omitted, and
//! zero-filling for dense charting is the caller's concern.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregate::{fold_trips, EntityStats};
use crate::models::Trip;

/// `YYYY-MM` bucket key for a trip date
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// One month of aggregated activity for an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// `YYYY-MM`
    pub month: String,
    pub stats: EntityStats,
}

/// Monthly time series for one entity, chronologically ascending.
///
/// The trips are expected to be scoped to the entity already, matching
/// the aggregation input contract.
pub fn monthly_series(entity_id: i64, trips: &[Trip]) -> Vec<MonthlyStats> {
    let mut buckets: BTreeMap<String, Vec<&Trip>> = BTreeMap::new();
    for trip in trips {
        buckets.entry(month_key(trip.date)).or_default().push(trip);
    }
    // BTreeMap iteration is lexicographic, which for YYYY-MM keys is
    // chronological.
    buckets
        .into_iter()
        .map(|(month, group)| MonthlyStats {
            month,
            stats: fold_trips(entity_id, group.into_iter()),
        })
        .collect()
}

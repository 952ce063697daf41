//! Entity rankings
//!
//! Orders aggregated driver/vehicle stats for the fleet-performance
//! section. Tie-breaks are deterministic (entity id ascending) so ranks
//! form a strict 1-based order even for identical metric values.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::aggregate::EntityStats;

/// Entities with fewer qualifying trips than this are excluded from
/// efficiency rankings; averages below this sample size are not
/// statistically meaningful and must not appear in a leaderboard.
pub const MIN_EFFICIENCY_SAMPLE: i64 = 3;

/// Count metric used by volume rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMetric {
    Containers,
    Trips,
    Kilometers,
}

impl VolumeMetric {
    pub fn value(&self, stats: &EntityStats) -> i64 {
        match self {
            Self::Containers => stats.total_containers,
            Self::Trips => stats.trip_count,
            Self::Kilometers => stats.total_km,
        }
    }
}

/// Direction of an efficiency ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyOrder {
    /// Lowest average consumption first
    MostEconomical,
    /// Highest average consumption first
    LeastEconomical,
}

/// An entity's stats with its 1-based position in a ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntity {
    pub rank: usize,
    pub stats: EntityStats,
}

fn assign_ranks(stats: Vec<EntityStats>) -> Vec<RankedEntity> {
    stats
        .into_iter()
        .enumerate()
        .map(|(i, stats)| RankedEntity { rank: i + 1, stats })
        .collect()
}

/// Rank descending by a count metric. No minimum-sample filter; a single
/// busy day is still volume.
pub fn rank_by_volume(mut stats: Vec<EntityStats>, metric: VolumeMetric) -> Vec<RankedEntity> {
    stats.sort_by(|a, b| {
        metric
            .value(b)
            .cmp(&metric.value(a))
            .then(a.entity_id.cmp(&b.entity_id))
    });
    assign_ranks(stats)
}

/// Rank by average consumption, excluding entities below the
/// [`MIN_EFFICIENCY_SAMPLE`] floor.
pub fn rank_by_efficiency(stats: Vec<EntityStats>, order: EfficiencyOrder) -> Vec<RankedEntity> {
    let mut qualified: Vec<EntityStats> = stats
        .into_iter()
        .filter(|s| s.trip_count >= MIN_EFFICIENCY_SAMPLE)
        .collect();

    qualified.sort_by(|a, b| {
        let by_rate = a
            .avg_consumption_per_100km
            .partial_cmp(&b.avg_consumption_per_100km)
            .unwrap_or(Ordering::Equal);
        let directed = match order {
            EfficiencyOrder::MostEconomical => by_rate,
            EfficiencyOrder::LeastEconomical => by_rate.reverse(),
        };
        directed.then(a.entity_id.cmp(&b.entity_id))
    });
    assign_ranks(qualified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(entity_id: i64, trip_count: i64, containers: i64, consumption: f64) -> EntityStats {
        EntityStats {
            entity_id,
            trip_count,
            total_km: trip_count * 100,
            total_containers: containers,
            avg_consumption_per_100km: consumption,
            total_fuel_cost: 0.0,
            total_fee_cost: 0.0,
        }
    }

    #[test]
    fn test_volume_ranking_descending_with_id_tie_break() {
        let ranked = rank_by_volume(
            vec![
                stats(3, 1, 10, 0.0),
                stats(1, 1, 25, 0.0),
                stats(2, 1, 10, 0.0),
            ],
            VolumeMetric::Containers,
        );
        let order: Vec<(usize, i64)> = ranked.iter().map(|r| (r.rank, r.stats.entity_id)).collect();
        // Tied entities get consecutive ranks, lower id first
        assert_eq!(order, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_volume_ranking_has_no_sample_floor() {
        let ranked = rank_by_volume(vec![stats(1, 1, 4, 0.0)], VolumeMetric::Containers);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_efficiency_ranking_excludes_small_samples() {
        // Driver A: 2 trips at 10 L/100km, driver B: 3 trips at 12 L/100km.
        // A is excluded for sample size even though its average is better.
        let ranked = rank_by_efficiency(
            vec![stats(1, 2, 0, 10.0), stats(2, 3, 0, 12.0)],
            EfficiencyOrder::MostEconomical,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].stats.entity_id, 2);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_efficiency_ranking_directions() {
        let input = vec![
            stats(1, 3, 0, 18.0),
            stats(2, 4, 0, 12.0),
            stats(3, 5, 0, 15.0),
        ];

        let economical = rank_by_efficiency(input.clone(), EfficiencyOrder::MostEconomical);
        let ids: Vec<i64> = economical.iter().map(|r| r.stats.entity_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let thirsty = rank_by_efficiency(input, EfficiencyOrder::LeastEconomical);
        let ids: Vec<i64> = thirsty.iter().map(|r| r.stats.entity_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_efficiency_tie_break_by_id() {
        let ranked = rank_by_efficiency(
            vec![stats(5, 3, 0, 14.0), stats(2, 3, 0, 14.0)],
            EfficiencyOrder::MostEconomical,
        );
        let ids: Vec<i64> = ranked.iter().map(|r| r.stats.entity_id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(ranked[1].rank, 2);
    }
}

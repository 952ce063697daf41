//! Property suite for the engine's formula and ranking invariants

mod common;

use proptest::prelude::*;

use fleetlens_core::report::percent_change;
use fleetlens_core::{
    alerts, metrics, rank_by_efficiency, AlertKind, Baselines, EfficiencyOrder, EntityStats,
    ReportBuilder, ReportPeriod, TripMetrics, MIN_EFFICIENCY_SAMPLE,
};

fn stats_from(entries: &[(i64, f64)]) -> Vec<EntityStats> {
    entries
        .iter()
        .enumerate()
        .map(|(i, (trip_count, rate))| EntityStats {
            entity_id: i as i64,
            trip_count: *trip_count,
            total_km: trip_count * 100,
            total_containers: 0,
            avg_consumption_per_100km: *rate,
            total_fuel_cost: 0.0,
            total_fee_cost: 0.0,
        })
        .collect()
}

proptest! {
    #[test]
    fn distance_is_never_negative(
        start in 0i64..2_000_000,
        end in proptest::option::of(0i64..2_000_000),
    ) {
        let d = metrics::distance(start, end);
        prop_assert!(d >= 0);
        if let Some(end) = end {
            if end > start {
                prop_assert_eq!(d, end - start);
            }
        }
    }

    #[test]
    fn consumption_is_null_at_zero_distance(
        fuel in proptest::option::of(0.0f64..10_000.0),
    ) {
        prop_assert!(metrics::consumption_per_100(fuel, 0).is_none());
    }

    #[test]
    fn fuel_variance_alert_iff_magnitude_exceeds_threshold(
        planned in 0.0f64..200.0,
        purchased in 0.0f64..200.0,
    ) {
        let trip = common::with_fuel(
            common::trip(1, common::date(2024, 5, 1), 1, 1),
            planned,
            purchased,
            650.0,
        );
        let raised = alerts::evaluate(
            &TripMetrics::compute(&trip),
            trip.price_per_liter,
            &Baselines::none(),
        );
        let expected = (purchased - planned).abs() > 10.0;
        prop_assert_eq!(
            raised.iter().any(|a| a.kind == AlertKind::FuelVariance),
            expected
        );
    }

    #[test]
    fn efficiency_ranking_enforces_sample_floor(
        entries in prop::collection::vec((0i64..6, 0.0f64..50.0), 0..20),
    ) {
        let ranked = rank_by_efficiency(stats_from(&entries), EfficiencyOrder::MostEconomical);

        // No entity below the sample floor ever appears
        prop_assert!(ranked
            .iter()
            .all(|r| r.stats.trip_count >= MIN_EFFICIENCY_SAMPLE));

        // Ranks are a strict 1-based sequence
        for (i, r) in ranked.iter().enumerate() {
            prop_assert_eq!(r.rank, i + 1);
        }

        // Ascending by consumption, ties strictly by entity id
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0].stats, &pair[1].stats);
            prop_assert!(
                a.avg_consumption_per_100km < b.avg_consumption_per_100km
                    || (a.avg_consumption_per_100km == b.avg_consumption_per_100km
                        && a.entity_id < b.entity_id)
            );
        }
    }

    #[test]
    fn percent_change_sentinels_hold(current in 0.0f64..1e9) {
        let expected = if current > 0.0 { 100.0 } else { 0.0 };
        prop_assert_eq!(percent_change(current, 0.0), expected);
    }

    #[test]
    fn category_percentages_sum_to_100_or_are_empty(
        purchases in prop::collection::vec((0.0f64..100.0, 0.0f64..1_000.0, 0.0f64..5_000.0), 1..10),
    ) {
        let trips: Vec<_> = purchases
            .iter()
            .enumerate()
            .map(|(i, (liters, price, fee))| {
                let t = common::with_fuel(
                    common::trip(i as i64, common::date(2024, 4, 1 + (i as u32 % 28)), 1, 1),
                    *liters,
                    *liters,
                    *price,
                );
                common::with_fee(t, "Fee", *fee)
            })
            .collect();

        let report = ReportBuilder::new(&trips, &[], &[]).build(
            ReportPeriod::new(common::date(2024, 4, 1), common::date(2024, 4, 30)).unwrap(),
        );

        let categories = &report.financial.cost_by_category;
        if categories.is_empty() {
            prop_assert_eq!(report.summary.total_cost.current, 0.0);
        } else {
            let pct_sum: f64 = categories.iter().map(|c| c.percentage).sum();
            prop_assert!((pct_sum - 100.0).abs() < 1e-6);
        }
    }
}

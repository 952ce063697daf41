//! Report assembly — executive summary, fleet performance, financials
//!
//! The finished [`Report`] is the single immutable structure handed to
//! the export renderers. Assembly is a pure transform over trip, driver,
//! and vehicle collections; data fetching happens behind the
//! [`crate::source::TripSource`] seam before the builder runs.

mod builder;
mod types;

pub use builder::{fleet_baselines, ReportBuilder};
pub use types::{
    percent_change, CategoryCost, CostCategory, DestinationCost, ExecutiveSummary,
    FinancialAnalysis, FleetAverages, FleetPerformance, Kpi, RankedDriver, RankedVehicle, Report,
    ReportOptions, ReportPeriod, TripDetailRow,
};

use crate::aggregate::DateWindow;
use crate::error::Result;
use crate::models::{Driver, Vehicle};
use crate::source::TripSource;

/// Fetch the trips covering the period and its preceding comparison
/// period from a source, then build the report.
///
/// The fetch is the only fallible step; assembly itself cannot fail.
pub fn build_from_source(
    source: &dyn TripSource,
    drivers: &[Driver],
    vehicles: &[Vehicle],
    period: ReportPeriod,
    options: ReportOptions,
) -> Result<Report> {
    let window = DateWindow::between(period.previous().from, period.to);
    let trips = source.fetch_trips(&window)?;
    Ok(ReportBuilder::new(&trips, drivers, vehicles)
        .with_options(options)
        .build(period))
}

//! FleetLens Core Library
//!
//! The trip-metrics and fleet-reporting engine for the FleetLens fleet
//! operations tool:
//! - Per-trip derived metrics (distance, fuel variance, consumption, cost)
//! - Anomaly alert evaluation against fixed thresholds and fleet baselines
//! - Per-driver / per-vehicle aggregation over date windows
//! - Volume and efficiency rankings with a minimum-sample floor
//! - Calendar-month bucketing for time series
//! - Report assembly (executive summary, fleet performance, financials)
//!
//! All computation is synchronous and pure: trip rows come in through the
//! [`source::TripSource`] seam, a finished [`report::Report`] goes out to
//! the export renderers. Storage, UI, auth, and document rendering live
//! in other layers.

pub mod aggregate;
pub mod alerts;
pub mod buckets;
pub mod error;
pub mod metrics;
pub mod models;
pub mod ranking;
pub mod report;
pub mod source;

pub use aggregate::{aggregate, aggregate_per_entity, DateWindow, EntityStats};
pub use alerts::{Alert, AlertKind, Baselines};
pub use buckets::{month_key, monthly_series, MonthlyStats};
pub use error::{Error, Result};
pub use metrics::TripMetrics;
pub use models::{
    Container, ContainerStatus, ContainerType, Driver, DriverStatus, Fee, FuelType, Trip,
    TripStatus, Vehicle, VehicleStatus,
};
pub use ranking::{
    rank_by_efficiency, rank_by_volume, EfficiencyOrder, RankedEntity, VolumeMetric,
    MIN_EFFICIENCY_SAMPLE,
};
pub use report::{
    build_from_source, Report, ReportBuilder, ReportOptions, ReportPeriod, TripDetailRow,
};
pub use source::{InMemorySource, TripSource};

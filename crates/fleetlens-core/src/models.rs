//! Domain models for FleetLens

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single vehicle movement from one locality to another, with its
/// associated driver, fuel, fees, and containers.
///
/// Distance, fuel variance, consumption, and cost are derived, never
/// stored: they are recomputed from these primitives every time (see
/// [`crate::metrics::TripMetrics`]) so stored values cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub date: NaiveDate,
    pub driver_id: i64,
    pub vehicle_id: i64,
    /// Destination locality, used for the cost-by-destination breakdown
    pub destination: String,
    pub start_odometer: i64,
    /// Absent until the trip closes
    pub end_odometer: Option<i64>,
    pub planned_fuel_liters: Option<f64>,
    pub purchased_fuel_liters: Option<f64>,
    pub price_per_liter: Option<f64>,
    pub fees: Vec<Fee>,
    pub containers: Vec<Container>,
    pub status: TripStatus,
    pub notes: Option<String>,
}

impl Trip {
    /// Check the odometer and fee invariants.
    ///
    /// The end odometer, once set, must exceed the start odometer, and an
    /// open trip has no end odometer yet. Fee amounts are non-negative.
    pub fn validate(&self) -> Result<()> {
        if let Some(end) = self.end_odometer {
            if self.status == TripStatus::Open {
                return Err(Error::InvalidData(format!(
                    "trip {} is open but has an end odometer",
                    self.id
                )));
            }
            if end <= self.start_odometer {
                return Err(Error::InvalidData(format!(
                    "trip {}: end odometer {} must exceed start odometer {}",
                    self.id, end, self.start_odometer
                )));
            }
        }
        for fee in &self.fees {
            if fee.amount < 0.0 {
                return Err(Error::InvalidData(format!(
                    "trip {}: fee '{}' has a negative amount",
                    self.id, fee.label
                )));
            }
        }
        Ok(())
    }

    /// Number of containers attached to this trip
    pub fn container_count(&self) -> i64 {
        self.containers.len() as i64
    }
}

/// Trip lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Open,
    Closed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown trip status: {}", s)),
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ad-hoc fee attached to a trip (tolls, parking, loading, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fee {
    pub label: String,
    /// Non-negative; contributes to the trip total cost
    pub amount: f64,
}

/// A container carried on a trip. Containers are counted, not costed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub type_id: i64,
    pub serial: Option<String>,
    pub status: ContainerStatus,
}

/// Delivery status of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerStatus {
    InTransit,
    Delivered,
    Returned,
}

impl ContainerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
        }
    }
}

impl std::str::FromStr for ContainerStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "returned" => Ok(Self::Returned),
            _ => Err(format!("Unknown container status: {}", s)),
        }
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A container type with its nominal size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerType {
    pub id: i64,
    pub name: String,
    /// Nominal size in feet (20, 40, ...)
    pub nominal_size_ft: u32,
}

/// A driver. Never hard-deleted while linked trips exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub status: DriverStatus,
}

impl Driver {
    /// Mark the driver as on a trip. Only an active driver can be assigned.
    pub fn assign_trip(&mut self) -> Result<()> {
        match self.status {
            DriverStatus::Active => {
                self.status = DriverStatus::OnTrip;
                Ok(())
            }
            other => Err(Error::InvalidData(format!(
                "driver {} cannot be assigned a trip while {}",
                self.id, other
            ))),
        }
    }

    /// Mark the driver as back from a trip
    pub fn return_from_trip(&mut self) {
        if self.status == DriverStatus::OnTrip {
            self.status = DriverStatus::Active;
        }
    }
}

/// Driver availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Active,
    OnTrip,
    OnLeave,
    Suspended,
    Inactive,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnTrip => "on_trip",
            Self::OnLeave => "on_leave",
            Self::Suspended => "suspended",
            Self::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for DriverStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "on_trip" => Ok(Self::OnTrip),
            "on_leave" => Ok(Self::OnLeave),
            "suspended" => Ok(Self::Suspended),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("Unknown driver status: {}", s)),
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fleet vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub fuel_type: FuelType,
    /// Monotonically non-decreasing running total, updated on trip close
    pub current_odometer: i64,
    pub status: VehicleStatus,
}

impl Vehicle {
    /// Advance the running odometer when a trip closes.
    ///
    /// The reading never goes backward; a stale or lower end odometer
    /// leaves it unchanged.
    pub fn record_trip_close(&mut self, end_odometer: i64) {
        if end_odometer > self.current_odometer {
            self.current_odometer = end_odometer;
        }
    }
}

/// Vehicle availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    InRepair,
    Inactive,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InRepair => "in_repair",
            Self::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "in_repair" => Ok(Self::InRepair),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("Unknown vehicle status: {}", s)),
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle fuel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Diesel,
    Gasoline,
    Lpg,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diesel => "diesel",
            Self::Gasoline => "gasoline",
            Self::Lpg => "lpg",
        }
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "diesel" => Ok(Self::Diesel),
            "gasoline" | "petrol" => Ok(Self::Gasoline),
            "lpg" => Ok(Self::Lpg),
            _ => Err(format!("Unknown fuel type: {}", s)),
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

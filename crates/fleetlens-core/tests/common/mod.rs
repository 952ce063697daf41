//! Shared fixtures for the integration suites
#![allow(dead_code)]

use chrono::NaiveDate;
use fleetlens_core::{
    Container, ContainerStatus, Driver, DriverStatus, Fee, FuelType, Trip, TripStatus, Vehicle,
    VehicleStatus,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A closed 200 km trip with no fuel data; tweak fields per test
pub fn trip(id: i64, on: NaiveDate, driver_id: i64, vehicle_id: i64) -> Trip {
    Trip {
        id,
        date: on,
        driver_id,
        vehicle_id,
        destination: "Kayes".to_string(),
        start_odometer: 10_000,
        end_odometer: Some(10_200),
        planned_fuel_liters: None,
        purchased_fuel_liters: None,
        price_per_liter: None,
        fees: vec![],
        containers: vec![],
        status: TripStatus::Closed,
        notes: None,
    }
}

pub fn with_fuel(mut trip: Trip, planned: f64, purchased: f64, price: f64) -> Trip {
    trip.planned_fuel_liters = Some(planned);
    trip.purchased_fuel_liters = Some(purchased);
    trip.price_per_liter = Some(price);
    trip
}

pub fn with_fee(mut trip: Trip, label: &str, amount: f64) -> Trip {
    trip.fees.push(Fee {
        label: label.to_string(),
        amount,
    });
    trip
}

pub fn with_containers(mut trip: Trip, count: usize) -> Trip {
    for _ in 0..count {
        trip.containers.push(Container {
            type_id: 1,
            serial: None,
            status: ContainerStatus::Delivered,
        });
    }
    trip
}

pub fn driver(id: i64, name: &str) -> Driver {
    Driver {
        id,
        name: name.to_string(),
        status: DriverStatus::Active,
    }
}

pub fn vehicle(id: i64, plate: &str) -> Vehicle {
    Vehicle {
        id,
        plate: plate.to_string(),
        make: "Mercedes".to_string(),
        model: "Actros".to_string(),
        year: 2020,
        fuel_type: FuelType::Diesel,
        current_odometer: 10_000,
        status: VehicleStatus::Active,
    }
}

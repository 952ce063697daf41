//! Trip-collection seam
//!
//! The engine never issues its own queries: the data-fetch strategy is
//! the only variable point, abstracted behind [`TripSource`]. A storage
//! adapter implements the trait in the application layer; the in-memory
//! source serves tests and callers that already hold rows.

use anyhow::anyhow;

use crate::aggregate::DateWindow;
use crate::error::Result;
use crate::models::Trip;

/// Source of trip rows, already scoped to a date window.
///
/// An implementation that cannot reach its backing store returns
/// [`crate::Error::Source`] — the one error class that propagates as a
/// hard failure to the caller.
pub trait TripSource {
    fn fetch_trips(&self, window: &DateWindow) -> Result<Vec<Trip>>;
}

/// Trip source over a collection already in memory
pub struct InMemorySource {
    trips: Vec<Trip>,
}

impl InMemorySource {
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }
}

impl TripSource for InMemorySource {
    fn fetch_trips(&self, window: &DateWindow) -> Result<Vec<Trip>> {
        Ok(self
            .trips
            .iter()
            .filter(|t| window.contains(t.date))
            .cloned()
            .collect())
    }
}

/// Source that always fails, standing in for an unreachable backend
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TripSource for UnavailableSource {
    fn fetch_trips(&self, _window: &DateWindow) -> Result<Vec<Trip>> {
        Err(anyhow!("trip store unavailable: {}", self.reason).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripStatus;
    use chrono::NaiveDate;

    fn trip(id: i64, date: (i32, u32, u32)) -> Trip {
        Trip {
            id,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            driver_id: 1,
            vehicle_id: 1,
            destination: "Bougouni".to_string(),
            start_odometer: 0,
            end_odometer: Some(50),
            planned_fuel_liters: None,
            purchased_fuel_liters: None,
            price_per_liter: None,
            fees: vec![],
            containers: vec![],
            status: TripStatus::Closed,
            notes: None,
        }
    }

    #[test]
    fn test_in_memory_source_scopes_to_window() {
        let source = InMemorySource::new(vec![
            trip(1, (2024, 1, 10)),
            trip(2, (2024, 2, 10)),
            trip(3, (2024, 3, 10)),
        ]);
        let window = DateWindow::between(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        );
        let fetched = source.fetch_trips(&window).unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, 2);
    }

    #[test]
    fn test_unavailable_source_propagates() {
        let source = UnavailableSource::new("connection refused");
        let err = source.fetch_trips(&DateWindow::all()).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}

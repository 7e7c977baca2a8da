//! Fixture-backed timetable provider for testing without a live service.
//!
//! Loads a station list and a flat journey list from JSON files and serves
//! them as if they were provider responses.

use std::path::Path;
use std::sync::Arc;

use chrono::Local;

use crate::domain::{Instant, Journey, Station};

use super::error::TimetableError;
use super::provider::TimetableProvider;

/// Station list file inside a fixture directory.
pub const STATIONS_FILE: &str = "stations.json";

/// Journey list file inside a fixture directory.
pub const JOURNEYS_FILE: &str = "journeys.json";

/// Timetable provider that serves fixed data.
///
/// `journeys` answers with the fixture journeys running from the requested
/// origin to the requested destination whose first leg departs on the same
/// local calendar day as `when`, in fixture order.
#[derive(Debug, Clone, Default)]
pub struct StaticTimetable {
    stations: Arc<Vec<Station>>,
    journeys: Arc<Vec<Journey>>,
}

impl StaticTimetable {
    /// Create a provider over in-memory data.
    pub fn new(stations: Vec<Station>, journeys: Vec<Journey>) -> Self {
        Self {
            stations: Arc::new(stations),
            journeys: Arc::new(journeys),
        }
    }

    /// Load `stations.json` and `journeys.json` from a directory.
    ///
    /// A missing `journeys.json` is treated as an empty timetable; a missing
    /// `stations.json` is an error.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let data_dir = data_dir.as_ref();

        let stations: Vec<Station> = read_json(&data_dir.join(STATIONS_FILE))?;

        let journeys_path = data_dir.join(JOURNEYS_FILE);
        let journeys: Vec<Journey> = if journeys_path.is_file() {
            read_json(&journeys_path)?
        } else {
            Vec::new()
        };

        tracing::info!(
            dir = %data_dir.display(),
            stations = stations.len(),
            journeys = journeys.len(),
            "loaded timetable fixtures"
        );

        Ok(Self::new(stations, journeys))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, TimetableError> {
    let json = std::fs::read_to_string(path).map_err(|e| TimetableError::Fixture {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;

    serde_json::from_str(&json).map_err(|e| TimetableError::Fixture {
        message: format!("failed to parse {}: {}", path.display(), e),
    })
}

/// Whether a journey starts at `origin` and ends at `destination`.
fn serves(journey: &Journey, origin: &str, destination: &str) -> bool {
    let leg = journey.first_leg();
    let last = journey.legs().last().unwrap_or(leg);
    leg.origin.id == origin && last.destination.id == destination
}

impl TimetableProvider for StaticTimetable {
    async fn stations(&self) -> Result<Vec<Station>, TimetableError> {
        Ok(self.stations.as_ref().clone())
    }

    async fn journeys(
        &self,
        origin: &str,
        destination: &str,
        when: Instant,
    ) -> Result<Vec<Journey>, TimetableError> {
        let day = when.with_timezone(&Local).date_naive();

        Ok(self
            .journeys
            .iter()
            .filter(|j| serves(j, origin, destination))
            .filter(|j| j.departure().with_timezone(&Local).date_naive() == day)
            .cloned()
            .collect())
    }
}

//! Station and stop records.

use serde::{Deserialize, Serialize};

fn station_kind() -> String {
    "station".to_string()
}

fn location_kind() -> String {
    "location".to_string()
}

/// Geographic position of a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type", default = "location_kind")]
    pub kind: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// A stop or station, as returned by the timetable provider.
///
/// The same record describes entries of the station list and the
/// origin/destination/stopover stops of a leg. Stops embedded in legs
/// usually carry no `location`.
///
/// # Examples
///
/// ```
/// use timetable_server::domain::Station;
///
/// let station = Station::new("94-2006", "Lisboa - Oriente");
/// assert_eq!(station.kind, "station");
/// assert!(station.location.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(rename = "type", default = "station_kind")]
    pub kind: String,

    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uic_id: Option<String>,

    /// Display name; the key used for fuzzy station search.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Station {
    /// Create a station with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: station_kind(),
            id: id.into(),
            uic_id: None,
            name: name.into(),
            timezone: None,
            country: None,
            location: None,
        }
    }
}

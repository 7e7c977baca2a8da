//! Journey leg types.
//!
//! A `Leg` is one vehicle segment of a journey. Only the first leg's
//! departure and arrival take part in journey resolution; everything else
//! is carried through to the client untouched.

use serde::{Deserialize, Serialize};

use super::{Instant, Station};

/// A transport operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    #[serde(rename = "type", default = "operator_kind")]
    pub kind: String,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn operator_kind() -> String {
    "operator".to_string()
}

/// The line a leg runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    #[serde(rename = "type", default = "line_kind")]
    pub kind: String,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

fn line_kind() -> String {
    "line".to_string()
}

/// An intermediate stop of a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stopover {
    #[serde(rename = "type", default = "stopover_kind")]
    pub kind: String,
    pub stop: Station,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<Instant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<Instant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_platform: Option<String>,
}

fn stopover_kind() -> String {
    "stopover".to_string()
}

/// One vehicle segment of a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub origin: Station,
    pub destination: Station,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,

    /// Scheduled departure from `origin`.
    pub departure: Instant,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_platform: Option<String>,

    /// Scheduled arrival at `destination`.
    pub arrival: Instant,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,

    #[serde(default)]
    pub stopovers: Vec<Stopover>,
}

impl Leg {
    /// Create a leg with only its endpoints and times.
    pub fn new(
        origin: Station,
        destination: Station,
        departure: Instant,
        arrival: Instant,
    ) -> Self {
        Self {
            origin,
            destination,
            line: None,
            trip_id: None,
            departure,
            departure_platform: None,
            arrival,
            arrival_platform: None,
            mode: None,
            public: None,
            operator: None,
            stopovers: Vec::new(),
        }
    }

    /// Time spent on board.
    pub fn duration(&self) -> chrono::Duration {
        self.arrival - self.departure
    }
}

//! Journey types.
//!
//! A `Journey` is a complete itinerary from origin to destination made of
//! one or more legs. Journeys come from the timetable provider and are never
//! modified afterwards, only filtered and passed through.

use serde::{Deserialize, Serialize};

use super::{DomainError, Instant, Leg};

/// A single fare within a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub class: u32,
    pub amount: f64,
    pub currency: String,
    pub fare_type: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Pricing information attached to a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub class: u32,
    pub amount: f64,
    pub currency: String,
    pub fare_type: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub fares: Vec<Fare>,
}

/// Wire shape of a journey before validation.
#[derive(Deserialize)]
struct JourneyRecord {
    #[serde(rename = "type", default = "journey_kind")]
    kind: String,
    id: String,
    legs: Vec<Leg>,
    #[serde(default)]
    price: Option<Price>,
}

fn journey_kind() -> String {
    "journey".to_string()
}

/// A complete itinerary from origin to destination.
///
/// # Invariants
///
/// - At least one leg. The first leg's departure and arrival are the
///   journey's representative times.
///
/// Deserialization enforces the invariant, so malformed provider data is
/// rejected at the boundary rather than during resolution.
///
/// # Examples
///
/// ```
/// use timetable_server::domain::{Journey, Leg, Station};
/// use chrono::DateTime;
///
/// let dep = DateTime::parse_from_rfc3339("2024-03-15T08:00:00Z").unwrap();
/// let arr = DateTime::parse_from_rfc3339("2024-03-15T10:49:00Z").unwrap();
/// let leg = Leg::new(Station::new("a", "Lisboa"), Station::new("b", "Porto"), dep, arr);
///
/// let journey = Journey::new("j1", vec![leg]).unwrap();
/// assert_eq!(journey.departure(), dep);
/// assert_eq!(journey.arrival(), arr);
///
/// assert!(Journey::new("j2", vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JourneyRecord")]
pub struct Journey {
    #[serde(rename = "type")]
    kind: String,
    id: String,
    legs: Vec<Leg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
}

impl Journey {
    /// Construct a journey from its legs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyJourney` if `legs` is empty.
    pub fn new(id: impl Into<String>, legs: Vec<Leg>) -> Result<Self, DomainError> {
        let id = id.into();
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney { id });
        }
        Ok(Self {
            kind: journey_kind(),
            id,
            legs,
            price: None,
        })
    }

    /// Provider identifier of this journey.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All legs, in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// The first leg.
    pub fn first_leg(&self) -> &Leg {
        // Non-empty by construction
        &self.legs[0]
    }

    /// Departure of the first leg.
    pub fn departure(&self) -> Instant {
        self.first_leg().departure
    }

    /// Arrival of the first leg.
    pub fn arrival(&self) -> Instant {
        self.first_leg().arrival
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }
}

impl TryFrom<JourneyRecord> for Journey {
    type Error = DomainError;

    fn try_from(record: JourneyRecord) -> Result<Self, Self::Error> {
        let mut journey = Journey::new(record.id, record.legs)?;
        journey.kind = record.kind;
        journey.price = record.price;
        Ok(journey)
    }
}

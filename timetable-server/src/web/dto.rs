//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{InstantError, parse_instant};
use crate::resolve::{JourneyQuery, Mode};

/// Query parameters for `GET /stations`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationsParams {
    /// Optional name to search for
    pub station_to_search: Option<String>,
}

/// Query parameters for `GET /journeys`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneysParams {
    /// Origin station id
    pub origin_id: Option<String>,

    /// Destination station id
    pub destination_id: Option<String>,

    /// Requested departure instant
    pub departure: Option<String>,

    /// Requested arrival instant
    pub arrival: Option<String>,

    /// Resolve the next journey instead of listing all
    pub next: Option<String>,

    /// With `next`, also return every later journey
    pub after_next: Option<String>,
}

/// A request parameter that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// Required parameter absent or blank
    #[error("missing required parameter {0}")]
    Missing(&'static str),

    /// Instant parameter could not be parsed
    #[error("parameter {name}: {source}")]
    Instant {
        name: &'static str,
        source: InstantError,
    },

    /// Flag parameter is not a boolean
    #[error("parameter {name}: expected a boolean, got {value:?}")]
    Flag { name: &'static str, value: String },
}

fn required(name: &'static str, value: Option<String>) -> Result<String, ParamError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ParamError::Missing(name))
}

fn instant(
    name: &'static str,
    value: Option<&str>,
) -> Result<Option<crate::domain::Instant>, ParamError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_instant(v).map_err(|source| ParamError::Instant { name, source }))
        .transpose()
}

/// Parse a boolean flag.
///
/// Absent and empty values are false, as are `false`, `0`, `no` and `off`;
/// `true`, `1`, `yes` and `on` are true. Case-insensitive.
pub fn parse_flag(name: &'static str, value: Option<&str>) -> Result<bool, ParamError> {
    let Some(value) = value else {
        return Ok(false);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Ok(false),
        "true" | "1" | "yes" | "on" => Ok(true),
        _ => Err(ParamError::Flag {
            name,
            value: value.to_string(),
        }),
    }
}

impl JourneysParams {
    /// Validate into a journey query.
    pub fn into_query(self) -> Result<JourneyQuery, ParamError> {
        let origin = required("originId", self.origin_id)?;
        let destination = required("destinationId", self.destination_id)?;
        let departure = instant("departure", self.departure.as_deref())?;
        let arrival = instant("arrival", self.arrival.as_deref())?;
        let next = parse_flag("next", self.next.as_deref())?;
        let after_next = parse_flag("afterNext", self.after_next.as_deref())?;

        Ok(JourneyQuery {
            origin,
            destination,
            departure,
            arrival,
            mode: Mode::from_flags(next, after_next),
        })
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> JourneysParams {
        JourneysParams {
            origin_id: Some("94-2006".into()),
            destination_id: Some("94-1008".into()),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_query() {
        let query = params().into_query().unwrap();
        assert_eq!(query.origin, "94-2006");
        assert_eq!(query.destination, "94-1008");
        assert_eq!(query.departure, None);
        assert_eq!(query.arrival, None);
        assert_eq!(query.mode, Mode::All);
    }

    #[test]
    fn full_query() {
        let query = JourneysParams {
            departure: Some("2024-03-15T08:30:00Z".into()),
            arrival: Some("2024-03-15T12:00:00Z".into()),
            next: Some("true".into()),
            after_next: Some("1".into()),
            ..params()
        }
        .into_query()
        .unwrap();

        assert_eq!(
            query.departure.unwrap().to_rfc3339(),
            "2024-03-15T08:30:00+00:00"
        );
        assert!(query.arrival.is_some());
        assert_eq!(query.mode, Mode::FromNext);
    }

    #[test]
    fn missing_ids_rejected() {
        let err = JourneysParams {
            origin_id: None,
            ..params()
        }
        .into_query()
        .unwrap_err();
        assert_eq!(err, ParamError::Missing("originId"));

        let err = JourneysParams {
            destination_id: Some("  ".into()),
            ..params()
        }
        .into_query()
        .unwrap_err();
        assert_eq!(err, ParamError::Missing("destinationId"));
    }

    #[test]
    fn malformed_instant_rejected() {
        let err = JourneysParams {
            arrival: Some("noon".into()),
            ..params()
        }
        .into_query()
        .unwrap_err();
        assert!(matches!(err, ParamError::Instant { name: "arrival", .. }));
        assert!(err.to_string().starts_with("parameter arrival: invalid instant"));
    }

    #[test]
    fn blank_instant_is_absent() {
        let query = JourneysParams {
            departure: Some(String::new()),
            ..params()
        }
        .into_query()
        .unwrap();
        assert!(query.departure.is_none());
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("next", None), Ok(false));
        assert_eq!(parse_flag("next", Some("")), Ok(false));
        assert_eq!(parse_flag("next", Some("FALSE")), Ok(false));
        assert_eq!(parse_flag("next", Some("0")), Ok(false));
        assert_eq!(parse_flag("next", Some("True")), Ok(true));
        assert_eq!(parse_flag("next", Some("yes")), Ok(true));
        assert_eq!(
            parse_flag("next", Some("maybe")),
            Err(ParamError::Flag {
                name: "next",
                value: "maybe".into()
            })
        );
    }

    #[test]
    fn after_next_alone_lists_everything() {
        let query = JourneysParams {
            after_next: Some("true".into()),
            ..params()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.mode, Mode::All);
    }
}

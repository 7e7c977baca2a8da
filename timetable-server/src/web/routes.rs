//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::domain;
use crate::resolve::{JourneyAnswer, answer_query};
use crate::stations::{StationAnswer, lookup_stations};
use crate::timetable::{TimetableError, TimetableProvider};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<P: TimetableProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(stations::<P>))
        .route("/journeys", get(journeys::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List stations, or search them by name.
async fn stations<P: TimetableProvider>(
    State(state): State<AppState<P>>,
    Query(params): Query<StationsParams>,
) -> Result<Response, AppError> {
    let answer = lookup_stations(
        state.timetable.as_ref(),
        params.station_to_search.as_deref(),
        &state.search,
    )
    .await?;

    Ok(match answer {
        StationAnswer::All(stations) => Json(stations).into_response(),
        StationAnswer::Matches(matches) => Json(matches).into_response(),
    })
}

/// List journeys between two stations, or resolve the next one(s).
async fn journeys<P: TimetableProvider>(
    State(state): State<AppState<P>>,
    Query(params): Query<JourneysParams>,
) -> Result<Response, AppError> {
    let query = params.into_query()?;
    let answer = answer_query(state.timetable.as_ref(), &query, domain::now()).await?;

    Ok(match answer {
        JourneyAnswer::All(journeys) | JourneyAnswer::FromNext(journeys) => {
            Json(journeys).into_response()
        }
        JourneyAnswer::Next(Some(journey)) => Json(journey).into_response(),
        JourneyAnswer::Next(None) => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
}

impl From<ParamError> for AppError {
    fn from(e: ParamError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<TimetableError> for AppError {
    fn from(e: TimetableError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                tracing::warn!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Upstream { message } => {
                tracing::error!(%message, "timetable provider failed");
                (StatusCode::BAD_GATEWAY, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Instant, Journey, Leg, Station};
    use crate::stations::SearchOptions;
    use crate::timetable::StaticTimetable;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{DateTime, Duration, Local, TimeZone};
    use serde_json::Value;
    use tower::ServiceExt;

    fn local(day: u32, hour: u32) -> Instant {
        Local
            .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
            .unwrap()
            .fixed_offset()
    }

    fn journey(departure: Instant) -> Journey {
        let leg = Leg::new(
            Station::new("LIS", "Lisboa"),
            Station::new("OPO", "Porto"),
            departure,
            departure + Duration::hours(3),
        );
        Journey::new(departure.to_rfc3339(), vec![leg]).unwrap()
    }

    fn app() -> Router {
        let timetable = StaticTimetable::new(
            vec![
                Station::new("LIS", "Lisboa"),
                Station::new("OPO", "Porto"),
                Station::new("COI", "Coimbra"),
            ],
            vec![
                journey(local(15, 8)),
                journey(local(15, 20)),
                journey(local(16, 8)),
                journey(local(16, 20)),
            ],
        );
        create_router(AppState::new(timetable, SearchOptions::default()))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// First-leg departure of a serialized journey.
    fn departure(journey: &Value) -> Instant {
        DateTime::parse_from_rfc3339(journey["legs"][0]["departure"].as_str().unwrap()).unwrap()
    }

    fn departures(body: &Value) -> Vec<Instant> {
        body.as_array().unwrap().iter().map(departure).collect()
    }

    #[tokio::test]
    async fn health_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn stations_lists_all() {
        let (status, body) = get("/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["name"], "Lisboa");
    }

    #[tokio::test]
    async fn stations_search() {
        let (status, body) = get("/stations?stationToSearch=Lisboa").await;
        assert_eq!(status, StatusCode::OK);
        let matches = body.as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["item"]["id"], "LIS");
        assert_eq!(matches[0]["refIndex"], 0);
    }

    #[tokio::test]
    async fn journeys_raw_list() {
        let (status, body) =
            get("/journeys?originId=LIS&destinationId=OPO&departure=2024-03-15T21:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn journeys_next() {
        let (status, body) =
            get("/journeys?originId=LIS&destinationId=OPO&departure=2024-03-15T21:00&next=true")
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(departure(&body), local(16, 8));
    }

    #[tokio::test]
    async fn journeys_after_next() {
        let (status, body) = get(
            "/journeys?originId=LIS&destinationId=OPO&departure=2024-03-15T21:00&next=true&afterNext=true",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(departures(&body), [local(16, 8), local(16, 20)]);
    }

    #[tokio::test]
    async fn journeys_next_none_is_no_content() {
        let (status, body) =
            get("/journeys?originId=LIS&destinationId=OPO&departure=2024-03-16T21:00&next=true")
                .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn journeys_after_next_none_is_empty_list() {
        let (status, body) = get(
            "/journeys?originId=LIS&destinationId=OPO&departure=2024-03-16T21:00&next=1&afterNext=1",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn journeys_bad_instant() {
        let (status, body) =
            get("/journeys?originId=LIS&destinationId=OPO&departure=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("departure"));
    }

    #[tokio::test]
    async fn journeys_missing_origin() {
        let (status, body) = get("/journeys?destinationId=OPO").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing required parameter originId");
    }

    /// Provider that always fails.
    struct DownProvider;

    impl TimetableProvider for DownProvider {
        async fn stations(&self) -> Result<Vec<Station>, TimetableError> {
            Err(TimetableError::Api {
                status: 503,
                message: "maintenance".into(),
            })
        }

        async fn journeys(
            &self,
            _origin: &str,
            _destination: &str,
            _when: Instant,
        ) -> Result<Vec<Journey>, TimetableError> {
            Err(TimetableError::RateLimited)
        }
    }

    #[tokio::test]
    async fn provider_failure_is_bad_gateway() {
        let app = create_router(AppState::new(DownProvider, SearchOptions::default()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/stations").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/journeys?originId=LIS&destinationId=OPO")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

//! Journey query dispatch.

use crate::domain::{Instant, Journey};
use crate::timetable::{TimetableError, TimetableProvider};

use super::fetch::fetch_two_days;
use super::nearest::{Resolution, Target};

/// What a journey query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every journey over both days, unfiltered.
    #[default]
    All,
    /// The single nearest qualifying journey.
    Next,
    /// The nearest qualifying journey and all later ones.
    FromNext,
}

impl Mode {
    /// Mode for the `next` / `afterNext` request flags.
    ///
    /// `after_next` only has an effect together with `next`.
    pub fn from_flags(next: bool, after_next: bool) -> Self {
        match (next, after_next) {
            (false, _) => Mode::All,
            (true, false) => Mode::Next,
            (true, true) => Mode::FromNext,
        }
    }
}

/// A validated journey query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyQuery {
    pub origin: String,
    pub destination: String,
    pub departure: Option<Instant>,
    pub arrival: Option<Instant>,
    pub mode: Mode,
}

impl JourneyQuery {
    /// Query for all journeys between two stations around now.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure: None,
            arrival: None,
            mode: Mode::All,
        }
    }

    pub fn departing(mut self, at: Instant) -> Self {
        self.departure = Some(at);
        self
    }

    pub fn arriving(mut self, at: Instant) -> Self {
        self.arrival = Some(at);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// The day the two-day window starts on: departure, else arrival, else now.
    pub fn reference(&self, now: Instant) -> Instant {
        self.departure.or(self.arrival).unwrap_or(now)
    }

    /// The resolution target; an absent departure means "leaving now".
    pub fn target(&self, now: Instant) -> Target {
        Target {
            departure: Some(self.departure.unwrap_or(now)),
            arrival: self.arrival,
        }
    }
}

/// The answer to a journey query, shaped by its mode.
#[derive(Debug, Clone, PartialEq)]
pub enum JourneyAnswer {
    /// Raw merged candidate list
    All(Vec<Journey>),
    /// Nearest qualifying journey, if any
    Next(Option<Journey>),
    /// Nearest qualifying journey onwards
    FromNext(Vec<Journey>),
}

/// Fetch the two-day candidate list and answer `query` from it.
pub async fn answer_query<P: TimetableProvider>(
    provider: &P,
    query: &JourneyQuery,
    now: Instant,
) -> Result<JourneyAnswer, TimetableError> {
    let candidates = fetch_two_days(
        provider,
        &query.origin,
        &query.destination,
        query.reference(now),
    )
    .await?;

    let answer = match query.mode {
        Mode::All => JourneyAnswer::All(candidates),
        Mode::Next => {
            let resolution = Resolution::new(candidates, &query.target(now), now);
            JourneyAnswer::Next(resolution.into_next())
        }
        Mode::FromNext => {
            let resolution = Resolution::new(candidates, &query.target(now), now);
            JourneyAnswer::FromNext(resolution.into_tail())
        }
    };

    Ok(answer)
}

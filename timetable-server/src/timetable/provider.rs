//! The timetable provider abstraction.

use std::future::Future;

use crate::domain::{Instant, Journey, Station};

use super::error::TimetableError;

/// Source of station and journey data.
///
/// This abstraction lets the web layer and the journey fetcher run against
/// the live HTTP provider or against fixture data.
pub trait TimetableProvider: Send + Sync {
    /// Fetch the full station list.
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, TimetableError>> + Send;

    /// Fetch journeys from `origin` to `destination` for the day of `when`.
    ///
    /// Journeys are returned in provider order, which is expected to be
    /// chronological.
    fn journeys(
        &self,
        origin: &str,
        destination: &str,
        when: Instant,
    ) -> impl Future<Output = Result<Vec<Journey>, TimetableError>> + Send;
}

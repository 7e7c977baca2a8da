//! Timetable provider clients.
//!
//! The provider is the source of all station and journey data. Nothing is
//! cached: every call goes to the provider.
//!
//! - `HttpTimetable` talks to a live REST timetable service
//! - `StaticTimetable` serves fixture data for development and tests

mod client;
mod error;
mod fixtures;
mod provider;

pub use client::{HttpTimetable, TimetableConfig};
pub use error::TimetableError;
pub use fixtures::{JOURNEYS_FILE, STATIONS_FILE, StaticTimetable};
pub use provider::TimetableProvider;

//! Station lookup.
//!
//! Returns the provider's full station list, or the stations whose names
//! match a search term, ranked by similarity.

mod search;

pub use search::{
    DEFAULT_DISTANCE, DEFAULT_LOCATION, DEFAULT_THRESHOLD, SearchMatch, SearchOptions,
    StationIndex,
};

use crate::domain::Station;
use crate::timetable::{TimetableError, TimetableProvider};

/// The answer to a station lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum StationAnswer {
    /// The full station list, as returned by the provider
    All(Vec<Station>),
    /// Stations matching a search term, best first
    Matches(Vec<SearchMatch<Station>>),
}

/// Fetch the station list and, if `term` is given, search it.
///
/// A term that is empty or only whitespace is treated as no term and
/// answers with the full station list.
pub async fn lookup_stations<P: TimetableProvider>(
    provider: &P,
    term: Option<&str>,
    options: &SearchOptions,
) -> Result<StationAnswer, TimetableError> {
    let stations = provider.stations().await?;

    // Whitespace-only terms would match nothing useful; list everything.
    match term.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(StationAnswer::All(stations)),
        Some(term) => {
            let index = StationIndex::new(stations, options.clone());
            Ok(StationAnswer::Matches(index.search(term)))
        }
    }
}

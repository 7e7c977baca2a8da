//! Application state for the web layer.

use std::sync::Arc;

use crate::stations::SearchOptions;

/// Shared application state.
///
/// Holds the timetable provider and station search configuration. Nothing
/// request-specific lives here.
pub struct AppState<P> {
    /// Timetable provider
    pub timetable: Arc<P>,

    /// Station search configuration
    pub search: Arc<SearchOptions>,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(timetable: P, search: SearchOptions) -> Self {
        Self {
            timetable: Arc::new(timetable),
            search: Arc::new(search),
        }
    }
}

// Manual impl: cloning the state must not require `P: Clone`.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            timetable: Arc::clone(&self.timetable),
            search: Arc::clone(&self.search),
        }
    }
}

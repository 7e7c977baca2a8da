//! Nearest-journey resolution.
//!
//! Answers "which train should I take?" for a requested departure or
//! arrival time. Candidates are the provider's journeys for the requested
//! day and the day after, merged in provider order. The resolver picks the
//! journey closest to the requested time on the matching axis, never one
//! that leaves (or arrives) before it.

mod axis;
mod fetch;
mod nearest;
mod query;

pub use axis::Axis;
pub use fetch::{day_after, fetch_two_days};
pub use nearest::{Resolution, Target, nearest_index, resolve_index};
pub use query::{JourneyAnswer, JourneyQuery, Mode, answer_query};

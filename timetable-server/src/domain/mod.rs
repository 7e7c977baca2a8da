//! Domain types for the timetable server.
//!
//! These mirror the records returned by the timetable provider. Types with
//! invariants enforce them at construction (and deserialization) time, so
//! code that receives them can trust their validity.

mod error;
mod journey;
mod leg;
mod station;
mod time;

pub use error::DomainError;
pub use journey::{Fare, Journey, Price};
pub use leg::{Leg, Line, Operator, Stopover};
pub use station::{Location, Station};
pub use time::{Instant, InstantError, now, parse_instant};

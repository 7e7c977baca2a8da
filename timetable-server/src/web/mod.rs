//! Web layer for the timetable server.
//!
//! Provides HTTP endpoints for station lookup and journey resolution.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

//! Rail timetable lookup server.
//!
//! Serves station lookups and journey queries over HTTP, backed by an
//! external timetable provider. Journey queries can ask for the next train
//! at or after a departure or arrival time, drawing on the requested day
//! and the day after.

pub mod config;
pub mod domain;
pub mod resolve;
pub mod stations;
pub mod timetable;
pub mod web;

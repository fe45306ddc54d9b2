//! Weather Archive API
//!
//! Validates coordinate/date-range queries, fetches historical weather
//! data from Open-Meteo and persists each result as one JSON object in
//! cloud blob storage, with endpoints to list and retrieve stored
//! objects.

pub mod config;
pub mod error;
pub mod handlers;
pub mod open_meteo;
pub mod state;
pub mod validation;

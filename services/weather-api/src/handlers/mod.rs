//! HTTP request handlers for the weather archive API.

pub mod health;
pub mod weather;

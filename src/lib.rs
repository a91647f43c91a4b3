//! QuickCare: client library for the clinic management API.
//!
//! Shared by the `quickcare` console binary and the integration tests in `tests/`.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod gateway;
pub mod middleware;
pub mod models;
pub mod session;
pub mod views;

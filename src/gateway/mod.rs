//! Authenticated request gateway: the only path from the console to the backend.

pub mod client;
pub mod request;

pub use client::ApiGateway;
pub use request::{ApiResponse, AuthMode, PendingRequest};

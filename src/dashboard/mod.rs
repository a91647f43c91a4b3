//! Data behind the two role dashboards. Rendering is left to the caller.

pub mod admin;
pub mod doctor;

pub use admin::AdminDashboard;
pub use doctor::DoctorDashboard;

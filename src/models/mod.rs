pub mod catalog;
pub mod doctor;
pub mod patient;
pub mod token;
pub mod user;

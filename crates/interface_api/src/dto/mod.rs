//! Request and response bodies

pub mod catalog;
pub mod patients;
pub mod encounters;
pub mod claims;
pub mod admin;

//! HTTP route handlers.

pub mod dashboard;
pub mod fleet;
pub mod health;

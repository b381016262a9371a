//! FleetPulse Server: the fleet service and its HTTP hosting adapter.
//!
//! `FleetService` owns the roster, the simulator and the trained opportunity
//! model; everything HTTP-specific is a thin layer over it.
//!
//! # Modules
//!
//! - [`config`]: TOML configuration with per-section defaults
//! - [`service`]: `FleetService`, one poll = one tick + one prediction
//! - [`report`]: dashboard payload assembly and display formatting
//! - [`app`]: Axum router, middleware and `serve`
//! - [`routes`]: `/`, `/api/fleet-data`, `/health`
//! - [`error`]: handler errors mapped to JSON responses

pub mod app;
pub mod config;
pub mod error;
pub mod report;
pub mod routes;
pub mod service;
pub mod state;

pub use app::{create_app, serve};
pub use config::{ConfigError, FleetPulseConfig, ServerConfig};
pub use error::AppError;
pub use report::FleetReport;
pub use service::FleetService;
pub use state::ServerState;

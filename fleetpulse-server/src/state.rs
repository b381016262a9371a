//! Shared server state.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::service::FleetService;

/// Handler state: the one fleet service behind one lock.
///
/// Each poll holds the lock across tick, predict and snapshot, so responses
/// never interleave two ticks.
#[derive(Clone)]
pub struct ServerState {
    pub service: Arc<Mutex<FleetService>>,
    started: Instant,
}

impl ServerState {
    pub fn new(service: FleetService) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            started: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

//! Liveness probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Ticks served so far.
    pub tick: u64,
    pub trucks: usize,
    pub model_trained: bool,
    pub uptime_secs: u64,
}

/// `GET /health`
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let service = state.service.lock().await;
    Json(HealthResponse {
        status: "healthy",
        tick: service.tick_count(),
        trucks: service.fleet().len(),
        model_trained: service.training_summary().is_some(),
        uptime_secs: state.uptime_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            tick: 12,
            trucks: 5,
            model_trained: true,
            uptime_secs: 3,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"tick\":12"));
        assert!(json.contains("\"trucks\":5"));
    }
}

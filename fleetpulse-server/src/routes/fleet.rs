//! Fleet feed endpoint.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::report::FleetReport;
use crate::state::ServerState;

/// `GET /api/fleet-data`
///
/// Advances the fleet one tick and scores the configured scenario.
pub async fn fleet_data(State(state): State<ServerState>) -> AppResult<Json<FleetReport>> {
    let mut service = state.service.lock().await;
    let report = service.poll()?;
    Ok(Json(report))
}

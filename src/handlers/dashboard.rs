use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::dashboard::{load_dashboard, DashboardView};
use crate::models::api::SuccessResponse;
use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::info;

/// Widgets for the signed-in user's role
///
/// GET /dashboard
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardView>, DashboardError> {
    Ok(Json(load_dashboard(&state.repo).await?))
}

/// Drop every cached entity; the next read of each goes to the backend
///
/// POST /refresh
pub async fn refresh_handler(State(state): State<Arc<AppState>>) -> Json<SuccessResponse> {
    state.repo.invalidate_everything();
    info!("Caches cleared on request");

    Json(SuccessResponse {
        success: true,
        message: "Datos actualizados".to_string(),
    })
}

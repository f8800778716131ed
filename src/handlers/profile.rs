use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::models::api::SuccessResponse;
use crate::models::user::{PasswordChangeForm, ProfileForm, User};
use crate::validation::{validate_password_change, validate_profile};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use std::sync::Arc;

/// GET /me
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<User>, DashboardError> {
    Ok(Json(state.repo.profile().await?))
}

/// PUT /me
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Json<ProfileForm>, JsonRejection>,
) -> Result<Json<User>, DashboardError> {
    let Json(form) = form?;
    let form = validate_profile(&form)?;

    Ok(Json(state.repo.update_profile(&form).await?))
}

/// POST /me/password
pub async fn change_password_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Json<PasswordChangeForm>, JsonRejection>,
) -> Result<Json<SuccessResponse>, DashboardError> {
    let Json(form) = form?;
    validate_password_change(&form)?;
    state.repo.change_password(&form).await?;

    Ok(Json(SuccessResponse {
        success: true,
        message: "Contraseña actualizada".to_string(),
    }))
}

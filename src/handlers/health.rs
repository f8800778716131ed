use crate::api::credentials::StaticCredentials;
use crate::core::state::AppState;
use crate::stores::repository::CacheStats;
use crate::utils::time::current_timestamp;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: i64,
    /// False until a non-blank token and a user id are configured
    pub credentials: bool,
    pub cached: CachedKeys,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CachedKeys {
    pub courses: usize,
    pub sections: usize,
    pub schedules: usize,
    pub users: usize,
}

impl From<CacheStats> for CachedKeys {
    fn from(stats: CacheStats) -> Self {
        Self {
            courses: stats.courses,
            sections: stats.sections,
            schedules: stats.schedules,
            users: stats.users,
        }
    }
}

/// Liveness plus a view of what is already cached. Never calls the backend.
///
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let credentials = StaticCredentials::from_config(&state.config.backend);

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: current_timestamp(),
            credentials: credentials.is_complete(),
            cached: state.repo.cache_stats().into(),
        }),
    )
}

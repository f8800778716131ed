use crate::core::error::DashboardError;
use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};
use tracing::debug;

pub async fn fallback_handler(uri: Uri) -> Response {
    debug!(path = %uri.path(), "No route matched");

    DashboardError::NotFound(format!("no route for {}", uri.path())).into_response()
}

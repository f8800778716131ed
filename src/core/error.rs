// Centralized error handling for the dashboard

use crate::models::api::ErrorResponse;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors produced while talking to the university backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Token or user id is missing; no request was sent
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Transport succeeded but the backend envelope reported failure
    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response from backend: {0}")]
    Decode(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// True if the same request may succeed when tried again
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Cancelled => true,
            ApiError::Http { status, .. } => *status >= 500,
            ApiError::MissingCredentials(_) | ApiError::Rejected(_) => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Per-field validation messages, ordered by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field; the first message per field wins
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }

    /// Ok when no field failed
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        write!(f, "Invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors returned by the dashboard's own HTTP handlers
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Internal(err.to_string())
    }
}

impl From<QueryRejection> for DashboardError {
    fn from(rejection: QueryRejection) -> Self {
        DashboardError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for DashboardError {
    fn from(rejection: PathRejection) -> Self {
        DashboardError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for DashboardError {
    fn from(rejection: JsonRejection) -> Self {
        DashboardError::BadRequest(rejection.body_text())
    }
}

impl DashboardError {
    /// Status code and JSON body reported for this error
    pub fn to_body(&self) -> (StatusCode, ErrorResponse) {
        let retryable = matches!(self, DashboardError::Api(e) if e.is_retryable());

        let (status, fields) = match self {
            DashboardError::Api(ApiError::MissingCredentials(_)) => (StatusCode::UNAUTHORIZED, None),
            DashboardError::Api(e) if e.is_not_found() => (StatusCode::NOT_FOUND, None),
            DashboardError::Api(ApiError::Rejected(_)) => (StatusCode::UNPROCESSABLE_ENTITY, None),
            DashboardError::Api(ApiError::Cancelled) => (StatusCode::SERVICE_UNAVAILABLE, None),
            DashboardError::Api(_) => (StatusCode::BAD_GATEWAY, None),
            DashboardError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(errors.clone().into_fields()))
            }
            DashboardError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            DashboardError::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            DashboardError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        (
            status,
            ErrorResponse {
                success: false,
                error: self.to_string(),
                fields,
                retryable,
            },
        )
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_body();
        (status, Json(body)).into_response()
    }
}

use crate::models::schedule::Weekday;
use crate::models::user::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query string accepted by every table endpoint.
///
/// Categorical filters that a table does not know are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TableParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub credits: Option<String>,
}

impl TableParams {
    /// Non-empty facet values keyed by facet name, canonicalized with
    /// `canonical_facet`
    pub fn facets(&self) -> BTreeMap<String, String> {
        [
            ("day", &self.day),
            ("block", &self.block),
            ("period", &self.period),
            ("role", &self.role),
            ("status", &self.status),
            ("credits", &self.credits),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name.to_string(), canonical_facet(name, v)))
        })
        .collect()
    }
}

/// Day and role names mapped to the label rows carry, so "miercoles"
/// selects "Miércoles" and "Student" selects "Estudiante". Other facets and
/// unrecognized names pass through unchanged.
pub fn canonical_facet(name: &str, value: &str) -> String {
    let canonical = match name {
        "day" => Weekday::from_label(value).map(Weekday::label),
        "role" => Role::from_label(value).map(Role::label),
        _ => None,
    };
    canonical.unwrap_or(value).to_string()
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
    pub retryable: bool,
}

use crate::api::credentials::{require, CredentialSource};
use crate::core::error::ApiError;
use crate::models::course::{Course, CourseForm};
use crate::models::schedule::ScheduleSlot;
use crate::models::section::Section;
use crate::models::user::{PasswordChangeForm, PasswordChangeReply, ProfileForm, User};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Operations the dashboard needs from the university backend
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;
    async fn get_course(&self, id: u32) -> Result<Course, ApiError>;
    async fn create_course(&self, form: &CourseForm) -> Result<Course, ApiError>;
    async fn update_course(&self, id: u32, form: &CourseForm) -> Result<(), ApiError>;
    async fn delete_course(&self, id: u32) -> Result<(), ApiError>;
    async fn list_sections(&self) -> Result<Vec<Section>, ApiError>;
    async fn list_schedules(&self) -> Result<Vec<ScheduleSlot>, ApiError>;
    async fn get_user(&self, id: u32) -> Result<User, ApiError>;
    async fn update_user(&self, id: u32, form: &ProfileForm) -> Result<(), ApiError>;
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
    async fn change_password(&self, id: u32, form: &PasswordChangeForm) -> Result<(), ApiError>;
    /// Id of the signed-in user, if known
    fn current_user_id(&self) -> Result<u32, ApiError>;
}

/// Wire body of the password endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChangeBody<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Pick the most specific human message out of an error body.
///
/// Looks at `message`, then `mensaje`, then `error`, and falls back to
/// the status reason phrase.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "mensaje", "error"].iter().find_map(|key| {
                value
                    .get(key)
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
        });

    from_body.unwrap_or_else(|| {
        format!(
            "Backend returned {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("error")
        )
    })
}

/// HTTP client for the university REST backend
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build an authorized request; fails without touching the network
    /// when credentials are missing
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let creds = require(self.credentials.as_ref())?;
        debug!(method = %method, path = path, "Backend request");
        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(creds.token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            message: extract_error_message(status, &body),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get_json("/cursos").await
    }

    async fn get_course(&self, id: u32) -> Result<Course, ApiError> {
        self.get_json(&format!("/cursos/{}", id)).await
    }

    async fn create_course(&self, form: &CourseForm) -> Result<Course, ApiError> {
        let request = self.request(Method::POST, "/cursos")?.json(form);
        self.send(request)
            .await?
            .json::<Course>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update_course(&self, id: u32, form: &CourseForm) -> Result<(), ApiError> {
        let request = self
            .request(Method::PUT, &format!("/cursos/{}", id))?
            .json(form);
        self.send(request).await?;
        Ok(())
    }

    async fn delete_course(&self, id: u32) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/cursos/{}", id))?)
            .await?;
        Ok(())
    }

    async fn list_sections(&self) -> Result<Vec<Section>, ApiError> {
        self.get_json("/secciones").await
    }

    async fn list_schedules(&self) -> Result<Vec<ScheduleSlot>, ApiError> {
        self.get_json("/horarios").await
    }

    async fn get_user(&self, id: u32) -> Result<User, ApiError> {
        self.get_json(&format!("/usuarios/{}", id)).await
    }

    async fn update_user(&self, id: u32, form: &ProfileForm) -> Result<(), ApiError> {
        let request = self
            .request(Method::PUT, &format!("/usuarios/{}", id))?
            .json(form);
        self.send(request).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/usuarios").await
    }

    async fn change_password(&self, id: u32, form: &PasswordChangeForm) -> Result<(), ApiError> {
        let body = PasswordChangeBody {
            current_password: &form.current_password,
            new_password: &form.new_password,
        };
        let request = self
            .request(Method::PUT, &format!("/usuarios/{}/password", id))?
            .json(&body);

        let reply = self
            .send(request)
            .await?
            .json::<PasswordChangeReply>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if reply.is_success() {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                reply
                    .mensaje
                    .unwrap_or_else(|| "No se pudo cambiar la contraseña".to_string()),
            ))
        }
    }

    fn current_user_id(&self) -> Result<u32, ApiError> {
        require(self.credentials.as_ref()).map(|c| c.user_id)
    }
}

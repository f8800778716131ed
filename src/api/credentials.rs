use crate::core::config::BackendConfig;
use crate::core::error::ApiError;

/// Source of the signed-in user's token and id
pub trait CredentialSource: Send + Sync {
    fn token(&self) -> Option<String>;
    fn user_id(&self) -> Option<u32>;
}

/// Both credentials, checked present
#[derive(Clone, Debug)]
pub struct Credentials {
    pub token: String,
    pub user_id: u32,
}

/// Fails before any request is sent when either credential is absent
pub fn require(source: &dyn CredentialSource) -> Result<Credentials, ApiError> {
    let token = source
        .token()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::MissingCredentials("no session token".to_string()))?;
    let user_id = source
        .user_id()
        .ok_or_else(|| ApiError::MissingCredentials("no user id".to_string()))?;

    Ok(Credentials { token, user_id })
}

/// Credentials fixed at startup from configuration
#[derive(Clone, Debug, Default)]
pub struct StaticCredentials {
    token: Option<String>,
    user_id: Option<u32>,
}

impl StaticCredentials {
    pub fn new(token: Option<String>, user_id: Option<u32>) -> Self {
        Self { token, user_id }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.token.clone(), config.user_id)
    }

    /// Same check as `require`: a blank token counts as missing
    pub fn is_complete(&self) -> bool {
        require(self).is_ok()
    }
}

impl CredentialSource for StaticCredentials {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn user_id(&self) -> Option<u32> {
        self.user_id
    }
}

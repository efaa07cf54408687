use serde::{Deserialize, Serialize};

use crate::enums::social_provider::SocialProvider;

/// Where the auth service sends the user after a successful sign-in
pub const DEFAULT_CALLBACK_URL: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialSignInRequest {
    pub provider: SocialProvider,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSignInRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

/// Response of `sign-in/social`. `url` is the provider's authorization page
/// when the flow continues in the browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialSignInData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub redirect: bool,
}

/// Response of the email sign-in / sign-up endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailAuthData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Response of `get-session`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub user: SessionUser,
    #[serde(default)]
    pub session: Option<SessionInfo>,
}

/// Error body returned by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

/// `{ data, error }` envelope every auth client call resolves with.
/// Exactly one side is expected to be set, but callers check `error` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse<T> {
    pub data: Option<T>,
    pub error: Option<AuthErrorBody>,
}

impl<T> AuthResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Successful call that carried no payload (e.g. `get-session` returning `null`)
    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(AuthErrorBody {
                message: message.into(),
                code: None,
                status: None,
            }),
        }
    }
}

use async_trait::async_trait;
use contracts::system::auth::{
    AuthErrorBody, AuthResponse, EmailAuthData, EmailSignInRequest, EmailSignUpRequest, SessionData,
    SocialSignInData, SocialSignInRequest,
};
use serde::de::DeserializeOwned;

/// The call never produced an `{ data, error }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// External authentication service.
///
/// Service-level failures (bad password, unknown provider) come back as
/// `Ok` with `error` set; `Err` is reserved for requests that never got a
/// usable answer.
#[async_trait(?Send)]
pub trait AuthClient {
    async fn get_session(&self) -> Result<AuthResponse<SessionData>, ClientError>;

    async fn sign_in_social(
        &self,
        request: SocialSignInRequest,
    ) -> Result<AuthResponse<SocialSignInData>, ClientError>;

    async fn sign_in_email(
        &self,
        request: EmailSignInRequest,
    ) -> Result<AuthResponse<EmailAuthData>, ClientError>;

    async fn sign_up_email(
        &self,
        request: EmailSignUpRequest,
    ) -> Result<AuthResponse<EmailAuthData>, ClientError>;
}

/// Turns a raw HTTP answer from the auth service into the `{ data, error }`
/// envelope. Shared by the browser and native HTTP clients.
///
/// A 2xx with an empty or `null` body is a successful call without data
/// (`get-session` for an anonymous visitor). Non-2xx bodies are read as
/// `{ message, code }`, falling back to the status text.
pub fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<AuthResponse<T>, ClientError> {
    let body = body.trim();

    if (200..300).contains(&status) {
        if body.is_empty() || body == "null" {
            return Ok(AuthResponse::empty());
        }
        return serde_json::from_str::<T>(body)
            .map(AuthResponse::ok)
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let mut error = serde_json::from_str::<AuthErrorBody>(body).unwrap_or_else(|_| {
        let message = if status_text.is_empty() {
            format!("Request failed with status {}", status)
        } else {
            status_text.to_string()
        };
        AuthErrorBody {
            message,
            code: None,
            status: None,
        }
    });
    error.status = Some(status);

    Ok(AuthResponse {
        data: None,
        error: Some(error),
    })
}

use app_core::auth::{decode_envelope, AuthClient, ClientError};
use async_trait::async_trait;
use contracts::system::auth::{
    AuthResponse, EmailAuthData, EmailSignInRequest, EmailSignUpRequest, SessionData,
    SocialSignInData, SocialSignInRequest,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::shared::api_utils::api_url;

/// Better Auth endpoints mounted on the page origin.
///
/// The session lives in a cookie, so every request carries credentials.
pub struct HttpAuthClient {
    base: String,
}

impl HttpAuthClient {
    pub fn new() -> Self {
        Self {
            base: api_url("/api/auth"),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<AuthResponse<T>, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = with_credentials(Request::post(&self.endpoint(path)))
            .json(body)
            .map_err(|e| ClientError::Transport(format!("Failed to serialize request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to send request: {}", e)))?;

        read_envelope(response).await
    }
}

impl Default for HttpAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<AuthResponse<T>, ClientError> {
    let status = response.status();
    let status_text = response.status_text();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(format!("Failed to read response: {}", e)))?;
    decode_envelope(status, &status_text, &body)
}

#[async_trait(?Send)]
impl AuthClient for HttpAuthClient {
    async fn get_session(&self) -> Result<AuthResponse<SessionData>, ClientError> {
        let response = with_credentials(Request::get(&self.endpoint("/get-session")))
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to send request: {}", e)))?;
        read_envelope(response).await
    }

    async fn sign_in_social(
        &self,
        request: SocialSignInRequest,
    ) -> Result<AuthResponse<SocialSignInData>, ClientError> {
        log::debug!("social sign-in via {}", request.provider);
        self.post("/sign-in/social", &request).await
    }

    async fn sign_in_email(
        &self,
        request: EmailSignInRequest,
    ) -> Result<AuthResponse<EmailAuthData>, ClientError> {
        self.post("/sign-in/email", &request).await
    }

    async fn sign_up_email(
        &self,
        request: EmailSignUpRequest,
    ) -> Result<AuthResponse<EmailAuthData>, ClientError> {
        self.post("/sign-up/email", &request).await
    }
}

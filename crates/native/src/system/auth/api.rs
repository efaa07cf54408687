use app_core::auth::{decode_envelope, AuthClient, ClientError};
use async_trait::async_trait;
use contracts::system::auth::{
    AuthResponse, EmailAuthData, EmailSignInRequest, EmailSignUpRequest, SessionData,
    SocialSignInData, SocialSignInRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Better Auth over HTTP. The session cookie is kept for the life of the client.
pub struct ReqwestAuthClient {
    http: reqwest::Client,
    base: String,
}

impl ReqwestAuthClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base: format!("{}/api/auth", base_url.trim_end_matches('/')),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<AuthResponse<T>, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to send request: {}", e)))?;
        read_envelope(response).await
    }
}

async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<AuthResponse<T>, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(format!("Failed to read response: {}", e)))?;
    decode_envelope(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        &body,
    )
}

#[async_trait(?Send)]
impl AuthClient for ReqwestAuthClient {
    async fn get_session(&self) -> Result<AuthResponse<SessionData>, ClientError> {
        let url = self.endpoint("/get-session");
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to send request: {}", e)))?;
        read_envelope(response).await
    }

    async fn sign_in_social(
        &self,
        request: SocialSignInRequest,
    ) -> Result<AuthResponse<SocialSignInData>, ClientError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_hang_off_api_auth() {
        let client = ReqwestAuthClient::new("http://localhost:3000/").unwrap();
        assert_eq!(
            client.endpoint("/get-session"),
            "http://localhost:3000/api/auth/get-session"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        // Port 9 (discard) is closed on any sane test host
        let client = ReqwestAuthClient::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(
            client.get_session().await,
            Err(ClientError::Transport(_))
        ));
    }
}

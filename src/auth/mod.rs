//! Authentication repository.
//!
//! Login stores the returned token through the client; logout clears it.

use serde::de::IgnoredAny;
use serde_json::Value;

use crate::api::ApiClient;
use crate::errors::Result;
use crate::models::{LoginRequest, LoginResponse};

#[derive(Clone)]
pub struct AuthRepository {
    client: ApiClient,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Log in and store the token.
    ///
    /// `Ok(None)` means the server answered without a token; treat it as a
    /// failed login. Nothing is stored in that case.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<String>> {
        let response: LoginResponse = self
            .client
            .post("/auth/login/", &LoginRequest { username, password })
            .await?;

        let token = response.into_token();
        match &token {
            Some(token) => {
                self.client.set_auth_token(token).await?;
                tracing::info!(username, "Logged in");
            }
            None => tracing::warn!(username, "Login response carried no token"),
        }

        Ok(token)
    }

    /// Notify the server, then clear the stored token.
    ///
    /// If the request fails the error is returned and the token stays stored.
    pub async fn logout(&self) -> Result<()> {
        let _: IgnoredAny = self.client.post_empty("/auth/logout/").await?;
        self.client.clear_auth_token().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Social login providers, unmapped.
    pub async fn social_link(&self) -> Result<Vec<Value>> {
        self.client.get("/social/links/", &[]).await
    }
}

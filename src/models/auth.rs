//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response. Depending on the backend the token is under `key` or `token`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// First non-empty of `key` and `token`.
    pub fn into_token(self) -> Option<String> {
        self.key
            .filter(|k| !k.is_empty())
            .or(self.token.filter(|t| !t.is_empty()))
    }
}

//! HTTP client wrapper.
//!
//! One configured transport for the whole application. Every outgoing request
//! passes through [`ApiClient::intercept`], which reads the token fresh from the
//! injected [`TokenStore`] and attaches it as `Authorization: Token <value>`.
//! Transport errors are not caught here.

mod cookies;

pub use cookies::cookie_value;

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::db::{TokenStore, AUTH_TOKEN_KEY};
use crate::errors::{ClientError, Result};

/// Cookie the backend stores its CSRF token in.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the CSRF token is echoed back in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

enum Body {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Shared HTTP client. Cloning is cheap and clones share the store and cookies.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cookie_url: Url,
    store: Arc<dyn TokenStore>,
    cookies: Arc<Jar>,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000/v1`).
    pub fn new(base_url: &str, store: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let cookie_url = Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL {:?}: {}", base_url, e)))?;

        let cookies = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(cookies.clone())
            .build()?;

        Ok(Self {
            http,
            base_url,
            cookie_url,
            store,
            cookies,
        })
    }

    /// Client for the configured base URL.
    pub fn from_config(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        Self::new(&config.base_url(), store)
    }

    /// Base URL every request path is joined to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current token: the store first, then the `auth_token` cookie.
    pub async fn get_auth_token(&self) -> Result<Option<String>> {
        let stored = self
            .store
            .get(AUTH_TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty());

        Ok(stored.or_else(|| self.cookie(AUTH_TOKEN_KEY)))
    }

    /// Persist the token used by later requests.
    pub async fn set_auth_token(&self, token: &str) -> Result<()> {
        self.store.set(AUTH_TOKEN_KEY, token).await
    }

    /// Remove the stored token. Cookies are left alone.
    pub async fn clear_auth_token(&self) -> Result<()> {
        self.store.remove(AUTH_TOKEN_KEY).await
    }

    /// Add a `Set-Cookie` style string to the jar for the base URL.
    pub fn add_cookie(&self, cookie: &str) {
        self.cookies.add_cookie_str(cookie, &self.cookie_url);
    }

    /// Value of a cookie the jar would send to the base URL.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let header = self.cookies.cookies(&self.cookie_url)?;
        cookie_value(header.to_str().ok()?, name)
    }

    /// GET with query parameters.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.request(Method::GET, path, query, Body::Empty).await
    }

    /// POST a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        self.request(Method::POST, path, &[], body).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, &[], Body::Empty).await
    }

    /// POST a multipart form.
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        self.request(Method::POST, path, &[], Body::Multipart(form))
            .await
    }

    /// PUT a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        self.request(Method::PUT, path, &[], body).await
    }

    /// PATCH a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        self.request(Method::PATCH, path, &[], body).await
    }

    /// DELETE with a JSON body.
    pub async fn delete<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        self.request(Method::DELETE, path, &[], body).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Body,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(&value),
            Body::Multipart(form) => request.multipart(form),
        };
        let request = self.intercept(request, &method).await?;

        tracing::debug!(%method, %url, "Sending request");
        let response = request.send().await?;

        decode(&method, &url, response).await
    }

    /// Request interceptor. The token is read on every call, never cached.
    async fn intercept(&self, mut request: RequestBuilder, method: &Method) -> Result<RequestBuilder> {
        if let Some(token) = self.get_auth_token().await? {
            request = request.header(AUTHORIZATION, format!("Token {}", token));
        }

        if !method.is_safe() {
            if let Some(csrf) = self.cookie(CSRF_COOKIE) {
                request = request.header(CSRF_HEADER, csrf);
            }
        }

        Ok(request)
    }
}

/// Turn a response into `T`, or into [`ClientError::Status`] for a non-2xx status.
/// An empty body decodes as `null`.
async fn decode<T: DeserializeOwned>(method: &Method, url: &str, response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        tracing::warn!(%method, %url, %status, "Request failed");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        return Err(ClientError::Status { status, body });
    }

    let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
    Ok(serde_json::from_slice(bytes)?)
}

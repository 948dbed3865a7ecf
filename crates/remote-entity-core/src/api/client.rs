//! API client for the REST auth backend.
//!
//! `ApiClient` performs login and signup, attaches the session's bearer token
//! to protected calls, and classifies every failure into an [`ApiError`].

use anyhow::Result;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::{LoginCredentials, Session, SignupCredentials};
use crate::config::Config;
use crate::models::SecureGreeting;
use crate::utils::truncate_string;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

const LOGIN_PATH: &str = "/auth/login";
const SIGNUP_PATH: &str = "/auth/signup";
const SECURE_PATH: &str = "/api/secure";

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";
const SECURE_FAILED: &str = "Failed to fetch secure data";
const REQUEST_FAILED: &str = "Request failed";

/// Longest response body excerpt written to the log
const MAX_LOGGED_BODY: usize = 200;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
}

/// API client for the auth backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with no request timeout of its own
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, Client::builder())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Self::build(&config.auth_base_url, builder)
    }

    fn build(base_url: &str, builder: reqwest::ClientBuilder) -> Result<Self> {
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request carrying the session's bearer token, if any.
    ///
    /// A 401 becomes [`ApiError::Unauthorized`]; every other response is
    /// handed back untouched. The session is never modified here.
    pub async fn authorized_request<B>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, url = %url, error = %e, "Request failed without a response");
            ApiError::network(REQUEST_FAILED, e)
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!(%method, url = %url, "Server rejected bearer token");
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    /// Authenticate and store the returned token in the session
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let credentials = LoginCredentials::new(username, password);
        if !credentials.is_complete() {
            return Err(ApiError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&credentials)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Login request failed");
                ApiError::network(LOGIN_FAILED, e)
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            info!(username, "Login rejected");
            return Err(ApiError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_string(&body, MAX_LOGGED_BODY), "Login failed");
            return Err(ApiError::server(body, LOGIN_FAILED));
        }

        let token = match response.json::<AuthResponse>().await {
            Ok(AuthResponse { token: Some(token) }) if !token.trim().is_empty() => token,
            Ok(_) => {
                warn!("Login response carried no token");
                return Err(ApiError::ServerError(LOGIN_FAILED.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse login response");
                return Err(ApiError::ServerError(LOGIN_FAILED.to_string()));
            }
        };

        session.store(&token)?;
        info!(username, "Login successful");
        Ok(())
    }

    /// Create an account. Returns the server's confirmation text unchanged;
    /// does not log in.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let credentials = SignupCredentials::new(username, email, password);
        if !credentials.is_complete() {
            return Err(ApiError::Validation(
                "Username, email and password are required".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.url(SIGNUP_PATH))
            .json(&credentials)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Signup request failed");
                ApiError::network(SIGNUP_FAILED, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_string(&body, MAX_LOGGED_BODY), "Signup failed");
            return Err(ApiError::server(body, SIGNUP_FAILED));
        }

        let body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read signup confirmation");
            ApiError::network(SIGNUP_FAILED, e)
        })?;
        info!(username, "Signup successful");
        Ok(body)
    }

    /// Drop the session token
    pub fn logout(&self, session: &mut Session) -> Result<(), ApiError> {
        session.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Fetch the protected greeting.
    ///
    /// A rejected token clears the session before `Unauthorized` is returned,
    /// the same end state as an explicit logout. If the token cannot be
    /// removed from storage, `Storage` is returned instead.
    pub async fn fetch_secure_data(&self, session: &mut Session) -> Result<SecureGreeting, ApiError> {
        let response = match self
            .authorized_request::<()>(session, Method::GET, SECURE_PATH, None)
            .await
        {
            Ok(response) => response,
            Err(ApiError::Unauthorized) => {
                warn!("Secure data rejected - clearing session");
                session.clear()?;
                return Err(ApiError::Unauthorized);
            }
            Err(ApiError::NetworkError { source, .. }) => {
                return Err(ApiError::network(SECURE_FAILED, source));
            }
            Err(e) => return Err(e),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_string(&body, MAX_LOGGED_BODY), "Secure data request failed");
            return Err(ApiError::server(body, SECURE_FAILED));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(SECURE_FAILED, e))?;
        Ok(SecureGreeting::new(body))
    }
}

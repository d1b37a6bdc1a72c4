//! Google OAuth login client
//!
//! Drives the authorization-code flow: builds the authorization URL, then
//! exchanges the returned code for an access token and fetches the user's
//! subject id and email from the userinfo endpoint.
//!
//! # API Reference
//! - Authorization: https://accounts.google.com/o/oauth2/v2/auth
//! - Token: https://oauth2.googleapis.com/token
//! - Userinfo: https://openidconnect.googleapis.com/v1/userinfo

use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use scribe_common::{Error, Result};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Scopes requested at login; email is all the application stores
const OAUTH_SCOPES: &str = "openid email";

/// Default timeout for provider requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Userinfo endpoint response
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    /// Stable subject identifier, used as the user id
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
}

/// Google OAuth client
pub struct GoogleLogin {
    http_client: Client,
    client_id: String,
    client_secret: String,
    redirect_url: String,
    auth_endpoint: Url,
    token_endpoint: String,
    userinfo_endpoint: String,
}

impl GoogleLogin {
    /// Create a client against the real Google endpoints
    pub fn new(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self::with_endpoints(
            client_id,
            client_secret,
            redirect_url,
            GOOGLE_AUTH_URL,
            GOOGLE_TOKEN_URL,
            GOOGLE_USERINFO_URL,
        )
    }

    /// Create a client against explicit endpoints (tests point these at a stub)
    pub fn with_endpoints(
        client_id: String,
        client_secret: String,
        redirect_url: String,
        auth_endpoint: &str,
        token_endpoint: &str,
        userinfo_endpoint: &str,
    ) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            client_id,
            client_secret,
            redirect_url,
            auth_endpoint: Url::parse(auth_endpoint).expect("authorization endpoint must be a valid URL"),
            token_endpoint: token_endpoint.to_string(),
            userinfo_endpoint: userinfo_endpoint.to_string(),
        }
    }

    /// Authorization URL the browser is redirected to at the start of login
    pub fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", OAUTH_SCOPES)
            .append_pair("state", state);

        url.to_string()
    }

    /// Exchange an authorization code for an access token
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        debug!("Exchanging authorization code");

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| Error::Internal(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Token endpoint returned {}",
                response.status()
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| Error::Internal(format!("Token response parse failed: {}", e)))
    }

    /// Fetch the signed-in user's subject id and email
    pub async fn fetch_userinfo(&self, access_token: &str) -> Result<UserInfo> {
        debug!("Fetching userinfo");

        let response = self
            .http_client
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Error::Internal(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Userinfo endpoint returned {}",
                response.status()
            )));
        }

        response
            .json::<UserInfo>()
            .await
            .map_err(|e| Error::Internal(format!("Userinfo response parse failed: {}", e)))
    }
}

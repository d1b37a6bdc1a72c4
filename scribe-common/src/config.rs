//! Configuration loading for the web frontend
//!
//! All deployment-specific values arrive through environment variables.
//! Required values produce a hard `Error::Config` at startup rather than a
//! partially-working service.

use crate::{Error, Result};

/// Default listen address when `SCRIBE_BIND_ADDR` is not set
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default externally-visible base URL when `SCRIBE_PUBLIC_URL` is not set
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:8000";

/// Web frontend configuration
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Externally-visible base URL, used to build the OAuth redirect URI
    pub public_url: String,
    /// SQLite database path
    pub database_path: String,
    /// Google OAuth client id
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Base URL of the speech recognition API, shown to the demo page
    pub api_url: String,
    /// Analytics tracking id injected into the page layout, if configured
    pub ga_tracking_id: Option<String>,
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_addr: optional("SCRIBE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            public_url: optional("SCRIBE_PUBLIC_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            database_path: required("CONNECTION_STRING")?,
            google_client_id: required("GOOGLE_LOGIN_CLIENT_ID")?,
            google_client_secret: required("GOOGLE_LOGIN_CLIENT_SECRET")?,
            api_url: required("API_URL")?,
            ga_tracking_id: optional("GA_TRACKING_ID"),
        })
    }

    /// OAuth redirect URI registered with the identity provider
    pub fn oauth_redirect_url(&self) -> String {
        format!("{}/login/google", self.public_url)
    }
}

/// Read a required environment variable
fn required(name: &str) -> Result<String> {
    optional(name).ok_or_else(|| Error::Config(format!("{} must be set", name)))
}

/// Read an optional environment variable, treating empty values as unset
fn optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_required_vars() {
        std::env::set_var("CONNECTION_STRING", "/tmp/scribe-test.db");
        std::env::set_var("GOOGLE_LOGIN_CLIENT_ID", "client-id");
        std::env::set_var("GOOGLE_LOGIN_CLIENT_SECRET", "client-secret");
        std::env::set_var("API_URL", "https://api.example.org");
    }

    fn clear_all_vars() {
        for name in [
            "SCRIBE_BIND_ADDR",
            "SCRIBE_PUBLIC_URL",
            "CONNECTION_STRING",
            "GOOGLE_LOGIN_CLIENT_ID",
            "GOOGLE_LOGIN_CLIENT_SECRET",
            "API_URL",
            "GA_TRACKING_ID",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_with_defaults() {
        clear_all_vars();
        set_required_vars();

        let config = WebConfig::from_env().expect("config should load");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.public_url, DEFAULT_PUBLIC_URL);
        assert_eq!(config.database_path, "/tmp/scribe-test.db");
        assert!(config.ga_tracking_id.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_missing_required() {
        clear_all_vars();
        set_required_vars();
        std::env::remove_var("GOOGLE_LOGIN_CLIENT_ID");

        let err = WebConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("GOOGLE_LOGIN_CLIENT_ID"));
    }

    #[test]
    #[serial]
    fn test_empty_value_treated_as_missing() {
        clear_all_vars();
        set_required_vars();
        std::env::set_var("API_URL", "  ");

        let err = WebConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("API_URL"));
    }

    #[test]
    #[serial]
    fn test_public_url_trailing_slash_stripped() {
        clear_all_vars();
        set_required_vars();
        std::env::set_var("SCRIBE_PUBLIC_URL", "https://scribe.example.org/");

        let config = WebConfig::from_env().expect("config should load");
        assert_eq!(config.public_url, "https://scribe.example.org");
        assert_eq!(
            config.oauth_redirect_url(),
            "https://scribe.example.org/login/google"
        );
    }
}

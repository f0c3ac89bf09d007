use crate::{LastFmError, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_HOST: &str = "ws.audioscrobbler.com";
pub const DEFAULT_API_PATH: &str = "2.0/";
pub const DEFAULT_LOGIN_PAGE: &str = "http://www.last.fm/api/auth/";
pub const DEFAULT_SCHEME: &str = "http";

/// API account credentials. Immutable once the client is built.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

// The secret never ends up in debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Client configuration: credentials plus the web service endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastFmConfig {
    pub credentials: Credentials,
    /// Host of the web service, e.g. `ws.audioscrobbler.com`
    pub api_host: String,
    /// Path below the host, e.g. `2.0/`
    pub api_path: String,
    /// Page users are sent to in order to grant access
    pub login_page: String,
    /// URI scheme for web service calls
    pub scheme: String,
}

impl LastFmConfig {
    /// Create a config with the given key and secret and default endpoints
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
            api_host: DEFAULT_API_HOST.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }

    /// Build a config from `LASTFM_*` environment variables.
    ///
    /// `LASTFM_API_KEY` and `LASTFM_API_SECRET` are required. `LASTFM_API_HOST`,
    /// `LASTFM_API_PATH`, `LASTFM_LOGIN_PAGE` and `LASTFM_API_SCHEME` override
    /// the defaults when set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("LASTFM_API_KEY")
            .map_err(|_| LastFmError::Config("LASTFM_API_KEY is not set".to_string()))?;
        let api_secret = env::var("LASTFM_API_SECRET")
            .map_err(|_| LastFmError::Config("LASTFM_API_SECRET is not set".to_string()))?;

        let mut config = Self::new(api_key, api_secret);
        if let Ok(host) = env::var("LASTFM_API_HOST") {
            config = config.with_api_host(host);
        }
        if let Ok(path) = env::var("LASTFM_API_PATH") {
            config = config.with_api_path(path);
        }
        if let Ok(page) = env::var("LASTFM_LOGIN_PAGE") {
            config = config.with_login_page(page);
        }
        if let Ok(scheme) = env::var("LASTFM_API_SCHEME") {
            config = config.with_scheme(scheme);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set a custom web service host
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    /// Set a custom web service path
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    /// Set a custom login page
    pub fn with_login_page(mut self, login_page: impl Into<String>) -> Self {
        self.login_page = login_page.into();
        self
    }

    /// Use `https` or `http` for web service calls
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.credentials.api_key
    }

    /// Check that everything required to talk to the service is present
    pub fn validate(&self) -> Result<()> {
        if self.credentials.api_key.trim().is_empty() {
            return Err(LastFmError::Config("api key may not be empty".to_string()));
        }
        if self.credentials.api_secret.trim().is_empty() {
            return Err(LastFmError::Config("secret may not be empty".to_string()));
        }
        if self.api_host.trim().is_empty() {
            return Err(LastFmError::Config("api host may not be empty".to_string()));
        }
        if self.scheme != "http" && self.scheme != "https" {
            return Err(LastFmError::Config(format!(
                "unsupported scheme '{}'",
                self.scheme
            )));
        }
        Ok(())
    }

    /// The web service endpoint without query string, e.g.
    /// `http://ws.audioscrobbler.com/2.0/`
    pub fn endpoint(&self) -> String {
        format!(
            "{}://{}/{}",
            self.scheme,
            self.api_host.trim_end_matches('/'),
            self.api_path.trim_start_matches('/')
        )
    }

    /// The login page URL carrying this account's API key
    pub fn login_url(&self) -> String {
        format!("{}?api_key={}", self.login_page, self.credentials.api_key)
    }
}

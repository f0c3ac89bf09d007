use crate::{LastFmError, Result};
use serde::{Deserialize, Serialize};

/// Length of the tokens handed out by the Last.fm login page.
pub const AUTH_TOKEN_LEN: usize = 32;

/// Auth methods that exchange a token for a session key.
pub const SESSION_METHODS: [&str; 3] = [
    "auth.getSession",
    "auth.getMobileSession",
    "auth.getWebSession",
];

pub const DEFAULT_SESSION_METHOD: &str = "auth.getSession";

/// Authentication state of one client.
///
/// The client never persists this. It is serializable so the host application
/// can store it between runs and restore it with
/// [`LastFmClient::with_session`](crate::LastFmClient::with_session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Token captured from the auth callback; empty or 32 characters
    pub auth_token: String,
    /// Session key returned by the session method; empty or opaque
    pub session_key: String,
    /// REST method used to obtain the session key
    pub session_method: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            session_key: String::new(),
            session_method: DEFAULT_SESSION_METHOD.to_string(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_auth_token(&mut self, token: &str) -> Result<()> {
        validate_auth_token(token)?;
        self.auth_token = token.to_string();
        Ok(())
    }

    pub fn set_session_key(&mut self, key: &str) -> Result<()> {
        validate_session_key(key)?;
        self.session_key = key.to_string();
        Ok(())
    }

    pub fn set_session_method(&mut self, method: &str) -> Result<()> {
        validate_session_method(method)?;
        self.session_method = method.to_string();
        Ok(())
    }

    /// Check a state that did not come through the setters.
    ///
    /// Token and session key may be empty (not yet obtained); when present they
    /// must pass the same checks as the setters.
    pub fn validate(&self) -> Result<()> {
        if !self.auth_token.is_empty() {
            validate_auth_token(&self.auth_token)?;
        }
        if !self.session_key.is_empty() {
            validate_session_key(&self.session_key)?;
        }
        validate_session_method(&self.session_method)
    }

    pub fn has_auth_token(&self) -> bool {
        !self.auth_token.is_empty()
    }

    pub fn has_session_key(&self) -> bool {
        !self.session_key.is_empty()
    }

    /// Forget token and session key; the session method is kept
    pub fn clear(&mut self) {
        self.auth_token.clear();
        self.session_key.clear();
    }

    /// Serialize session to JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize and validate a session from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let session: Self = serde_json::from_str(json)
            .map_err(|e| LastFmError::Parse(format!("Invalid session JSON: {e}")))?;
        session.validate()?;
        Ok(session)
    }
}

pub(crate) fn validate_auth_token(token: &str) -> Result<()> {
    let len = token.chars().count();
    if len != AUTH_TOKEN_LEN {
        return Err(LastFmError::InvalidAuthToken(len));
    }
    Ok(())
}

fn validate_session_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(LastFmError::InvalidSessionKey(
            "session key may not be blank".to_string(),
        ));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(LastFmError::InvalidSessionKey(
            "session key may not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

fn validate_session_method(method: &str) -> Result<()> {
    if !SESSION_METHODS.iter().any(|known| *known == method) {
        return Err(LastFmError::InvalidSessionMethod(method.to_string()));
    }
    Ok(())
}

use crate::client::LastFmClient;
use crate::types::{LastCall, Params};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Trait for Last.fm web service operations that can be mocked for testing.
///
/// Code that drives the auth flow or issues calls should depend on this trait
/// rather than on [`LastFmClient`] directly, so it can run against a mock.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockLastFmApi`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait LastFmApi {
    /// Call `method` on `entity` with the given parameters.
    async fn call(&mut self, entity: &str, method: &str, params: Params)
        -> Result<Option<Value>>;

    /// Exchange the captured auth token for a session key and store it.
    async fn fetch_session(&mut self) -> Result<String>;

    fn set_auth_token(&mut self, token: &str) -> Result<()>;

    fn set_session_key(&mut self, key: &str) -> Result<()>;

    fn set_session_method(&mut self, method: &str) -> Result<()>;

    /// Capture the auth token from the auth callback's query parameters.
    fn catch_token(&mut self, query: &HashMap<String, String>) -> Result<String>;

    fn login_url(&self) -> String;

    /// List an entity's methods, optionally filtered by auth requirement.
    fn api_methods(&self, entity: &str, needs_auth: Option<bool>) -> Result<Vec<&'static str>>;

    /// Snapshot of the most recent web service call.
    fn last_call(&self) -> Option<LastCall>;
}

#[async_trait(?Send)]
impl LastFmApi for LastFmClient {
    async fn call(
        &mut self,
        entity: &str,
        method: &str,
        params: Params,
    ) -> Result<Option<Value>> {
        LastFmClient::call(self, entity, method, params).await
    }

    async fn fetch_session(&mut self) -> Result<String> {
        LastFmClient::fetch_session(self).await
    }

    fn set_auth_token(&mut self, token: &str) -> Result<()> {
        LastFmClient::set_auth_token(self, token)
    }

    fn set_session_key(&mut self, key: &str) -> Result<()> {
        LastFmClient::set_session_key(self, key)
    }

    fn set_session_method(&mut self, method: &str) -> Result<()> {
        LastFmClient::set_session_method(self, method)
    }

    fn catch_token(&mut self, query: &HashMap<String, String>) -> Result<String> {
        LastFmClient::catch_token(self, query)
    }

    fn login_url(&self) -> String {
        LastFmClient::login_url(self)
    }

    fn api_methods(&self, entity: &str, needs_auth: Option<bool>) -> Result<Vec<&'static str>> {
        LastFmClient::api_methods(self, entity, needs_auth)
    }

    fn last_call(&self) -> Option<LastCall> {
        LastFmClient::last_call(self).cloned()
    }
}

/// Drive the callback half of the auth flow on any [`LastFmApi`].
///
/// Captures the token from the callback query and exchanges it for a session
/// key, returning the key.
pub async fn complete_auth<A: LastFmApi + ?Sized>(
    api: &mut A,
    callback_query: &HashMap<String, String>,
) -> Result<String> {
    api.catch_token(callback_query)?;
    api.fetch_session().await
}

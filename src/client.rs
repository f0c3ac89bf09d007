use crate::config::LastFmConfig;
use crate::entity::Entity;
use crate::request::{ApiRequest, RequestBuilder};
use crate::response;
use crate::session::SessionState;
use crate::types::{LastCall, Params};
use crate::{LastFmError, Result};
use http_client::HttpClient;
use serde_json::Value;
use std::collections::HashMap;

/// Operations handled by the client itself rather than the web service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientOperation {
    CatchToken,
    SetAuthToken,
    SetSessionKey,
    SetSessionMethod,
    GetLoginUrl,
    ApiMethods,
    GetLastCall,
}

impl ClientOperation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "catchToken" => Some(Self::CatchToken),
            "setAuthToken" => Some(Self::SetAuthToken),
            "setSessionKey" => Some(Self::SetSessionKey),
            "setSessionMethod" => Some(Self::SetSessionMethod),
            "getLoginUrl" => Some(Self::GetLoginUrl),
            "apiMethods" => Some(Self::ApiMethods),
            "getLastCall" => Some(Self::GetLastCall),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CatchToken => "catchToken",
            Self::SetAuthToken => "setAuthToken",
            Self::SetSessionKey => "setSessionKey",
            Self::SetSessionMethod => "setSessionMethod",
            Self::GetLoginUrl => "getLoginUrl",
            Self::ApiMethods => "apiMethods",
            Self::GetLastCall => "getLastCall",
        }
    }
}

/// Arguments for [`LastFmClient::query`].
///
/// For entity calls the first positional argument is the method name and
/// `params` are the call parameters. Client operations read their own
/// positional arguments; `catchToken` reads `params` as the callback query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pub positional: Vec<String>,
    pub params: Params,
}

impl QueryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    fn params_map(&self) -> HashMap<String, String> {
        self.params.iter().cloned().collect()
    }
}

/// What a [`LastFmClient::query`] produced.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryOutput {
    /// Structured web service payload; `None` for an empty response body
    Payload(Option<Value>),
    Text(String),
    Methods(Vec<&'static str>),
    LastCall(Option<LastCall>),
    Done,
}

/// Client for the Last.fm web service REST API.
///
/// Maps entity and method names to REST methods, signs authenticated calls,
/// sends them through the injected [`HttpClient`] and turns the XML envelope
/// into structured data.
///
/// Session state and the last-call trace are mutated by calls, which is why
/// every mutating method takes `&mut self`. Share a client between tasks by
/// wrapping it in a mutex.
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_api::{LastFmClient, LastFmConfig, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let config = LastFmConfig::new("api_key", "secret");
///     let http_client = http_client::native::NativeClient::new();
///     let mut client = LastFmClient::new(Box::new(http_client), config)?;
///
///     let payload = client
///         .call("artist", "getInfo", vec![("artist".into(), "Cher".into())])
///         .await?;
///     println!("{payload:?}");
///     Ok(())
/// }
/// ```
pub struct LastFmClient {
    client: Box<dyn HttpClient + Send + Sync>,
    config: LastFmConfig,
    session: SessionState,
    last_call: Option<LastCall>,
}

impl LastFmClient {
    /// Create a new [`LastFmClient`] with an empty session.
    ///
    /// Fails with [`LastFmError::Config`] when the config is incomplete.
    pub fn new(
        client: Box<dyn HttpClient + Send + Sync>,
        config: LastFmConfig,
    ) -> Result<Self> {
        Self::with_session(client, config, SessionState::new())
    }

    /// Create a client that resumes a session stored by the caller.
    ///
    /// The session is checked like the setters check their input, so a short
    /// token or unknown session method is rejected here rather than at dispatch.
    pub fn with_session(
        client: Box<dyn HttpClient + Send + Sync>,
        config: LastFmConfig,
        session: SessionState,
    ) -> Result<Self> {
        config
            .validate()
            .inspect_err(|e| log_failure("configure client", e))?;
        session
            .validate()
            .inspect_err(|e| log_failure("restore session", e))?;
        Ok(Self {
            client,
            config,
            session,
            last_call: None,
        })
    }

    pub fn config(&self) -> &LastFmConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Diagnostic trace of the most recent web service call
    pub fn last_call(&self) -> Option<&LastCall> {
        self.last_call.as_ref()
    }

    /// Set the token captured from the auth callback. Must be 32 characters.
    pub fn set_auth_token(&mut self, token: &str) -> Result<()> {
        self.session
            .set_auth_token(token)
            .inspect_err(|e| log_failure("setAuthToken", e))
    }

    /// Set the session key used to sign authenticated calls.
    pub fn set_session_key(&mut self, key: &str) -> Result<()> {
        self.session
            .set_session_key(key)
            .inspect_err(|e| log_failure("setSessionKey", e))
    }

    /// Choose which Auth method [`fetch_session`](Self::fetch_session) uses.
    pub fn set_session_method(&mut self, method: &str) -> Result<()> {
        self.session
            .set_session_method(method)
            .inspect_err(|e| log_failure("setSessionMethod", e))
    }

    /// The page to send users to so they can grant this application access.
    pub fn login_url(&self) -> String {
        self.config.login_url()
    }

    /// Capture the auth token from the query parameters of the auth callback.
    ///
    /// Returns the stored token, which is unchanged when the query has no
    /// `token` parameter. A present but blank token fails with
    /// [`LastFmError::EmptyCallbackToken`].
    pub fn catch_token(&mut self, query: &HashMap<String, String>) -> Result<String> {
        if let Some(token) = query.get("token") {
            if token.trim().is_empty() {
                let err = LastFmError::EmptyCallbackToken;
                log_failure("catchToken", &err);
                return Err(err);
            }
            self.set_auth_token(token)?;
            log::debug!("Captured auth token from callback");
        }
        Ok(self.session.auth_token.clone())
    }

    /// List the methods of an entity, optionally filtered by auth requirement.
    pub fn api_methods(
        &self,
        entity: &str,
        needs_auth: Option<bool>,
    ) -> Result<Vec<&'static str>> {
        Entity::from_call_name(entity)
            .map(|entity| entity.definition().list_methods(needs_auth))
            .inspect_err(|e| log_failure("apiMethods", e))
    }

    /// Call `method` on `entity` with the given parameters.
    ///
    /// `entity` is the name as a caller would write it (`album`, `track`, ...).
    /// Returns `Ok(None)` when the service answers with an empty body.
    pub async fn call(
        &mut self,
        entity: &str,
        method: &str,
        params: Params,
    ) -> Result<Option<Value>> {
        let entity = Entity::from_call_name(entity)
            .inspect_err(|e| log_failure(&format!("{entity}.{method}"), e))?;
        self.call_entity(entity, method, params).await
    }

    /// Dispatch a call by name.
    ///
    /// Client operation names (`setAuthToken`, `getLoginUrl`, ...) are handled
    /// locally. Any other name is taken as an entity whose method is the first
    /// positional argument.
    pub async fn query(&mut self, name: &str, args: QueryArgs) -> Result<QueryOutput> {
        if let Some(operation) = ClientOperation::from_name(name) {
            return self.run_operation(operation, args);
        }

        let entity = Entity::from_call_name(name).inspect_err(|e| log_failure(name, e))?;
        let QueryArgs { positional, params } = args;
        let method = positional
            .into_iter()
            .next()
            .ok_or_else(|| LastFmError::MissingParams(name.to_string()))
            .inspect_err(|e| log_failure(name, e))?;

        self.call_entity(entity, &method, params)
            .await
            .map(QueryOutput::Payload)
    }

    /// Exchange the captured auth token for a session key.
    ///
    /// Calls the configured session method (`auth.getSession` by default),
    /// stores the returned key and returns it.
    pub async fn fetch_session(&mut self) -> Result<String> {
        let session_method = self.session.session_method.clone();
        let method = session_method
            .split_once('.')
            .map(|(_, method)| method.to_string())
            .ok_or_else(|| LastFmError::InvalidSessionMethod(session_method.clone()))
            .inspect_err(|e| log_failure("fetchSession", e))?;

        let payload = self.call_entity(Entity::Auth, &method, Params::new()).await?;
        let key = payload
            .as_ref()
            .and_then(|payload| payload.get("Session"))
            .and_then(|session| session.get("key"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                LastFmError::Parse(format!("{session_method} did not return a session key"))
            })
            .inspect_err(|e| log_failure(&session_method, e))?;

        self.set_session_key(&key)?;
        log::info!("Session established via {session_method}");
        Ok(key)
    }

    fn run_operation(
        &mut self,
        operation: ClientOperation,
        args: QueryArgs,
    ) -> Result<QueryOutput> {
        let first = args.positional.first().cloned();
        let required = |value: Option<String>| {
            value.ok_or_else(|| {
                let err = LastFmError::MissingParams(operation.name().to_string());
                log_failure(operation.name(), &err);
                err
            })
        };

        match operation {
            ClientOperation::CatchToken => {
                let query = args.params_map();
                self.catch_token(&query).map(QueryOutput::Text)
            }
            ClientOperation::SetAuthToken => {
                self.set_auth_token(&required(first)?)?;
                Ok(QueryOutput::Done)
            }
            ClientOperation::SetSessionKey => {
                self.set_session_key(&required(first)?)?;
                Ok(QueryOutput::Done)
            }
            ClientOperation::SetSessionMethod => {
                self.set_session_method(&required(first)?)?;
                Ok(QueryOutput::Done)
            }
            ClientOperation::GetLoginUrl => Ok(QueryOutput::Text(self.login_url())),
            ClientOperation::ApiMethods => {
                let entity = required(first)?;
                let needs_auth = args.positional.get(1).map(|flag| parse_flag(flag));
                self.api_methods(&entity, needs_auth)
                    .map(QueryOutput::Methods)
            }
            ClientOperation::GetLastCall => Ok(QueryOutput::LastCall(self.last_call.clone())),
        }
    }

    async fn call_entity(
        &mut self,
        entity: Entity,
        method: &str,
        params: Params,
    ) -> Result<Option<Value>> {
        let operation = entity.definition().rest_method(method);
        self.dispatch(entity, method, params)
            .await
            .inspect_err(|e| log_failure(&operation, e))
    }

    async fn dispatch(
        &mut self,
        entity: Entity,
        method: &str,
        params: Params,
    ) -> Result<Option<Value>> {
        let ctx = entity.definition().prepare_call(method, params)?;
        let request = RequestBuilder::new(&self.config).build(
            &ctx,
            &self.config.credentials,
            &self.session,
        )?;

        self.last_call = Some(trace(&request));
        let body = self.send(&request).await?;

        response::handle(&body, &ctx.rest_method)
    }

    async fn send(&self, request: &ApiRequest) -> Result<String> {
        log::debug!("{} {}", request.verb, request.rest_method);

        let mut response = self
            .client
            .send(request.to_http_request())
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;

        log::debug!(
            "{} response status: {}",
            request.rest_method,
            response.status()
        );

        response
            .body_string()
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))
    }
}

fn trace(request: &ApiRequest) -> LastCall {
    LastCall {
        rest_method: request.rest_method.clone(),
        uri: request.url.to_string(),
        data: request.params.clone(),
        verb: request.verb,
        signature: request.signature.as_ref().map(|s| s.base_string.clone()),
        api_sig: request.signature.as_ref().map(|s| s.api_sig.clone()),
        issued_at: chrono::Utc::now(),
    }
}

fn parse_flag(flag: &str) -> bool {
    matches!(
        flag.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

fn log_failure(operation: &str, err: &LastFmError) {
    match err {
        LastFmError::Api {
            rest_method,
            code,
            message,
        } => log::error!("Last.fm API: {rest_method} said '{message}' (code {code})"),
        other => log::error!("Last.fm {operation} failed: {other}"),
    }
}

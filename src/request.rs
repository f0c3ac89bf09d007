use crate::config::{Credentials, LastFmConfig};
use crate::form::encode_form_data;
use crate::headers::{add_common_headers, add_form_headers};
use crate::session::SessionState;
use crate::signature::{sign, Signature};
use crate::types::{CallContext, Params, Verb};
use crate::{LastFmError, Result};
use http_types::{Method, Request, Url};

/// A fully assembled web service request, before it is handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub rest_method: String,
    pub verb: Verb,
    /// Target URI. Carries the query string for GET, none for POST.
    pub url: Url,
    /// Every parameter sent, in the order it was assembled
    pub params: Params,
    /// Form-encoded body for POST, `None` for GET
    pub body: Option<String>,
    pub signature: Option<Signature>,
}

impl ApiRequest {
    pub fn query_string(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Convert into an `http_types` request with the client headers applied.
    pub fn to_http_request(&self) -> Request {
        match self.verb {
            Verb::Get => {
                let mut request = Request::new(Method::Get, self.url.clone());
                add_common_headers(&mut request);
                request
            }
            Verb::Post => {
                let mut request = Request::new(Method::Post, self.url.clone());
                request.set_body(self.body.clone().unwrap_or_default());
                add_form_headers(&mut request);
                request
            }
        }
    }
}

/// Assembles parameters, signs them and lays them out for the chosen verb.
pub struct RequestBuilder<'a> {
    config: &'a LastFmConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a LastFmConfig) -> Self {
        Self { config }
    }

    /// Build the request for `ctx`.
    ///
    /// `method` and `api_key` always come first and cannot be overridden by
    /// call parameters; a caller supplied `api_sig` is dropped. Authenticated calls get `token` (Auth entity) or `sk`
    /// plus an `api_sig` computed over everything before it.
    pub fn build(
        &self,
        ctx: &CallContext,
        credentials: &Credentials,
        session: &SessionState,
    ) -> Result<ApiRequest> {
        let mut params: Params = vec![
            ("method".to_string(), ctx.rest_method.clone()),
            ("api_key".to_string(), credentials.api_key.clone()),
        ];
        for (key, value) in &ctx.params {
            if has_param(&params, key) || key == "api_sig" {
                log::debug!(
                    "Ignoring call parameter '{key}' for {}: reserved by the client",
                    ctx.rest_method
                );
                continue;
            }
            params.push((key.clone(), value.clone()));
        }

        let signature = if ctx.requires_auth {
            if !ctx.is_auth_entity() && !session.has_session_key() {
                return Err(LastFmError::MissingSessionKey {
                    rest_method: ctx.rest_method.clone(),
                });
            }
            if !session.has_auth_token() {
                return Err(LastFmError::MissingAuthToken {
                    rest_method: ctx.rest_method.clone(),
                });
            }

            // The Auth entity exists to obtain the session key, so it signs the token
            if ctx.is_auth_entity() {
                set_param(&mut params, "token", &session.auth_token);
            } else {
                set_param(&mut params, "sk", &session.session_key);
            }

            let signature = sign(&params, &credentials.api_secret);
            set_param(&mut params, "api_sig", &signature.api_sig);
            Some(signature)
        } else {
            None
        };

        let encoded = encode_form_data(&params);
        let mut url = Url::parse(&self.config.endpoint())
            .map_err(|e| LastFmError::Parse(format!("Invalid endpoint: {e}")))?;

        let body = match ctx.verb {
            Verb::Get => {
                url.set_query(Some(&encoded));
                None
            }
            Verb::Post => {
                url.set_query(None);
                Some(encoded)
            }
        };

        log::debug!(
            "Built {} request for {} with {} parameters",
            ctx.verb,
            ctx.rest_method,
            params.len()
        );

        Ok(ApiRequest {
            rest_method: ctx.rest_method.clone(),
            verb: ctx.verb,
            url,
            params,
            body,
            signature,
        })
    }
}

fn has_param(params: &[(String, String)], key: &str) -> bool {
    params.iter().any(|(k, _)| k == key)
}

/// Insert or replace `key`, so authentication values win over call parameters.
fn set_param(params: &mut Params, key: &str, value: &str) {
    match params.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = value.to_string(),
        None => params.push((key.to_string(), value.to_string())),
    }
}

#![allow(dead_code)]

use http_client::{Error, HttpClient, Request, Response};
use lastfm_api::{LastFmClient, LastFmConfig};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "test_api_key";
pub const API_SECRET: &str = "test_secret";
pub const AUTH_TOKEN: &str = "0123456789abcdef0123456789abcdef";
pub const SESSION_KEY: &str = "d580d57f32848f5dcf574d1ce18d78b2";

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub query: Option<String>,
    pub body: String,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(u16, String),
    Fail(String),
}

/// Transport that answers from a queue of canned replies and records every
/// request it receives.
#[derive(Debug, Clone, Default)]
pub struct StubHttpClient {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with `body`.
    pub fn reply(&self, body: &str) -> &Self {
        self.reply_with_status(200, body)
    }

    pub fn reply_with_status(&self, status: u16, body: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Body(status, body.to_string()));
        self
    }

    /// Queue a transport failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Fail(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HttpClient for StubHttpClient {
    async fn send(&self, mut req: Request) -> Result<Response, Error> {
        let body = req.body_string().await?;
        let header = |name: &str| req.header(name).map(|values| values.last().to_string());
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            url: req.url().to_string(),
            query: req.url().query().map(str::to_string),
            body,
            content_type: header("Content-Type"),
            user_agent: header("User-Agent"),
        };
        self.requests.lock().unwrap().push(recorded);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Body(status, body)) => {
                let mut response = Response::new(status);
                response.set_body(body);
                Ok(response)
            }
            Some(Reply::Fail(message)) => Err(Error::from_str(
                http_types::StatusCode::BadGateway,
                message,
            )),
            None => Err(Error::from_str(
                http_types::StatusCode::InternalServerError,
                "no stubbed reply left",
            )),
        }
    }
}

pub fn test_config() -> LastFmConfig {
    LastFmConfig::new(API_KEY, API_SECRET)
}

/// Build a client backed by `stub` with an empty session.
pub fn test_client(stub: &StubHttpClient) -> LastFmClient {
    LastFmClient::new(Box::new(stub.clone()), test_config()).unwrap()
}

/// Build a client backed by `stub` with token and session key already set.
pub fn authenticated_client(stub: &StubHttpClient) -> LastFmClient {
    let mut client = test_client(stub);
    client.set_auth_token(AUTH_TOKEN).unwrap();
    client.set_session_key(SESSION_KEY).unwrap();
    client
}

/// Decode a query string or form body into ordered pairs.
pub fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
    lastfm_api::form::parse_form_data(encoded)
}

pub fn pair_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub const ALBUM_SEARCH_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
<results for="believe">
  <opensearch:Query role="request" searchTerms="believe" startPage="1" />
  <opensearch:totalResults>2</opensearch:totalResults>
  <albummatches>
    <album>
      <name>Believe</name>
      <artist>Cher</artist>
      <url>http://www.last.fm/music/Cher/Believe</url>
    </album>
    <album>
      <name>Believe in Me</name>
      <artist>Lenny Kravitz</artist>
      <url>http://www.last.fm/music/Lenny+Kravitz/Believe+in+Me</url>
    </album>
  </albummatches>
</results>
</lfm>"#;

pub const SESSION_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <session>
    <name>MyLastFMUsername</name>
    <key>d580d57f32848f5dcf574d1ce18d78b2</key>
    <subscriber>0</subscriber>
  </session>
</lfm>"#;

pub const OK_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
</lfm>"#;

pub const INVALID_SESSION_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="failed">
  <error code="9">Invalid session key - Please re-authenticate</error>
</lfm>"#;

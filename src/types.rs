use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered request parameters, in insertion order.
pub type Params = Vec<(String, String)>;

/// Transport verb used for a REST method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a method against an entity's registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodSpec {
    pub verb: Verb,
    pub requires_auth: bool,
}

/// Everything needed to build one request. Created per call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Entity name as declared in the registry, e.g. `Album`
    pub entity: &'static str,
    /// Method name as called, e.g. `search`
    pub method: String,
    /// Dotted REST method name, e.g. `album.search`
    pub rest_method: String,
    pub verb: Verb,
    pub requires_auth: bool,
    /// Call-specific parameters
    pub params: Params,
}

impl CallContext {
    pub fn is_auth_entity(&self) -> bool {
        self.entity == "Auth"
    }
}

/// Diagnostic snapshot of the most recent dispatch.
///
/// `data` holds the parameters that were sent: the query string parameters for
/// GET, the form body for POST. `signature` is the string that was hashed to
/// produce `api_sig`, which includes the shared secret, so treat the trace as
/// sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastCall {
    pub rest_method: String,
    pub uri: String,
    pub data: Params,
    pub verb: Verb,
    pub signature: Option<String>,
    pub api_sig: Option<String>,
    pub issued_at: DateTime<Utc>,
}

impl LastCall {
    /// Get a short description of the call for logging
    pub fn short_description(&self) -> String {
        let mut desc = format!("{} {}", self.verb, self.rest_method);
        if let Some(ref sig) = self.api_sig {
            desc.push_str(&format!(" (signed {sig})"));
        }
        desc
    }
}

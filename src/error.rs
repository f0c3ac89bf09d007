use thiserror::Error;

/// Error types for Last.fm web service operations.
///
/// Local validation failures (unknown names, missing credentials) are raised
/// before any network traffic. Transport failures surface as [`LastFmError::Http`],
/// while failures reported by the service itself inside a well-formed response
/// envelope surface as [`LastFmError::Api`].
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use lastfm_api::{LastFmClient, LastFmConfig, LastFmError};
///
/// #[tokio::main]
/// async fn main() {
///     let config = LastFmConfig::new("api_key", "secret");
///     let mut client = LastFmClient::new(
///         Box::new(http_client::native::NativeClient::new()),
///         config,
///     )
///     .unwrap();
///
///     match client.call("album", "search", vec![("album".into(), "Foo".into())]).await {
///         Ok(payload) => println!("{payload:?}"),
///         Err(LastFmError::Api { code, message, .. }) => {
///             eprintln!("Last.fm refused the call ({code}): {message}");
///         }
///         Err(LastFmError::Http(msg)) => eprintln!("Network error: {msg}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum LastFmError {
    /// No entity definition matches the called name.
    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),

    /// The entity exists but does not declare the method.
    #[error("Method '{method}' was not found on entity {entity}")]
    UnknownMethod { entity: String, method: String },

    /// An entity or client operation was called without its required arguments,
    /// e.g. an entity without the method name to run.
    #[error("'{0}' cannot be called without parameters")]
    MissingParams(String),

    /// An authenticated call was attempted before a session key was set.
    #[error("{rest_method} requires auth. Session key may not be empty")]
    MissingSessionKey { rest_method: String },

    /// An authenticated call was attempted before an auth token was set.
    #[error("{rest_method} requires auth. Auth token may not be empty")]
    MissingAuthToken { rest_method: String },

    /// The auth callback carried a `token` parameter with no value.
    #[error("Callback token was empty")]
    EmptyCallbackToken,

    /// Auth tokens are exactly 32 characters long.
    #[error("Invalid auth token: expected 32 characters, got {0}")]
    InvalidAuthToken(usize),

    #[error("Invalid session key: {0}")]
    InvalidSessionKey(String),

    /// Only the Auth methods that produce a session may be used as session method.
    #[error("Invalid session method '{0}'")]
    InvalidSessionMethod(String),

    /// HTTP/network related errors raised by the transport.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body or a constructed URL could not be parsed.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The service answered with `status="failed"`.
    ///
    /// `code` is the numeric error code from the envelope (0 when the service
    /// omitted it) and `message` the human readable text.
    #[error("Last.fm API: {rest_method} said '{message}' (code {code})")]
    Api {
        rest_method: String,
        code: u32,
        message: String,
    },

    /// Missing or invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LastFmError {
    /// True when the remote service reported the failure.
    pub fn is_api_error(&self) -> bool {
        matches!(self, LastFmError::Api { .. })
    }

    /// True when the failure was detected locally, before any request was sent.
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            LastFmError::Api { .. } | LastFmError::Http(_) | LastFmError::Parse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let api = LastFmError::Api {
            rest_method: "album.getinfo".to_string(),
            code: 6,
            message: "Album not found".to_string(),
        };
        assert!(api.is_api_error());
        assert!(!api.is_local());

        let http = LastFmError::Http("connection refused".to_string());
        assert!(!http.is_api_error());
        assert!(!http.is_local());

        let missing = LastFmError::MissingSessionKey {
            rest_method: "track.addTags".to_string(),
        };
        assert!(missing.is_local());
    }

    #[test]
    fn test_api_error_message() {
        let err = LastFmError::Api {
            rest_method: "artist.getInfo".to_string(),
            code: 10,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Last.fm API: artist.getInfo said 'Invalid API key' (code 10)"
        );
    }
}

pub mod api;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod form;
pub mod headers;
mod inflector;
pub mod request;
pub mod response;
pub mod session;
pub mod signature;
pub mod types;
pub mod xml;

pub use api::{complete_auth, LastFmApi};
pub use client::{ClientOperation, LastFmClient, QueryArgs, QueryOutput};
pub use config::{Credentials, LastFmConfig};
pub use entity::{Entity, EntityDefinition};
pub use error::LastFmError;
pub use request::{ApiRequest, RequestBuilder};
pub use session::SessionState;
pub use signature::{sign, Signature};
pub use types::{CallContext, LastCall, MethodSpec, Params, Verb};

#[cfg(feature = "mock")]
pub use api::MockLastFmApi;

pub type Result<T> = std::result::Result<T, LastFmError>;

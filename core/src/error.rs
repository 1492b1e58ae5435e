//! Error types for the user API client.
//!
//! # Design
//! Every recoverable failure reaches the caller as a single `ApiError` shape:
//! a `domain`, a numeric `code` and a human-readable `message`. The `kind`
//! tag records where the failure came from (transport, empty body, malformed
//! body, or a business error in the payload) so callers can branch without
//! string matching.
//!
//! Broken environments (bad base URL, missing seeds) are not `ApiError`s.
//! Those surface as `ConfigError` at startup, or as a panic in the seeded
//! backend.

use serde_json::error::Category;
use thiserror::Error;

/// Domain used for every error the client itself produces.
pub const CLIENT_DOMAIN: &str = "user-api.client";

/// Domain used for errors raised while parsing a response body.
pub const JSON_DOMAIN: &str = "serde_json";

/// Domain used by transports for network-layer failures.
pub const TRANSPORT_DOMAIN: &str = "user-api.transport";

/// Code for a response that carried no payload.
pub const EMPTY_BODY_CODE: i64 = 1001;

/// Where an `ApiError` originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP stack failed before a payload was received.
    Transport,
    /// The response had no payload.
    EmptyBody,
    /// The payload was not valid JSON.
    MalformedBody,
    /// The payload carried an `error` object.
    Business,
}

/// Uniform failure delivered through `ApiResult::Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{domain} ({code}): {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub domain: String,
    pub code: i64,
    pub message: String,
}

impl ApiError {
    pub fn new(
        kind: ErrorKind,
        domain: impl Into<String>,
        code: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            domain: domain.into(),
            code,
            message: message.into(),
        }
    }

    /// A network-layer failure reported by a transport.
    pub fn transport(code: i64, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, TRANSPORT_DOMAIN, code, message)
    }

    pub fn empty_body() -> Self {
        Self::new(
            ErrorKind::EmptyBody,
            CLIENT_DOMAIN,
            EMPTY_BODY_CODE,
            "Data could not be serialized. Input data was nil.",
        )
    }

    /// An error object found inside an otherwise valid payload.
    pub fn business(code: i64, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Business, CLIENT_DOMAIN, code, message)
    }
}

/// Parser failures keep the parser's own domain; the code is the serde_json
/// error category.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        let code = match err.classify() {
            Category::Io => 1,
            Category::Syntax => 2,
            Category::Data => 3,
            Category::Eof => 4,
        };
        Self::new(ErrorKind::MalformedBody, JSON_DOMAIN, code, err.to_string())
    }
}

/// Errors in the host configuration. These are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base url is not configured (set {0})")]
    MissingBaseUrl(&'static str),

    #[error("base url {value:?} is not a valid url: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base url {0:?} cannot have path segments appended")]
    UnsupportedBaseUrl(String),
}

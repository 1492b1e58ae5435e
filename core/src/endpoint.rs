//! The two backend operations and how they map onto HTTP.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::ConfigError;
use crate::http::HttpMethod;

/// Root URL every endpoint path is appended to.
///
/// Only URLs that can carry path segments are accepted, so resolving an
/// endpoint against a `BaseUrl` never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl(crate::config::BASE_URL_VAR));
        }
        let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedBaseUrl(trimmed.to_string()));
        }
        Ok(Self(url))
    }

    /// Append `segments` as path components, percent-encoding each one.
    fn join_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl FromStr for BaseUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    GetUserInfo { user_id: String },
    UpdateUserInfo { user_id: String },
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::GetUserInfo { .. } => HttpMethod::Get,
            Endpoint::UpdateUserInfo { .. } => HttpMethod::Put,
        }
    }

    /// Both operations address `{base}/user/{userId}`.
    pub fn url(&self, base: &BaseUrl) -> Url {
        match self {
            Endpoint::GetUserInfo { user_id } | Endpoint::UpdateUserInfo { user_id } => {
                base.join_segments(&["user", user_id.as_str()])
            }
        }
    }
}

//! HTTP transport types.
//!
//! # Design
//! Requests and responses are described as plain data. The core builds
//! `HttpRequest` values and consumes `HttpResponse` values; a `Transport`
//! implementation performs the actual I/O. All fields use owned types so
//! values move freely onto a transport's worker thread.

use std::fmt;

/// Header name/value pairs in the order they will be sent.
pub type Headers = Vec<(String, String)>;

/// Headers every request carries unless the caller overrides them.
pub fn default_headers() -> Headers {
    vec![("Accept".to_string(), "application/json".to_string())]
}

/// Merge caller-supplied headers over `base`.
///
/// Names compare case-insensitively. On a collision the caller's name and
/// value replace the existing entry in place; new names are appended.
pub fn merge_headers(mut base: Headers, extra: Headers) -> Headers {
    for (name, value) in extra {
        match base
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => *slot = (name, value),
            None => base.push((name, value)),
        }
    }
    base
}

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `HttpManager`. The transport is responsible for executing it and
/// reporting the matching `HttpResponse`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `body` is `None` when the transport received no payload at all. The
/// bundled transport leaves `headers` empty; only status and body are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

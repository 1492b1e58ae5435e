//! The seam between the API facade and whatever executes requests.
//!
//! # Design
//! `ApiManager` turns an `Endpoint` into a pending `ApiRequest`;
//! `ApiRequest::api_response` registers the completion. The request is
//! consumed by `api_response`, so a completion can be registered once and is
//! delivered once. Two implementations exist: `HttpManager` (real transport)
//! and `SeededManager` (canned JSON for UI tests).

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::endpoint::{BaseUrl, Endpoint};
use crate::http::{default_headers, merge_headers, Headers, HttpRequest};
use crate::result::ApiResult;
use crate::sanitize::sanitize;
use crate::transport::Transport;
use crate::types::Parameters;

/// Callback receiving the single outcome of a request.
pub type Completion<T> = Box<dyn FnOnce(ApiResult<T>) + Send + 'static>;

/// Produces pending requests for endpoints.
pub trait ApiManager: Send + Sync {
    fn api_request(
        &self,
        endpoint: &Endpoint,
        parameters: Option<Parameters>,
        headers: Option<Headers>,
    ) -> Box<dyn ApiRequest>;

    /// A request with neither body nor extra headers.
    fn api_request_plain(&self, endpoint: &Endpoint) -> Box<dyn ApiRequest> {
        self.api_request(endpoint, None, None)
    }

    /// A request with a body and no extra headers.
    fn api_request_with(&self, endpoint: &Endpoint, parameters: Parameters) -> Box<dyn ApiRequest> {
        self.api_request(endpoint, Some(parameters), None)
    }
}

/// A request waiting for its completion to be registered.
pub trait ApiRequest: Send {
    /// Start (or resolve) the request and deliver its outcome to `completion`.
    ///
    /// The callback may run on any thread, or inline before this returns.
    fn api_response(self: Box<Self>, completion: Completion<Value>);
}

/// `ApiManager` backed by a real HTTP transport.
///
/// Every request carries `Accept: application/json`; caller headers are
/// merged on top. Parameters are sent as a JSON body.
pub struct HttpManager<T> {
    base_url: BaseUrl,
    transport: Arc<T>,
}

impl<T: Transport> HttpManager<T> {
    pub fn new(base_url: BaseUrl, transport: T) -> Self {
        Self {
            base_url,
            transport: Arc::new(transport),
        }
    }

    /// Describe the HTTP request `api_request` would send.
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
        parameters: Option<&Parameters>,
        headers: Option<Headers>,
    ) -> HttpRequest {
        let mut base = default_headers();
        let body = parameters.map(|p| Value::Object(p.clone()).to_string());
        if body.is_some() {
            base.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        let headers = merge_headers(base, headers.unwrap_or_default());
        HttpRequest {
            method: endpoint.method(),
            url: endpoint.url(&self.base_url).to_string(),
            headers,
            body,
        }
    }
}

impl<T: Transport> ApiManager for HttpManager<T> {
    fn api_request(
        &self,
        endpoint: &Endpoint,
        parameters: Option<Parameters>,
        headers: Option<Headers>,
    ) -> Box<dyn ApiRequest> {
        let request = self.build_request(endpoint, parameters.as_ref(), headers);
        Box::new(HttpApiRequest {
            transport: Arc::clone(&self.transport),
            request,
        })
    }
}

/// A pending request for `HttpManager`.
pub struct HttpApiRequest<T> {
    transport: Arc<T>,
    request: HttpRequest,
}

impl<T: Transport> ApiRequest for HttpApiRequest<T> {
    fn api_response(self: Box<Self>, completion: Completion<Value>) {
        let HttpApiRequest { transport, request } = *self;
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, "sending request");
        transport.execute(
            request,
            Box::new(move |outcome| {
                let result = match outcome {
                    Ok(response) => {
                        debug!(%method, %url, status = response.status, "response received");
                        sanitize(response.body.as_deref(), None)
                    }
                    Err(err) => sanitize(None, Some(err)),
                };
                if let Err(err) = &result {
                    warn!(%method, %url, code = err.code, error = %err, "request failed");
                }
                completion(result);
            }),
        );
    }
}

//! The HTTP stack the real backend runs on.
//!
//! # Design
//! `Transport` is the only place network I/O happens. Implementations own
//! their execution context and call the callback exactly once, from whatever
//! thread suits them. A transport reports `Err` only when no HTTP response
//! was received; every status code is data for the sanitizer.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Receives the outcome of one executed request.
pub type TransportCallback = Box<dyn FnOnce(Result<HttpResponse, ApiError>) + Send + 'static>;

pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: HttpRequest, on_complete: TransportCallback);
}

#[cfg(feature = "ureq-transport")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq-transport")]
mod ureq_transport {
    use std::thread;
    use std::time::Duration;

    use tracing::error;

    use super::{Transport, TransportCallback};
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Transport codes, one per ureq failure class.
    const CODE_TIMEOUT: i64 = -1001;
    const CODE_CONNECT: i64 = -1004;
    const CODE_IO: i64 = -1005;
    const CODE_OTHER: i64 = -1;
    const CODE_SPAWN: i64 = -2;

    /// Blocking ureq client, run on one worker thread per request.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::with_timeout(Duration::from_secs(30))
        }

        pub fn with_timeout(timeout: Duration) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(timeout))
                .build()
                .new_agent();
            Self { agent }
        }

        /// Execute `request` on the calling thread.
        pub fn execute_blocking(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let HttpRequest {
                method,
                url,
                headers,
                body,
            } = request;

            let mut response = match method {
                HttpMethod::Get => {
                    let mut builder = self.agent.get(&url);
                    for (name, value) in &headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.call()
                }
                HttpMethod::Put => {
                    let mut builder = self.agent.put(&url);
                    for (name, value) in &headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    match body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
            }
            .map_err(transport_error)?;

            let status = response.status().as_u16();
            let bytes = response
                .body_mut()
                .read_to_vec()
                .map_err(transport_error)?;

            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: (!bytes.is_empty()).then_some(bytes),
            })
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: HttpRequest, on_complete: TransportCallback) {
            let this = self.clone();
            let (tx, rx) = std::sync::mpsc::channel::<TransportCallback>();
            let spawned = thread::Builder::new()
                .name("ureq-transport".to_string())
                .spawn(move || {
                    let outcome = this.execute_blocking(request);
                    if let Ok(on_complete) = rx.recv() {
                        on_complete(outcome);
                    }
                });
            match spawned {
                Ok(_) => {
                    // The worker only ever receives one callback.
                    let _ = tx.send(on_complete);
                }
                Err(err) => {
                    error!(error = %err, "failed to spawn transport worker");
                    on_complete(Err(ApiError::transport(CODE_SPAWN, err.to_string())));
                }
            }
        }
    }

    fn transport_error(err: ureq::Error) -> ApiError {
        let code = match &err {
            ureq::Error::Timeout(_) => CODE_TIMEOUT,
            ureq::Error::ConnectionFailed | ureq::Error::HostNotFound => CODE_CONNECT,
            ureq::Error::Io(_) => CODE_IO,
            _ => CODE_OTHER,
        };
        ApiError::transport(code, err.to_string())
    }
}

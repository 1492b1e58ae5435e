//! Client for the user REST backend.
//!
//! # Overview
//! `Api` fetches and updates a single user resource. It talks to an
//! injected `ApiManager`, so the same call sites run against the real
//! network (`HttpManager` over a `Transport`) or against canned JSON
//! (`SeededManager`) for deterministic UI tests.
//!
//! # Design
//! - Every operation completes once with an `ApiResult<T>`; failures share
//!   one `ApiError` shape whatever their origin.
//! - The backend reports business failures inside the payload
//!   (`{"error": {...}}`); `sanitize` turns those into `ApiError`s.
//! - Configuration problems are `ConfigError`s, raised once at startup by
//!   `Config` and never delivered through a completion.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod manager;
pub mod result;
pub mod sanitize;
pub mod seeded;
pub mod transport;
pub mod types;

pub use client::Api;
pub use config::{BackendMode, Config};
pub use endpoint::{BaseUrl, Endpoint};
pub use error::{ApiError, ConfigError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use manager::{ApiManager, ApiRequest, Completion, HttpManager};
pub use result::ApiResult;
pub use seeded::{SeedStore, SeededManager};
pub use transport::Transport;
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
pub use types::{Parameters, User};

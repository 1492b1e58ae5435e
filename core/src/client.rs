//! The public face of the user API.
//!
//! # Design
//! `Api` holds nothing but the `ApiManager` it was given, so the same call
//! sites run against the network or against seeded JSON depending only on
//! what the composition root injected. Each call issues one request and
//! completes exactly once; nothing is retried.

use std::sync::Arc;

use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::manager::ApiManager;
use crate::result::ApiResult;
use crate::sanitize::sanitize_error;
use crate::types::User;

#[derive(Clone)]
pub struct Api {
    manager: Arc<dyn ApiManager>,
}

impl Api {
    pub fn new(manager: Arc<dyn ApiManager>) -> Self {
        Self { manager }
    }

    /// Fetch a user by id.
    pub fn get_user_info<F>(&self, user_id: &str, completion: F)
    where
        F: FnOnce(ApiResult<User>) + Send + 'static,
    {
        let endpoint = Endpoint::GetUserInfo {
            user_id: user_id.to_string(),
        };
        self.manager
            .api_request_plain(&endpoint)
            .api_response(Box::new(move |result| completion(result.and_then(decode_user))));
    }

    /// Store `user` and receive the backend's copy.
    pub fn update_user_info<F>(&self, user: &User, completion: F)
    where
        F: FnOnce(ApiResult<User>) + Send + 'static,
    {
        let endpoint = Endpoint::UpdateUserInfo {
            user_id: user.user_id().to_string(),
        };
        self.manager
            .api_request_with(&endpoint, user.to_parameters())
            .api_response(Box::new(move |result| completion(result.and_then(decode_user))));
    }
}

/// Map a success envelope to the `User` under `data`.
///
/// Error envelopes that reached this point unsanitized (seeded responses)
/// fail the same way they would over the network. A missing or partial
/// `data` object yields a user with defaulted fields.
fn decode_user(json: Value) -> ApiResult<User> {
    let json = sanitize_error(json)?;
    Ok(User::from_json(&json["data"]))
}

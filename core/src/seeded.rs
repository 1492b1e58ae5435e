//! Deterministic backend that answers from canned JSON.
//!
//! # Design
//! A `SeedStore` maps exact request URLs to literal response bodies in the
//! same envelope the real backend uses. `SeededManager` ignores parameters
//! and headers and never touches the network; its requests complete inline.
//! A URL with no seed, or a seed that is not JSON, means the test environment
//! is broken, so those cases panic instead of producing an `ApiError`.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::endpoint::{BaseUrl, Endpoint};
use crate::http::Headers;
use crate::manager::{ApiManager, ApiRequest, Completion};
use crate::types::Parameters;

/// URL -> JSON response body.
#[derive(Debug, Clone, Default)]
pub struct SeedStore {
    entries: HashMap<String, String>,
}

impl SeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the process environment. Every variable is a candidate seed;
    /// lookups only ever use full URLs as keys. Non-UTF-8 entries are skipped.
    pub fn from_env() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.entries.insert(url.into(), body.into());
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SeedStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

pub struct SeededManager {
    base_url: BaseUrl,
    store: Arc<SeedStore>,
}

impl SeededManager {
    pub fn new(base_url: BaseUrl, store: SeedStore) -> Self {
        Self {
            base_url,
            store: Arc::new(store),
        }
    }
}

impl ApiManager for SeededManager {
    fn api_request(
        &self,
        endpoint: &Endpoint,
        _parameters: Option<Parameters>,
        _headers: Option<Headers>,
    ) -> Box<dyn ApiRequest> {
        Box::new(SeededRequest {
            url: endpoint.url(&self.base_url),
            store: Arc::clone(&self.store),
        })
    }
}

pub struct SeededRequest {
    url: Url,
    store: Arc<SeedStore>,
}

impl SeededRequest {
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ApiRequest for SeededRequest {
    /// Resolve the seed for this URL and complete inline with `Ok`.
    ///
    /// # Panics
    ///
    /// Panics if the store has no entry for the URL, or if the entry is not
    /// valid JSON.
    fn api_response(self: Box<Self>, completion: Completion<Value>) {
        let url = self.url.as_str();
        let Some(seed) = self.store.get(url) else {
            panic!("no seeded response for {url}");
        };
        let json = match serde_json::from_str::<Value>(seed) {
            Ok(json) => json,
            Err(err) => panic!("seeded response for {url} is not valid JSON: {err}"),
        };
        debug!(%url, "serving seeded response");
        completion(Ok(json));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::result::ApiResult;

    const URL: &str = "http://localhost:3000/user/plokmijn";

    fn manager(store: SeedStore) -> SeededManager {
        SeededManager::new(BaseUrl::parse("http://localhost:3000").unwrap(), store)
    }

    fn endpoint() -> Endpoint {
        Endpoint::GetUserInfo {
            user_id: "plokmijn".to_string(),
        }
    }

    #[test]
    fn store_collects_from_pairs() {
        let store: SeedStore = [(URL, "{}")].into_iter().collect();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(URL), Some("{}"));
        assert!(store.get("http://localhost:3000/user/other").is_none());
    }

    #[test]
    fn request_is_bound_to_endpoint_url() {
        let request = SeededRequest {
            url: endpoint().url(&BaseUrl::parse("http://localhost:3000").unwrap()),
            store: Arc::new(SeedStore::new()),
        };
        assert_eq!(request.url().as_str(), URL);
    }

    #[test]
    fn seeded_response_is_delivered_inline() {
        let mut store = SeedStore::new();
        store.insert(URL, r#"{"data":{"userId":"plokmijn"}}"#);
        let slot: Arc<Mutex<Option<ApiResult<Value>>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&slot);

        manager(store)
            .api_request(&endpoint(), Some(Parameters::new()), Some(Vec::new()))
            .api_response(Box::new(move |result| {
                *sink.lock().unwrap() = Some(result);
            }));

        // Completion already ran: no waiting needed.
        let result = slot.lock().unwrap().take().unwrap();
        assert_eq!(result, Ok(json!({"data": {"userId": "plokmijn"}})));
    }

    #[test]
    fn seeded_error_envelope_is_not_sanitized() {
        let store: SeedStore = [(URL, r#"{"error":{"code":1,"message":"x"}}"#)]
            .into_iter()
            .collect();
        let slot = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&slot);
        manager(store)
            .api_request_plain(&endpoint())
            .api_response(Box::new(move |result| {
                *sink.lock().unwrap() = Some(result);
            }));
        let result = slot.lock().unwrap().take().unwrap();
        assert!(result.unwrap().get("error").is_some());
    }

    #[test]
    #[should_panic(expected = "no seeded response for http://localhost:3000/user/plokmijn")]
    fn missing_seed_panics() {
        manager(SeedStore::new())
            .api_request_plain(&endpoint())
            .api_response(Box::new(|_| {}));
    }

    #[test]
    #[should_panic(expected = "is not valid JSON")]
    fn malformed_seed_panics() {
        let store: SeedStore = [(URL, "{oops")].into_iter().collect();
        manager(store)
            .api_request_plain(&endpoint())
            .api_response(Box::new(|_| {}));
    }
}

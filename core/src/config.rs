//! Host configuration and backend selection.
//!
//! # Design
//! `build_manager` is the one place that knows about test mode. Everything
//! downstream receives an `Arc<dyn ApiManager>` and cannot tell the network
//! backend from the seeded one.

use std::sync::Arc;

use tracing::info;

use crate::endpoint::BaseUrl;
use crate::error::ConfigError;
use crate::manager::ApiManager;
use crate::seeded::{SeedStore, SeededManager};

/// Environment variable holding the backend base url.
pub const BASE_URL_VAR: &str = "USER_API_BASE_URL";

/// Launch argument that switches to the seeded backend.
pub const UI_TESTING_FLAG: &str = "--ui-testing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Network,
    Seeded,
}

impl BackendMode {
    /// `Seeded` if any launch argument is the UI testing flag.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let seeded = args.into_iter().any(|arg| arg.as_ref() == UI_TESTING_FLAG);
        if seeded {
            BackendMode::Seeded
        } else {
            BackendMode::Network
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: BaseUrl,
    pub mode: BackendMode,
}

impl Config {
    /// Read the base url from [`BASE_URL_VAR`] and the mode from the process
    /// launch arguments.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var(BASE_URL_VAR).ok();
        Self::from_parts(base_url.as_deref(), std::env::args())
    }

    pub fn from_parts<I, S>(base_url: Option<&str>, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base_url = base_url.ok_or(ConfigError::MissingBaseUrl(BASE_URL_VAR))?;
        Ok(Self {
            base_url: BaseUrl::parse(base_url)?,
            mode: BackendMode::from_args(args),
        })
    }
}

/// Construct the backend selected by `config`.
///
/// `seeds` is only consulted in seeded mode.
#[cfg(feature = "ureq-transport")]
pub fn build_manager(config: &Config, seeds: SeedStore) -> Arc<dyn ApiManager> {
    use crate::manager::HttpManager;
    use crate::transport::UreqTransport;

    match config.mode {
        BackendMode::Network => {
            info!(base_url = %config.base_url, "using network backend");
            Arc::new(HttpManager::new(config.base_url.clone(), UreqTransport::new()))
        }
        BackendMode::Seeded => build_seeded(config, seeds),
    }
}

/// Like `build_manager`, for builds without a bundled transport: the
/// network backend is supplied by the caller.
pub fn build_manager_with<F>(config: &Config, seeds: SeedStore, network: F) -> Arc<dyn ApiManager>
where
    F: FnOnce(BaseUrl) -> Arc<dyn ApiManager>,
{
    match config.mode {
        BackendMode::Network => network(config.base_url.clone()),
        BackendMode::Seeded => build_seeded(config, seeds),
    }
}

fn build_seeded(config: &Config, seeds: SeedStore) -> Arc<dyn ApiManager> {
    info!(base_url = %config.base_url, seeds = seeds.len(), "using seeded backend");
    Arc::new(SeededManager::new(config.base_url.clone(), seeds))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn mode_defaults_to_network() {
        assert_eq!(BackendMode::from_args(["user-cli", "get"]), BackendMode::Network);
    }

    #[test]
    fn ui_testing_flag_selects_seeded() {
        assert_eq!(
            BackendMode::from_args(["app", "--ui-testing"]),
            BackendMode::Seeded
        );
    }

    #[test]
    fn only_the_exact_flag_selects_seeded() {
        assert_eq!(BackendMode::from_args(["app", "UI Testing"]), BackendMode::Network);
        assert_eq!(BackendMode::from_args(["app", "--ui-testing=1"]), BackendMode::Network);
    }

    #[test]
    fn missing_base_url_is_config_error() {
        let err = Config::from_parts(None, ["app"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl(BASE_URL_VAR)));
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = Config::from_parts(Some("::::"), ["app"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn seeded_mode_ignores_network_factory() {
        let config = Config::from_parts(Some("http://localhost:3000"), ["--ui-testing"]).unwrap();
        let seeds: SeedStore = [("http://localhost:3000/user/a", r#"{"data":null}"#)]
            .into_iter()
            .collect();
        let manager = build_manager_with(&config, seeds, |_| {
            panic!("network backend must not be built in seeded mode")
        });

        let seen = std::sync::Arc::new(Mutex::new(None));
        let sink = std::sync::Arc::clone(&seen);
        let endpoint = crate::endpoint::Endpoint::GetUserInfo {
            user_id: "a".to_string(),
        };
        manager
            .api_request_plain(&endpoint)
            .api_response(Box::new(move |result| *sink.lock().unwrap() = Some(result)));
        assert!(seen.lock().unwrap().take().unwrap().is_ok());
    }

    #[test]
    fn network_mode_ignores_seeds() {
        let config = Config::from_parts(Some("http://localhost:3000"), ["app"]).unwrap();
        let seeds: SeedStore = [("http://localhost:3000/user/a", r#"{"data":null}"#)]
            .into_iter()
            .collect();
        let built = std::sync::Arc::new(Mutex::new(false));
        let sink = std::sync::Arc::clone(&built);
        let _manager = build_manager_with(&config, seeds, move |base| {
            *sink.lock().unwrap() = true;
            Arc::new(SeededManager::new(base, SeedStore::new()))
        });
        assert!(*built.lock().unwrap());
    }

    #[test]
    fn network_mode_calls_network_factory() {
        let config = Config::from_parts(Some("http://localhost:3000"), ["app"]).unwrap();
        let called = std::sync::Arc::new(Mutex::new(None));
        let sink = std::sync::Arc::clone(&called);
        let _manager = build_manager_with(&config, SeedStore::new(), move |base| {
            *sink.lock().unwrap() = Some(base.to_string());
            Arc::new(SeededManager::new(base, SeedStore::new()))
        });
        assert_eq!(
            called.lock().unwrap().as_deref(),
            Some("http://localhost:3000/")
        );
    }
}

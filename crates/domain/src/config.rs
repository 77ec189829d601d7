//! Configuration structures
//!
//! Every field has a documented default so partial TOML/JSON files and
//! environment overlays work. Credentials are passed into the token manager
//! through [`BrokerConfig`] rather than living in module constants, which
//! lets one process drive several controllers or realms.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ADMIN_CLIENT_ID, DEFAULT_ADMIN_REALM, DEFAULT_APP_CLIENT_ID, DEFAULT_APP_REALM,
    DEFAULT_BROKER_MAX_ATTEMPTS, DEFAULT_CONTROLLER_MAX_ATTEMPTS, DEFAULT_PASSWORD, DEFAULT_SCOPE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USERNAME, DEFAULT_WAIT_TIMEOUT_SECS, KEYCLOAK_PROXY_PATH,
};
use crate::errors::{EdaError, Result};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub controller: ControllerConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
}

impl Config {
    /// Configuration for `base_url` with every other field defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            controller: ControllerConfig { base_url: base_url.into(), ..Default::default() },
            broker: BrokerConfig::default(),
        }
    }

    /// Effective identity broker URL.
    ///
    /// Falls back to the controller's Keycloak proxy when no explicit broker
    /// URL is configured.
    pub fn broker_url(&self) -> String {
        match self.broker.url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("{}{}", self.controller.base_url(), KEYCLOAK_PROXY_PATH),
        }
    }

    /// Reject configurations that cannot possibly work.
    ///
    /// # Errors
    /// Returns `EdaError::Config` for an empty base URL, empty credentials,
    /// empty realm/client identifiers or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.controller.base_url.trim().is_empty() {
            return Err(EdaError::Config("controller.base_url must not be empty".into()));
        }
        if self.controller.timeout_secs == 0 || self.controller.wait_timeout_secs == 0 {
            return Err(EdaError::Config("controller timeouts must be greater than zero".into()));
        }

        let broker = &self.broker;
        let required = [
            ("broker.admin_realm", &broker.admin_realm),
            ("broker.admin_client_id", &broker.admin_client_id),
            ("broker.app_realm", &broker.app_realm),
            ("broker.app_client_id", &broker.app_client_id),
            ("broker.username", &broker.username),
            ("broker.password", &broker.password),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(EdaError::Config(format!("{name} must not be empty")));
            }
        }

        Ok(())
    }
}

/// Controller (transaction API) settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Controller base URL, e.g. `https://eda.example.net`
    pub base_url: String,
    /// Deadline for ordinary requests (submit, token calls)
    pub timeout_secs: u64,
    /// Deadline for the blocking wait-for-completion details request
    pub wait_timeout_secs: u64,
    /// Total attempts per controller request; 1 means never resubmit
    pub max_attempts: usize,
    /// Skip TLS certificate verification (self-signed lab deployments)
    pub accept_invalid_certs: bool,
}

impl ControllerConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            max_attempts: DEFAULT_CONTROLLER_MAX_ATTEMPTS,
            accept_invalid_certs: false,
        }
    }
}

/// Identity broker settings and the fixed administrative identity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Broker base URL; defaults to the controller's Keycloak proxy
    pub url: Option<String>,
    /// Realm holding the administrative user (`master`)
    pub admin_realm: String,
    /// Public client used for the administrative password grant (`admin-cli`)
    pub admin_client_id: String,
    /// Realm of the target application (`eda`)
    pub app_realm: String,
    /// Client id of the target application inside `app_realm` (`eda`)
    pub app_client_id: String,
    /// Administrative username (`admin`)
    pub username: String,
    /// Administrative password (`admin`)
    pub password: String,
    /// Scope requested for the application token (`openid`)
    pub scope: String,
    /// Total attempts per broker request
    pub max_attempts: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            url: None,
            admin_realm: DEFAULT_ADMIN_REALM.to_string(),
            admin_client_id: DEFAULT_ADMIN_CLIENT_ID.to_string(),
            app_realm: DEFAULT_APP_REALM.to_string(),
            app_client_id: DEFAULT_APP_CLIENT_ID.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            max_attempts: DEFAULT_BROKER_MAX_ATTEMPTS,
        }
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("url", &self.url)
            .field("admin_realm", &self.admin_realm)
            .field("admin_client_id", &self.admin_client_id)
            .field("app_realm", &self.app_realm)
            .field("app_client_id", &self.app_client_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("scope", &self.scope)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broker_url_defaults_to_keycloak_proxy() {
        let config = Config::new("https://eda.example.net/");
        assert_eq!(config.broker_url(), "https://eda.example.net/core/httpproxy/v1/keycloak");
    }

    #[test]
    fn explicit_broker_url_wins() {
        let mut config = Config::new("https://eda.example.net");
        config.broker.url = Some("https://sso.example.net/".to_string());
        assert_eq!(config.broker_url(), "https://sso.example.net");
    }

    #[test]
    fn defaults_match_stock_deployment() {
        let broker = BrokerConfig::default();
        assert_eq!(broker.admin_realm, "master");
        assert_eq!(broker.admin_client_id, "admin-cli");
        assert_eq!(broker.app_realm, "eda");
        assert_eq!(broker.app_client_id, "eda");
        assert_eq!(broker.scope, "openid");

        let controller = ControllerConfig::default();
        assert_eq!(controller.max_attempts, 1);
        assert!(!controller.accept_invalid_certs);
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(EdaError::Config(_))));
    }

    #[test]
    fn validate_rejects_empty_password() {
        let mut config = Config::new("https://eda.example.net");
        config.broker.password = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("broker.password"));
    }

    #[test]
    fn debug_redacts_password() {
        let mut broker = BrokerConfig::default();
        broker.password = "hunter2".to_string();
        let rendered = format!("{broker:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[controller]
base_url = "https://eda.lab"
accept_invalid_certs = true
"#,
        )
        .unwrap();

        assert_eq!(config.controller.base_url, "https://eda.lab");
        assert!(config.controller.accept_invalid_certs);
        assert_eq!(config.controller.timeout_secs, 30);
        assert_eq!(config.broker.app_realm, "eda");
    }
}

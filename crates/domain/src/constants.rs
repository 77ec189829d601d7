//! Protocol constants
//!
//! Endpoint paths and identity-broker defaults shared by the client crates.

// Controller endpoints (relative to the controller base URL)
pub const TRANSACTION_PATH: &str = "/core/transaction/v1";
pub const TRANSACTION_DETAILS_PATH: &str = "/core/transaction/v1/details";
pub const WAIT_FOR_COMPLETE_PARAM: &str = "waitForComplete";

// Identity broker, reached through the controller's HTTP proxy by default
pub const KEYCLOAK_PROXY_PATH: &str = "/core/httpproxy/v1/keycloak";
pub const DEFAULT_ADMIN_REALM: &str = "master";
pub const DEFAULT_ADMIN_CLIENT_ID: &str = "admin-cli";
pub const DEFAULT_APP_REALM: &str = "eda";
pub const DEFAULT_APP_CLIENT_ID: &str = "eda";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin";
pub const DEFAULT_SCOPE: &str = "openid";
pub const PASSWORD_GRANT_TYPE: &str = "password";

// Transport defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_CONTROLLER_MAX_ATTEMPTS: usize = 1;
pub const DEFAULT_BROKER_MAX_ATTEMPTS: usize = 3;

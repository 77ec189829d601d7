//! Wiring of the HTTP adapters into a [`TransactionClient`].

use std::sync::Arc;

use eda_core::TransactionClient;
use eda_domain::{Config, Result};
use tracing::info;

use crate::auth::KeycloakTokenManager;
use crate::controller::ControllerClient;

/// Build an unauthenticated [`TransactionClient`] for `config`.
///
/// No network call is made; the token flow runs on the first commit or an
/// explicit `authenticate()`.
///
/// # Errors
/// Returns `EdaError::Config` when the configuration is invalid.
pub fn connect(config: &Config) -> Result<TransactionClient> {
    config.validate()?;

    let tokens = KeycloakTokenManager::from_config(config)?;
    let gateway = ControllerClient::from_config(config)?;
    info!(
        controller = %gateway.base_url(),
        broker = %tokens.broker_url(),
        realm = %config.broker.app_realm,
        "Configured EDA client"
    );

    Ok(TransactionClient::new(Arc::new(tokens), Arc::new(gateway)))
}

#[cfg(test)]
mod tests {
    use eda_core::ClientState;
    use eda_domain::EdaError;

    use super::*;

    #[test]
    fn connect_starts_unauthenticated() {
        let client = connect(&Config::new("https://eda.example.net")).unwrap();
        assert_eq!(client.state(), &ClientState::Unauthenticated);
    }

    #[test]
    fn connect_rejects_empty_credentials() {
        let mut config = Config::new("https://eda.example.net");
        config.broker.password.clear();
        assert!(matches!(connect(&config), Err(EdaError::Config(_))));
    }
}

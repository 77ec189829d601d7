//! Application context - configuration and client wiring

use std::path::Path;

use anyhow::Context;
use eda_core::TransactionClient;
use eda_domain::Config;
use eda_infra::{config, KeycloakTokenManager};

/// Everything a command needs to reach the controller.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
}

impl AppContext {
    /// Load configuration from `path`, or from the environment and the
    /// standard file locations when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let config = config::load_from_file(Some(path.to_path_buf()))
                    .with_context(|| format!("loading {}", path.display()))?;
                config.validate()?;
                config
            }
            None => config::load()
                .context("loading configuration from EDA_* variables or eda.toml (see --config)")?,
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn token_manager(&self) -> anyhow::Result<KeycloakTokenManager> {
        Ok(KeycloakTokenManager::from_config(&self.config)?)
    }

    pub fn transaction_client(&self) -> anyhow::Result<TransactionClient> {
        Ok(eda_infra::connect(&self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;

    #[test]
    fn loads_explicit_config_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[controller]\nbase_url = \"https://eda.example.net\"").unwrap();

        let context = AppContext::load(Some(file.path())).unwrap();
        assert_eq!(context.config.controller.base_url, "https://eda.example.net");
        assert!(context.transaction_client().is_ok());
    }

    #[test]
    fn rejects_invalid_config_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[controller]\nbase_url = \"\"").unwrap();

        let err = AppContext::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("base_url"), "{err}");
    }
}

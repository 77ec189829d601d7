//! Keycloak token exchange
//!
//! Turns the fixed administrative identity into an application-scoped
//! bearer token in four round trips:
//! 1. Password grant against the administrative realm
//! 2. List clients of the application realm, find the application client
//! 3. Fetch that client's secret
//! 4. Password grant against the application realm using the secret
//!
//! Every call performs the full exchange. Nothing is cached; callers decide
//! when to re-authenticate.

use std::time::Duration;

use async_trait::async_trait;
use eda_core::AccessTokenProvider;
use eda_domain::constants::PASSWORD_GRANT_TYPE;
use eda_domain::{AuthStage, BrokerConfig, Config, EdaError, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::http::HttpClient;

const MAX_ERROR_BODY: usize = 512;

/// Form body of an OAuth2 password grant.
#[derive(Serialize)]
struct PasswordGrant<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientRepresentation {
    id: String,
    client_id: Option<String>,
}

#[derive(Deserialize)]
struct ClientSecret {
    value: Option<String>,
}

/// Acquires application tokens from a Keycloak broker.
#[derive(Clone)]
pub struct KeycloakTokenManager {
    http: HttpClient,
    broker_url: String,
    config: BrokerConfig,
}

impl std::fmt::Debug for KeycloakTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakTokenManager")
            .field("broker_url", &self.broker_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl KeycloakTokenManager {
    /// Create a token manager talking to `broker_url`.
    pub fn new(broker_url: impl Into<String>, config: BrokerConfig, http: HttpClient) -> Self {
        let broker_url = broker_url.into().trim_end_matches('/').to_string();
        Self { http, broker_url, config }
    }

    /// Build a token manager and its HTTP client from configuration.
    ///
    /// # Errors
    /// Returns `EdaError::Config` if the broker URL is not a valid URL, or
    /// `EdaError::Internal` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let broker_url = config.broker_url();
        url::Url::parse(&broker_url)
            .map_err(|e| EdaError::Config(format!("invalid broker URL `{broker_url}`: {e}")))?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.controller.timeout_secs))
            .max_attempts(config.broker.max_attempts)
            .accept_invalid_certs(config.controller.accept_invalid_certs)
            .build()?;

        Ok(Self::new(broker_url, config.broker.clone(), http))
    }

    pub fn broker_url(&self) -> &str {
        &self.broker_url
    }

    /// Run the four-step exchange and return the application token.
    ///
    /// # Errors
    /// Returns `EdaError::Auth` naming the failed stage.
    #[instrument(
        skip(self),
        fields(realm = %self.config.app_realm, client_id = %self.config.app_client_id)
    )]
    pub async fn acquire_token(&self) -> Result<String> {
        let admin_token = self.admin_token().await?;
        let client_uuid = self.find_client(&admin_token).await?;
        let secret = self.client_secret(&admin_token, &client_uuid).await?;
        let token = self.app_token(&secret).await?;
        debug!(token_len = token.len(), "Acquired application token");
        Ok(token)
    }

    async fn admin_token(&self) -> Result<String> {
        let stage = AuthStage::AdminToken;
        debug!(stage = %stage, realm = %self.config.admin_realm, "Requesting admin token");

        let form = PasswordGrant {
            grant_type: PASSWORD_GRANT_TYPE,
            client_id: &self.config.admin_client_id,
            username: &self.config.username,
            password: &self.config.password,
            scope: None,
            client_secret: None,
        };
        let request =
            self.http.request(Method::POST, self.token_url(&self.config.admin_realm)).form(&form);

        let body: TokenResponse = self.fetch(request, stage).await?;
        non_empty(body.access_token, stage, "response has no access_token")
    }

    async fn find_client(&self, admin_token: &str) -> Result<String> {
        let stage = AuthStage::ClientLookup;
        debug!(stage = %stage, "Listing realm clients");

        let request = self.http.request(Method::GET, self.clients_url()).bearer_auth(admin_token);
        let clients: Vec<ClientRepresentation> = self.fetch(request, stage).await?;

        let wanted = self.config.app_client_id.as_str();
        let client = clients
            .into_iter()
            .find(|client| client.client_id.as_deref() == Some(wanted))
            .ok_or_else(|| {
                EdaError::auth(
                    stage,
                    format!("client `{wanted}` not found in realm `{}`", self.config.app_realm),
                )
            })?;

        debug!(stage = %stage, client_uuid = %client.id, "Resolved application client");
        Ok(client.id)
    }

    async fn client_secret(&self, admin_token: &str, client_uuid: &str) -> Result<String> {
        let stage = AuthStage::SecretFetch;
        debug!(stage = %stage, "Fetching client secret");

        let url =
            format!("{}/{}/client-secret", self.clients_url(), urlencoding::encode(client_uuid));
        let request = self.http.request(Method::GET, url).bearer_auth(admin_token);

        let body: ClientSecret = self.fetch(request, stage).await?;
        non_empty(body.value, stage, "response has no secret value")
    }

    async fn app_token(&self, client_secret: &str) -> Result<String> {
        let stage = AuthStage::AppToken;
        debug!(stage = %stage, realm = %self.config.app_realm, "Requesting application token");

        let form = PasswordGrant {
            grant_type: PASSWORD_GRANT_TYPE,
            client_id: &self.config.app_client_id,
            username: &self.config.username,
            password: &self.config.password,
            scope: Some(self.config.scope.as_str()),
            client_secret: Some(client_secret),
        };
        let request =
            self.http.request(Method::POST, self.token_url(&self.config.app_realm)).form(&form);

        let body: TokenResponse = self.fetch(request, stage).await?;
        non_empty(body.access_token, stage, "response has no access_token")
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        stage: AuthStage,
    ) -> Result<T> {
        let response = self
            .http
            .send(request)
            .await
            .map_err(|err| EdaError::auth(stage, err.to_string()))?;
        parse(response, stage).await
    }

    fn token_url(&self, realm: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.broker_url,
            urlencoding::encode(realm)
        )
    }

    fn clients_url(&self) -> String {
        format!(
            "{}/admin/realms/{}/clients",
            self.broker_url,
            urlencoding::encode(&self.config.app_realm)
        )
    }
}

#[async_trait]
impl AccessTokenProvider for KeycloakTokenManager {
    async fn access_token(&self) -> Result<String> {
        self.acquire_token().await
    }
}

async fn parse<T: DeserializeOwned>(response: Response, stage: AuthStage) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EdaError::auth(
            stage,
            format!("HTTP {}: {}", status.as_u16(), truncate(&body, MAX_ERROR_BODY)),
        ));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| EdaError::auth(stage, format!("malformed response: {e}")))
}

fn non_empty(value: Option<String>, stage: AuthStage, missing: &str) -> Result<String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| EdaError::auth(stage, missing))
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

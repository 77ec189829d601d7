//! Controller transaction API over HTTP
//!
//! `POST {base}/core/transaction/v1` submits a transaction and answers with
//! `{"id": ...}`. `GET {base}/core/transaction/v1/details/{id}` with
//! `waitForComplete=true` blocks until the controller reaches a terminal
//! state, so it runs with its own, longer deadline.

use std::time::Duration;

use async_trait::async_trait;
use eda_core::TransactionGateway;
use eda_domain::constants::{TRANSACTION_DETAILS_PATH, TRANSACTION_PATH, WAIT_FOR_COMPLETE_PARAM};
use eda_domain::{
    Config, EdaError, Result, SubmitResponse, Transaction, TransactionDetails, TransactionId,
};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::errors::InfraError;
use crate::http::HttpClient;

/// HTTP adapter for the controller's transaction endpoints.
#[derive(Debug, Clone)]
pub struct ControllerClient {
    http: HttpClient,
    base_url: String,
    wait_timeout: Duration,
}

impl ControllerClient {
    pub fn new(base_url: impl Into<String>, http: HttpClient, wait_timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, wait_timeout }
    }

    /// Build the adapter and its HTTP client from configuration.
    ///
    /// # Errors
    /// Returns `EdaError::Config` if the base URL is not a valid URL.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.controller.base_url();
        url::Url::parse(base_url)
            .map_err(|e| EdaError::Config(format!("invalid controller URL `{base_url}`: {e}")))?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.controller.timeout_secs))
            .max_attempts(config.controller.max_attempts)
            .accept_invalid_certs(config.controller.accept_invalid_certs)
            .build()?;

        Ok(Self::new(base_url, http, Duration::from_secs(config.controller.wait_timeout_secs)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn details_url(&self, id: &TransactionId) -> String {
        let id = id.to_string();
        format!("{}{}/{}", self.base_url, TRANSACTION_DETAILS_PATH, urlencoding::encode(&id))
    }
}

#[async_trait]
impl TransactionGateway for ControllerClient {
    #[instrument(skip(self, token, transaction), fields(operations = transaction.len()))]
    async fn submit(&self, token: &str, transaction: &Transaction) -> Result<SubmitResponse> {
        let url = format!("{}{}", self.base_url, TRANSACTION_PATH);
        debug!(url = %url, "Submitting transaction");

        let request = self.http.request(Method::POST, &url).bearer_auth(token).json(transaction);
        let response = self.http.send(request).await?;
        read_json(response).await
    }

    #[instrument(skip(self, token, id), fields(id = %id))]
    async fn details(&self, token: &str, id: &TransactionId) -> Result<TransactionDetails> {
        let url = self.details_url(id);
        debug!(url = %url, wait_timeout = ?self.wait_timeout, "Waiting for transaction details");

        let request = self
            .http
            .request(Method::GET, &url)
            .query(&[(WAIT_FOR_COMPLETE_PARAM, "true")])
            .bearer_auth(token)
            .timeout(self.wait_timeout);
        let response = self.http.send(request).await?;
        read_json(response).await
    }
}

/// Map non-success statuses to `EdaError::Commit` and parse the body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(|err| EdaError::from(InfraError::from(err)))?;

    if !status.is_success() {
        return Err(EdaError::Commit { status: status.as_u16(), body });
    }

    serde_json::from_str(&body).map_err(|err| EdaError::from(InfraError::from(err)))
}

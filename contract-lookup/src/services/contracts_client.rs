//! Client for the contracts search API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use service_core::observability::TracedClientExt;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ContractsApiSettings;
use crate::models::{ContractSummaryQuery, ContractSummaryResponse, LineQuery, LineSearchResponse};

/// Per-request correlation header expected by the contracts API.
pub const REQUEST_ID_HEADER: &str = "Request-Id";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Please login or enable Demo Mode.")]
    Unauthenticated,

    #[error("API Error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    #[error("Network error: {0}")]
    Network(#[source] anyhow::Error),

    #[error("Invalid response from contracts API: {0}")]
    InvalidResponse(#[source] anyhow::Error),
}

impl SearchError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Unauthenticated => "unauthenticated",
            SearchError::Api { .. } => "api_error",
            SearchError::Network(_) => "network_error",
            SearchError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// The two upstream search calls. Each call is attempted exactly once.
#[async_trait]
pub trait ContractsApi: Send + Sync {
    async fn search_contracts(
        &self,
        query: &ContractSummaryQuery,
        token: &str,
    ) -> Result<ContractSummaryResponse, SearchError>;

    async fn search_lines(
        &self,
        query: &LineQuery,
        token: &str,
    ) -> Result<LineSearchResponse, SearchError>;
}

pub struct ContractsClient {
    client: Client,
    settings: ContractsApiSettings,
}

impl ContractsClient {
    pub fn new(settings: ContractsApiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }

    async fn post_search<B, R>(&self, path: &str, body: &B, token: &str) -> Result<R, SearchError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send,
    {
        let url = format!("{}{}", self.base_url(), path);
        let request_id = Uuid::new_v4().to_string();

        let response = self
            .client
            .traced_post(&url)
            .bearer_auth(token)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, request_id = %request_id, error = %e, "Contracts API request failed");
                SearchError::Network(anyhow::Error::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                url = %url,
                request_id = %request_id,
                status = %status,
                "Contracts API returned an error status"
            );
            return Err(SearchError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response.json::<R>().await.map_err(|e| {
            if e.is_decode() {
                tracing::error!(url = %url, request_id = %request_id, error = %e, "Failed to decode contracts API response");
                SearchError::InvalidResponse(anyhow::Error::new(e))
            } else {
                tracing::error!(url = %url, request_id = %request_id, error = %e, "Failed to read contracts API response");
                SearchError::Network(anyhow::Error::new(e))
            }
        })
    }
}

#[async_trait]
impl ContractsApi for ContractsClient {
    #[tracing::instrument(skip_all)]
    async fn search_contracts(
        &self,
        query: &ContractSummaryQuery,
        token: &str,
    ) -> Result<ContractSummaryResponse, SearchError> {
        self.post_search("/search/contractSummary", query, token).await
    }

    #[tracing::instrument(skip_all)]
    async fn search_lines(
        &self,
        query: &LineQuery,
        token: &str,
    ) -> Result<LineSearchResponse, SearchError> {
        self.post_search("/search/lines", query, token).await
    }
}

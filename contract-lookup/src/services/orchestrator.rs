//! Dispatches the three search flows to demo fixtures or the live API.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;

use crate::models::{ApiRequest, Mode, SearchCriteria, SearchResults, Tab};
use crate::services::contracts_client::{ContractsApi, SearchError};
use crate::services::{fixtures, metrics};

pub struct SearchOrchestrator {
    api: Arc<dyn ContractsApi>,
    demo_latency: Duration,
}

impl SearchOrchestrator {
    pub fn new(api: Arc<dyn ContractsApi>, demo_latency: Duration) -> Self {
        Self { api, demo_latency }
    }

    /// Run one search.
    ///
    /// `mode` is the session's mode at the moment the search starts; toggling
    /// afterwards does not affect this call. Live mode without a token fails
    /// before any request is made.
    #[tracing::instrument(skip_all, fields(mode = mode.as_str(), tab = %tab))]
    pub async fn search(
        &self,
        mode: Mode,
        token: Option<&SecretString>,
        tab: Tab,
        raw_criteria: &str,
    ) -> Result<SearchResults, SearchError> {
        let criteria = SearchCriteria::from_input(tab, raw_criteria);

        let outcome = match (mode, token) {
            (Mode::Demo, _) => Ok(self.demo_search(&criteria).await),
            (Mode::Live, None) => Err(SearchError::Unauthenticated),
            (Mode::Live, Some(token)) => self.live_search(criteria, token.expose_secret()).await,
        };

        match &outcome {
            Ok(results) => {
                tracing::info!(count = results.len(), "Search completed");
                metrics::record_search(tab, mode, "success");
            }
            Err(SearchError::Unauthenticated) => {
                tracing::info!("Live search rejected without a token");
                metrics::record_search(tab, mode, SearchError::Unauthenticated.kind());
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Search failed");
                metrics::record_search(tab, mode, e.kind());
            }
        }

        outcome
    }

    async fn demo_search(&self, criteria: &SearchCriteria) -> SearchResults {
        tokio::time::sleep(self.demo_latency).await;

        match criteria.tab() {
            Tab::BillTo => SearchResults::Contracts(fixtures::contracts()),
            Tab::Contract | Tab::Serial => SearchResults::Lines(fixtures::lines()),
        }
    }

    async fn live_search(
        &self,
        criteria: SearchCriteria,
        token: &str,
    ) -> Result<SearchResults, SearchError> {
        match ApiRequest::from(criteria) {
            ApiRequest::ContractSummary(query) => self
                .api
                .search_contracts(&query, token)
                .await
                .map(|response| SearchResults::Contracts(response.contracts)),
            ApiRequest::Lines(query) => self
                .api
                .search_lines(&query, token)
                .await
                .map(|response| SearchResults::Lines(response.lines)),
        }
    }
}

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use config::Settings;
use services::{
    auth_handshake::AuthHandshake,
    contracts_client::{ContractsApi, ContractsClient},
    orchestrator::SearchOrchestrator,
};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state: the OAuth handshake and the search orchestrator.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthHandshake>,
    pub orchestrator: Arc<SearchOrchestrator>,
    /// Mode a new session starts in.
    pub demo_by_default: bool,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthHandshake>,
        orchestrator: Arc<SearchOrchestrator>,
        demo_by_default: bool,
    ) -> Self {
        Self {
            auth,
            orchestrator,
            demo_by_default,
        }
    }

    /// Wire the live clients from configuration.
    pub fn from_settings(settings: &Settings) -> Self {
        let api: Arc<dyn ContractsApi> =
            Arc::new(ContractsClient::new(settings.contracts_api.clone()));
        Self::with_api(settings, api)
    }

    /// Same as [`AppState::from_settings`] with a caller-supplied contracts API.
    pub fn with_api(settings: &Settings, api: Arc<dyn ContractsApi>) -> Self {
        let auth = Arc::new(AuthHandshake::new(settings.oauth.clone()));
        let orchestrator = Arc::new(SearchOrchestrator::new(
            api,
            Duration::from_millis(settings.demo.latency_ms),
        ));

        Self::new(auth, orchestrator, settings.demo.enabled_by_default)
    }
}

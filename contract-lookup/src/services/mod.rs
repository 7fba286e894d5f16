pub mod auth_handshake;
pub mod contracts_client;
pub mod fixtures;
pub mod metrics;
pub mod orchestrator;
pub mod session_storage;

//! Session-scoped key/value storage.
//!
//! Handlers use the cookie-bound `tower_sessions::Session`; unit tests and
//! tooling use [`MemoryStorage`].

use async_trait::async_trait;
use dashmap::DashMap;
use service_core::error::AppError;
use tower_sessions::Session;

use crate::models::LookupState;

/// Holds the PKCE verifier between `/login` and `/callback`.
pub const CODE_VERIFIER_KEY: &str = "code_verifier";
/// Holds the bearer token for the lifetime of the session.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Holds the serialized [`LookupState`].
pub const LOOKUP_STATE_KEY: &str = "lookup_state";

#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    /// Removes and returns the value, so a read-once consumer never sees it twice.
    async fn remove_item(&self, key: &str) -> Result<Option<String>, AppError>;
}

#[async_trait]
impl SessionStorage for Session {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        self.get::<String>(key)
            .await
            .map_err(|e| AppError::SessionError(anyhow::anyhow!("Failed to read {}: {}", key, e)))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.insert(key, value)
            .await
            .map_err(|e| AppError::SessionError(anyhow::anyhow!("Failed to write {}: {}", key, e)))
    }

    async fn remove_item(&self, key: &str) -> Result<Option<String>, AppError> {
        self.remove::<String>(key)
            .await
            .map_err(|e| AppError::SessionError(anyhow::anyhow!("Failed to remove {}: {}", key, e)))
    }
}

/// Process-local storage backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.items.get(key).map(|entry| entry.value().clone()))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.items.remove(key).map(|(_, value)| value))
    }
}

/// Read the session's lookup state, falling back to a fresh one.
pub async fn load_lookup_state<S: SessionStorage + ?Sized>(
    storage: &S,
    demo_by_default: bool,
) -> Result<LookupState, AppError> {
    let Some(raw) = storage.get_item(LOOKUP_STATE_KEY).await? else {
        return Ok(LookupState::new(demo_by_default));
    };

    match serde_json::from_str(&raw) {
        Ok(state) => Ok(state),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable lookup state");
            Ok(LookupState::new(demo_by_default))
        }
    }
}

pub async fn save_lookup_state<S: SessionStorage + ?Sized>(
    storage: &S,
    state: &LookupState,
) -> Result<(), AppError> {
    let raw = serde_json::to_string(state)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to encode lookup state: {}", e)))?;
    storage.set_item(LOOKUP_STATE_KEY, &raw).await
}

pub async fn reset_lookup_state<S: SessionStorage + ?Sized>(storage: &S) -> Result<(), AppError> {
    storage.remove_item(LOOKUP_STATE_KEY).await?;
    Ok(())
}

pub mod file;
pub mod memory;

use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::errors::ClientError;

/// The persisted credential pair. Either half may be absent ("logged out").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

/// Abstraction over where credentials live.
/// Implementations: FileStore (JSON on disk), MemoryStore (process-local).
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Credentials, ClientError>;

    fn save(&self, credentials: &Credentials) -> Result<(), ClientError>;

    fn clear(&self) -> Result<(), ClientError>;
}

/// Result of exchanging a refresh credential.
#[derive(Debug, Clone)]
pub struct Refreshed {
    pub access: String,
    /// Present when the backend rotates refresh tokens.
    pub refresh: Option<String>,
}

/// Sole owner of credential reads and writes.
///
/// Concurrent refreshes are serialised behind `refresh_lock`; a waiter whose
/// stale token has already been replaced reuses the new one instead of hitting
/// the backend again.
pub struct SessionManager {
    store: Box<dyn CredentialStore>,
    refresh_lock: Mutex<()>,
}

impl SessionManager {
    pub fn new(store: impl CredentialStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn access(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.load()?.access)
    }

    pub fn refresh_token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.load()?.refresh)
    }

    pub fn set_credentials(&self, access: &str, refresh: &str) -> Result<(), ClientError> {
        self.store.save(&Credentials {
            access: Some(access.to_string()),
            refresh: Some(refresh.to_string()),
        })
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.store.clear()
    }

    /// Obtain a fresh access credential after `stale` was rejected.
    ///
    /// `exchange` is called at most once per rejected token, no matter how many
    /// callers are waiting. A rejected exchange clears the session and yields
    /// [`ClientError::SessionInvalid`]; transport errors propagate and leave the
    /// stored credentials untouched.
    pub async fn refresh_with<F, Fut>(
        &self,
        stale: Option<&str>,
        exchange: F,
    ) -> Result<String, ClientError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Refreshed, ClientError>>,
    {
        let _guard = self.refresh_lock.lock().await;

        let current = self.store.load()?;
        match (current.access.as_deref(), stale) {
            (Some(now), Some(old)) if now != old => {
                tracing::debug!("Access token already refreshed by a concurrent request");
                return Ok(now.to_string());
            }
            (Some(now), None) => {
                tracing::debug!("Access token stored since the request was sent");
                return Ok(now.to_string());
            }
            (None, Some(_)) => {
                tracing::debug!("Session cleared by a concurrent request");
                return Err(ClientError::SessionInvalid);
            }
            _ => {}
        }

        let Some(refresh) = current.refresh.clone() else {
            tracing::warn!("No refresh token stored, clearing session");
            self.store.clear()?;
            return Err(ClientError::SessionInvalid);
        };

        match exchange(refresh).await {
            Ok(refreshed) => {
                self.store.save(&Credentials {
                    access: Some(refreshed.access.clone()),
                    refresh: refreshed.refresh.or(current.refresh),
                })?;
                tracing::info!("Access token refreshed");
                Ok(refreshed.access)
            }
            Err(e @ ClientError::Transport(_)) => {
                tracing::warn!("Token refresh could not reach the backend: {}", e);
                Err(e)
            }
            Err(e) => {
                tracing::warn!("Token refresh failed, clearing session: {}", e);
                self.store.clear()?;
                Err(ClientError::SessionInvalid)
            }
        }
    }
}

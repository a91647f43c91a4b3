use std::sync::RwLock;

use super::{CredentialStore, Credentials};
use crate::errors::ClientError;

/// Process-local credential store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Credentials>,
}

impl MemoryStore {
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(credentials),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Credentials, ClientError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| anyhow::anyhow!("credential store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| anyhow::anyhow!("credential store lock poisoned"))?;
        *guard = credentials.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.save(&Credentials::default())
    }
}

use std::fmt;

use anyhow::{bail, Result};
use tracing::debug;

use super::store::{FileTokenStore, KeyringTokenStore, TokenStore};
use crate::config::{Config, TokenStorage};

/// Whether a bearer token is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Anonymous,
}

/// Single source of truth for the bearer token.
///
/// Holds at most one token. The in-memory copy mirrors the backing store:
/// `store` and `clear` change it only after the store accepted the change.
pub struct Session {
    store: Box<dyn TokenStore>,
    token: Option<String>,
}

impl Session {
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self { store, token: None }
    }

    /// Build a session over the storage backend chosen in the config
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: Box<dyn TokenStore> = match config.token_storage {
            TokenStorage::File => Box::new(FileTokenStore::new(config.data_dir()?)),
            TokenStorage::Keyring => Box::new(KeyringTokenStore),
        };
        Ok(Self::new(store))
    }

    /// Read the persisted token. Called once at startup to pick the initial
    /// mode; makes no network call.
    pub fn load(&mut self) -> Result<Option<String>> {
        self.token = self.store.read()?;
        debug!(state = ?self.state(), "Session loaded");
        Ok(self.token.clone())
    }

    /// Persist a token from a successful login, replacing any prior one.
    /// Blank tokens are refused so a restart reads back the same state.
    pub fn store(&mut self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            bail!("Refusing to store an empty token");
        }
        self.store.write(token)?;
        self.token = Some(token.to_string());
        debug!("Session token stored");
        Ok(())
    }

    /// Drop the token unconditionally. Safe to call when already anonymous.
    /// If the store cannot be emptied the session stays authenticated.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove()?;
        self.token = None;
        debug!("Session cleared");
        Ok(())
    }

    /// Get the bearer token if one is held
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

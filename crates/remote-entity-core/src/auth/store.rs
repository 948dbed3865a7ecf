//! Single-slot storage backends for the bearer token.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use keyring::Entry;

/// Keychain service name
const SERVICE_NAME: &str = "remote-entity";

/// Keychain account / file name the token is kept under
const TOKEN_KEY: &str = "token";

/// A durable slot holding at most one bearer token.
///
/// Implementations overwrite on `write` and treat `remove` of an empty slot
/// as success.
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, `None` if the slot is empty
    fn read(&self) -> Result<Option<String>>;

    /// Persist the token, replacing any prior value
    fn write(&self, token: &str) -> Result<()>;

    /// Empty the slot
    fn remove(&self) -> Result<()>;
}

/// Token kept as plain text in `<dir>/token`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file {}", self.path.display()))?;
        // Returned byte-for-byte; a blank file is an empty slot
        if contents.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(contents))
        }
    }

    fn write(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token file {}", self.path.display()))?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to delete token file {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Token kept in the OS keychain.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_KEY).context("Failed to create keyring entry")
    }
}

impl TokenStore for KeyringTokenStore {
    fn read(&self) -> Result<Option<String>> {
        match Self::entry()?.get_password() {
            Ok(token) if token.trim().is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    fn write(&self, token: &str) -> Result<()> {
        Self::entry()?
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn remove(&self) -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

/// Process-local slot. Clones share the same slot, so a clone handed to a
/// second `Session` behaves like durable storage across restarts.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.to_string()))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| anyhow::anyhow!("Token slot lock poisoned"))
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn write(&self, token: &str) -> Result<()> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

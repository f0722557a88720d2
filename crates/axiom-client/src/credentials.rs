//! Narrow credential storage interface. The protocol core never touches storage.

use std::collections::HashMap;
use std::sync::Mutex;

use axiom_core::ApiKey;
use thiserror::Error;

/// Errors from a credential backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Account name was empty.
    #[error("account name must not be empty")]
    EmptyAccount,
    /// Backend could not be reached or is in a bad state.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Stores API keys by account, e.g. backed by a platform keychain.
pub trait CredentialStore: Send + Sync {
    /// Stores (or replaces) the key for `account`.
    fn store(&self, account: &str, key: ApiKey) -> Result<(), CredentialError>;
    /// Loads the key for `account`, if any.
    fn load(&self, account: &str) -> Result<Option<ApiKey>, CredentialError>;
    /// Deletes the key for `account`. Deleting a missing key is not an error.
    fn delete(&self, account: &str) -> Result<(), CredentialError>;
}

/// Process-local [`CredentialStore`].
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    keys: Mutex<HashMap<String, ApiKey>>,
}

impl InMemoryCredentialStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_account(account: &str) -> Result<(), CredentialError> {
    if account.is_empty() {
        return Err(CredentialError::EmptyAccount);
    }
    Ok(())
}

impl CredentialStore for InMemoryCredentialStore {
    fn store(&self, account: &str, key: ApiKey) -> Result<(), CredentialError> {
        check_account(account)?;
        let mut keys = self
            .keys
            .lock()
            .map_err(|e| CredentialError::Unavailable(e.to_string()))?;
        keys.insert(account.to_string(), key);
        Ok(())
    }

    fn load(&self, account: &str) -> Result<Option<ApiKey>, CredentialError> {
        check_account(account)?;
        let keys = self
            .keys
            .lock()
            .map_err(|e| CredentialError::Unavailable(e.to_string()))?;
        Ok(keys.get(account).cloned())
    }

    fn delete(&self, account: &str) -> Result<(), CredentialError> {
        check_account(account)?;
        let mut keys = self
            .keys
            .lock()
            .map_err(|e| CredentialError::Unavailable(e.to_string()))?;
        keys.remove(account);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_load_delete() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.load("alice").unwrap(), None);

        store.store("alice", ApiKey::new("k1")).unwrap();
        assert_eq!(store.load("alice").unwrap(), Some(ApiKey::new("k1")));

        store.store("alice", ApiKey::new("k2")).unwrap();
        assert_eq!(store.load("alice").unwrap(), Some(ApiKey::new("k2")));

        store.delete("alice").unwrap();
        assert_eq!(store.load("alice").unwrap(), None);
        store.delete("alice").unwrap();
    }

    #[test]
    fn empty_account_is_rejected() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(
            store.store("", ApiKey::new("k")),
            Err(CredentialError::EmptyAccount)
        );
    }
}

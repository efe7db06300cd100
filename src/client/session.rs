//! Persisted login state.
//!
//! The session lives behind a small key-value boundary with two keys,
//! `token` and `user`, so the same logic runs against a JSON file on disk
//! or an in-memory map in tests.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ClientError;
use crate::auth::AuthResponse;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        (**self).remove(key)
    }
}

/// A JSON object on disk, rewritten on every change.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, ClientError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, ClientError> {
        self.entries
            .lock()
            .map_err(|_| ClientError::Session("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Who is logged in: the auth response without its token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub email: String,
    pub first_name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl From<&AuthResponse> for Identity {
    fn from(response: &AuthResponse) -> Self {
        Self {
            email: response.email.clone(),
            first_name: response.first_name.clone(),
            expires_at: response.expires_at,
        }
    }
}

pub struct Session<S: KeyValueStore> {
    store: S,
    token: Option<String>,
    identity: Option<Identity>,
}

impl<S: KeyValueStore> Session<S> {
    /// Restores whatever the store holds. An unreadable `user` entry is
    /// dropped rather than failing the load.
    pub fn load(store: S) -> Result<Self, ClientError> {
        let token = store.get(TOKEN_KEY)?;
        let identity = match store.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    log::warn!("ignoring unreadable stored user: {}", e);
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            store,
            token,
            identity,
        })
    }

    pub fn save(&mut self, response: &AuthResponse) -> Result<(), ClientError> {
        let identity = Identity::from(response);
        self.store.set(TOKEN_KEY, &response.token)?;
        self.store.set(USER_KEY, &serde_json::to_string(&identity)?)?;
        self.token = Some(response.token.clone());
        self.identity = Some(identity);
        Ok(())
    }

    /// Logging out is local only; the token stays valid until it expires.
    pub fn clear(&mut self) -> Result<(), ClientError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        self.token = None;
        self.identity = None;
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

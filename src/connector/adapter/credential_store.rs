use std::sync::{Arc, RwLock};

const PRIMARY_ENV_KEY: &str = "GEMINI_API_KEY";
const FALLBACK_ENV_KEY: &str = "API_KEY";

/// The API key currently in effect, shared between the topic generator (which
/// reads it on every call) and the credential selector (which replaces it).
#[derive(Clone, Default)]
pub struct CredentialStore {
    key: Arc<RwLock<Option<String>>>,
}

impl CredentialStore {
    pub fn new(key: Option<String>) -> Self {
        let store = Self::default();
        if let Some(key) = key {
            store.replace(key);
        }
        store
    }

    /// Seeds the store from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> Self {
        let key = std::env::var(PRIMARY_ENV_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(FALLBACK_ENV_KEY).ok());
        Self::new(key)
    }

    pub fn current(&self) -> Option<String> {
        self.key
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Stores a new key. Blank input clears the store.
    pub fn replace(&self, key: impl Into<String>) {
        let key = key.into().trim().to_string();
        let mut slot = self
            .key
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = if key.is_empty() { None } else { Some(key) };
    }

    pub fn clear(&self) {
        let mut slot = self
            .key
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }

    pub fn is_configured(&self) -> bool {
        self.current().is_some()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("configured", &self.is_configured())
            .finish()
    }
}

use std::fs::{create_dir_all, read_to_string, remove_file, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use log::warn;
use serde::{Deserialize, Serialize};

/// The access/refresh token pair issued by the backend. Mutated only by a
/// successful login or refresh; cleared on logout or terminal refresh
/// failure. Token contents are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Synchronous persistence for the token pair. Everything else in the crate
/// goes through this trait; nothing writes tokens directly.
pub trait TokenStore: Send + Sync {
    fn save(&self, access: &str, refresh: &str);
    fn access(&self) -> Option<String>;
    fn refresh(&self) -> Option<String>;
    fn clear(&self);
}

/// In-memory store, used in tests and by hosts that keep sessions ephemeral.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    pair: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, access: &str, refresh: &str) {
        let mut pair = self.pair.lock().unwrap_or_else(|e| e.into_inner());
        *pair = Some(TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        });
    }

    fn access(&self) -> Option<String> {
        let pair = self.pair.lock().unwrap_or_else(|e| e.into_inner());
        pair.as_ref().map(|p| p.access_token.clone())
    }

    fn refresh(&self) -> Option<String> {
        let pair = self.pair.lock().unwrap_or_else(|e| e.into_inner());
        pair.as_ref().map(|p| p.refresh_token.clone())
    }

    fn clear(&self) {
        let mut pair = self.pair.lock().unwrap_or_else(|e| e.into_inner());
        *pair = None;
    }
}

/// File-backed store: one JSON file in the app data dir. A missing or
/// unparseable file reads as "no tokens".
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        FileTokenStore { path }
    }

    /// Default location under the platform data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitadmin")
            .join("tokens.json")
    }

    /// Honors the `token_file` override from the config when present.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let path = config
            .token_file
            .clone()
            .unwrap_or_else(Self::default_path);
        FileTokenStore::new(path)
    }

    fn read_pair(&self) -> Option<TokenPair> {
        let content = read_to_string(&self.path).ok()?;
        serde_json::from_str::<TokenPair>(&content).ok()
    }

    fn write_pair(&self, pair: &TokenPair) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = create_dir_all(parent) {
                warn!("Failed to create token dir {parent:?}: {e}");
                return;
            }
        }
        let serialized = match serde_json::to_string(pair) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize token pair: {e}");
                return;
            }
        };
        let result = File::create(&self.path).and_then(|mut f| f.write_all(serialized.as_bytes()));
        if let Err(e) = result {
            warn!("Failed to write token file {:?}: {e}", self.path);
        }
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, access: &str, refresh: &str) {
        self.write_pair(&TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        });
    }

    fn access(&self) -> Option<String> {
        self.read_pair().map(|p| p.access_token)
    }

    fn refresh(&self) -> Option<String> {
        self.read_pair().map(|p| p.refresh_token)
    }

    fn clear(&self) {
        if self.path.exists() {
            let _ = remove_file(&self.path);
        }
    }
}

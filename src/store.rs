// Preference persistence. The theme manager only needs a tiny key-value
// store; the real one is a JSON file in the user's home directory, next to
// where a CLI would persist a session token.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

const PREFS_FILE: &str = ".termfolio_prefs.json";

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store backed by a JSON object on disk. The whole object is rewritten on
/// every `set`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        FileStore { path }
    }

    /// `~/.termfolio_prefs.json`, or the current directory when there is no home.
    pub fn in_home_dir() -> Self {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        FileStore::new(dir.join(PREFS_FILE))
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let map = serde_json::from_str(&data)
            .with_context(|| format!("Parsing preferences in {}", self.path.display()))?;
        Ok(map)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut map) => map.remove(key),
            Err(e) => {
                log::warn!("event=prefs_read status=error error={e:#}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking the write.
        let mut map = self.load().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
        let data = serde_json::to_string_pretty(&map)?;
        std::fs::write(&self.path, data)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Process-local store, used by tests and as a fallback.
#[derive(Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

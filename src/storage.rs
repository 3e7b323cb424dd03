use crate::errors::SurveyError;
use std::{collections::BTreeMap, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error};

/// String-keyed persistent slots, the client's local storage.
#[allow(async_fn_in_trait)]
pub trait Storage {
    /// Missing and unreadable slots both read as `None`.
    async fn get_item(&self, key: &str) -> Option<String>;

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), SurveyError>;
}

type Slots = BTreeMap<String, String>;

/// Slots kept as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory of the storage file if needed.
    pub async fn prepare(&self) -> Result<(), SurveyError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn load_slots(&self) -> Slots {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(slots) => slots,
                Err(err) => {
                    error!("failed to parse storage file: {err}");
                    Slots::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Slots::default(),
            Err(err) => {
                error!("failed to read storage file: {err}");
                Slots::default()
            }
        }
    }
}

impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Option<String> {
        self.load_slots().await.remove(key)
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), SurveyError> {
        let mut slots = self.load_slots().await;
        slots.insert(key.to_string(), value.to_string());

        let payload = serde_json::to_vec_pretty(&slots)?;
        fs::write(&self.path, payload).await?;
        debug!(key, path = %self.path.display(), "storage slot written");
        Ok(())
    }
}

/// Storage that lives for the lifetime of the value. Counts writes so callers
/// can check how often a slot was touched.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Slots,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut slots = Slots::new();
        slots.insert(key.to_string(), value.to_string());
        Self { slots, writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn item(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), SurveyError> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use app_core::platform::{KeyValueStore, StorageError};
use async_trait::async_trait;

/// Key/value pairs kept as one JSON object on disk.
///
/// Writes go to a uniquely named sibling temp file which is then renamed
/// over the target, so a crash mid-write never leaves a truncated file
/// behind. Read-modify-write cycles are serialized per store.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::Unavailable(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StorageError::Operation(format!("corrupt store {}: {}", self.path.display(), e))
        })
    }

    async fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::Unavailable(format!("{}: {}", dir.display(), e)))?;

        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StorageError::Operation(e.to_string()))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&dir, &path, json.as_bytes()))
            .await
            .map_err(|e| StorageError::Operation(format!("write task failed: {}", e)))?
    }
}

fn replace_file(dir: &Path, path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| StorageError::Operation(format!("{}: {}", dir.display(), e)))?;
    tmp.write_all(contents)
        .map_err(|e| StorageError::Operation(format!("{}: {}", tmp.path().display(), e)))?;
    tmp.persist(path)
        .map_err(|e| StorageError::Operation(format!("{}: {}", path.display(), e.error)))?;
    Ok(())
}

#[async_trait(?Send)]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        // A corrupt file is reported rather than silently replaced
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values).await?;
        tracing::debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }
}

use app_core::platform::{KeyValueStore, StorageError};
use async_trait::async_trait;
use web_sys::window;

/// `window.localStorage` as a [`KeyValueStore`].
pub struct LocalStorageStore;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
}

#[async_trait(?Send)]
impl KeyValueStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }
}

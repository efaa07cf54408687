//! Capabilities a host injects into the core.
//!
//! Everything here is single-threaded: futures are `?Send` and callbacks are
//! plain `Fn`, matching a browser event loop or a tokio `LocalSet`.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

use crate::subscription::Subscription;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Persistent string key/value storage (localStorage, a JSON file, ...).
#[async_trait(?Send)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// OS-level light/dark signal.
pub trait AppearanceSource {
    /// Current OS preference.
    fn is_dark(&self) -> bool;

    /// Register for changes. The callback receives the new "is dark" value;
    /// dropping the returned guard must stop further calls.
    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription;
}

/// Runs fire-and-forget work on the host's local executor.
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A user-facing message (alert, toast, inline banner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Leave the app (OAuth authorization page).
    External(String),
    /// In-app route, e.g. the post-auth callback.
    Route(String),
}

/// Presents notices and performs navigation for a screen.
pub trait Presenter {
    fn alert(&self, notice: &Notice);
    fn navigate(&self, to: &Navigation);
}

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use contracts::enums::theme_mode::{InvalidModeError, ThemeMode};
use contracts::shared::theme::{ThemePreferenceState, THEME_STORAGE_KEY};
use futures::lock::Mutex;
use futures::FutureExt;

use crate::platform::{AppearanceSource, KeyValueStore, Spawner};
use crate::subscription::{Observers, Subscription};

/// Theme preference store.
///
/// Holds the user's [`ThemeMode`] and the appearance it resolves to, restores
/// and persists the mode through a [`KeyValueStore`], and follows the OS
/// signal while the mode is [`ThemeMode::System`].
///
/// Cloning yields another handle to the same store. Hosts construct one at
/// start-up and hand it down (Leptos context, CLI state); there is no global.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<Inner>,
}

struct Inner {
    state: Cell<ThemePreferenceState>,
    /// Bumped by every explicit `set_mode`, so a slow initial load never
    /// overwrites a choice the user already made. Shared with pending writes.
    revision: Rc<Cell<u64>>,
    /// Held by the persistence task currently talking to storage.
    write_lock: Rc<Mutex<()>>,
    /// Last value reported by the OS signal.
    os_dark: Cell<bool>,
    storage: Rc<dyn KeyValueStore>,
    appearance: Rc<dyn AppearanceSource>,
    spawner: Rc<dyn Spawner>,
    os_subscription: RefCell<Option<Subscription>>,
    observers: Observers<ThemePreferenceState>,
}

impl ThemeStore {
    /// Creates the store in `System` mode. Call [`ThemeStore::initialize`]
    /// right after to restore the persisted choice.
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        appearance: Rc<dyn AppearanceSource>,
        spawner: Rc<dyn Spawner>,
    ) -> Self {
        let os_dark = appearance.is_dark();
        let state = ThemePreferenceState::resolve(ThemeMode::System, os_dark);
        Self {
            inner: Rc::new(Inner {
                state: Cell::new(state),
                revision: Rc::new(Cell::new(0)),
                write_lock: Rc::new(Mutex::new(())),
                os_dark: Cell::new(os_dark),
                storage,
                appearance,
                spawner,
                os_subscription: RefCell::new(None),
                observers: Observers::new(),
            }),
        }
    }

    /// Loads the persisted mode and resolves the initial state.
    ///
    /// Never fails: a missing, invalid or unreadable value falls back to
    /// `System`. A [`ThemeStore::set_mode`] issued after this call but before
    /// the load completes takes precedence over the stored value.
    pub fn initialize(&self) -> impl Future<Output = ThemePreferenceState> + 'static {
        let store = self.clone();
        let revision = self.inner.revision.get();
        async move {
            let loaded = store.load_mode().await;

            if store.inner.revision.get() != revision {
                log::debug!(
                    "Theme set to '{}' while loading, ignoring stored value",
                    store.mode()
                );
                return store.state();
            }

            log::debug!("Restored theme mode '{}'", loaded);
            store.apply(loaded)
        }
    }

    async fn load_mode(&self) -> ThemeMode {
        match self.inner.storage.get(THEME_STORAGE_KEY).await {
            Ok(Some(raw)) => raw.parse::<ThemeMode>().unwrap_or_else(|e| {
                log::warn!("Ignoring stored theme: {}", e);
                ThemeMode::System
            }),
            Ok(None) => ThemeMode::System,
            Err(e) => {
                log::warn!("Failed to load theme: {}", e);
                ThemeMode::System
            }
        }
    }

    /// Switches mode. The in-memory state and observers update before this
    /// returns; the write to storage is spawned and its failure only logged.
    /// Writes reach storage one at a time and the last call wins.
    pub fn set_mode(&self, mode: ThemeMode) -> ThemePreferenceState {
        self.inner.revision.set(self.inner.revision.get() + 1);
        let state = self.apply(mode);
        self.persist(mode);
        state
    }

    /// [`ThemeStore::set_mode`] for untyped input (CLI arguments, storage
    /// values). Leaves the state untouched when `raw` is not a mode.
    pub fn set_mode_str(&self, raw: &str) -> Result<ThemePreferenceState, InvalidModeError> {
        let mode = raw.parse::<ThemeMode>()?;
        Ok(self.set_mode(mode))
    }

    pub fn state(&self) -> ThemePreferenceState {
        self.inner.state.get()
    }

    pub fn mode(&self) -> ThemeMode {
        self.state().mode
    }

    pub fn is_dark(&self) -> bool {
        self.state().is_dark()
    }

    /// Whether the store currently holds an OS appearance subscription.
    pub fn is_following_os(&self) -> bool {
        self.inner.os_subscription.borrow().is_some()
    }

    /// Observers run synchronously, in subscription order, after every
    /// state change.
    pub fn subscribe(&self, observer: impl Fn(&ThemePreferenceState) + 'static) -> Subscription {
        self.inner.observers.subscribe(observer)
    }

    /// Releases the OS subscription and drops all observers.
    pub fn shutdown(&self) {
        let released = self.inner.os_subscription.borrow_mut().take();
        drop(released);
        self.inner.observers.clear();
        log::debug!("Theme store shut down");
    }

    fn apply(&self, mode: ThemeMode) -> ThemePreferenceState {
        self.follow_os(mode == ThemeMode::System);
        let state = ThemePreferenceState::resolve(mode, self.inner.os_dark.get());
        self.inner.state.set(state);
        self.inner.observers.notify(&state);
        state
    }

    fn follow_os(&self, follow: bool) {
        let subscribed = self.is_following_os();
        if follow && !subscribed {
            // Signals only arrive while subscribed, so catch up once here
            self.inner.os_dark.set(self.inner.appearance.is_dark());
            let weak = Rc::downgrade(&self.inner);
            let subscription = self.inner.appearance.subscribe(Box::new(move |is_dark| {
                if let Some(inner) = weak.upgrade() {
                    ThemeStore { inner }.on_os_change(is_dark);
                }
            }));
            *self.inner.os_subscription.borrow_mut() = Some(subscription);
        } else if !follow && subscribed {
            let released = self.inner.os_subscription.borrow_mut().take();
            drop(released);
        }
    }

    fn on_os_change(&self, is_dark: bool) {
        self.inner.os_dark.set(is_dark);
        let current = self.state();
        if current.mode != ThemeMode::System {
            return;
        }
        let next = ThemePreferenceState::resolve(ThemeMode::System, is_dark);
        if next == current {
            return;
        }
        log::debug!("OS appearance changed to {}", next.effective.as_str());
        self.inner.state.set(next);
        self.inner.observers.notify(&next);
    }

    fn persist(&self, mode: ThemeMode) {
        let storage = Rc::clone(&self.inner.storage);
        let revision = Rc::clone(&self.inner.revision);
        let write_lock = Rc::clone(&self.inner.write_lock);
        let written = revision.get();
        let task = async move {
            let _guard = write_lock.lock().await;
            if revision.get() != written {
                log::debug!("Skipping stale theme write '{}'", mode);
                return;
            }
            if let Err(e) = storage.set(THEME_STORAGE_KEY, mode.as_str()).await {
                log::warn!("Failed to save theme '{}': {}", mode, e);
            }
        };
        self.inner.spawner.spawn(task.boxed_local());
    }
}

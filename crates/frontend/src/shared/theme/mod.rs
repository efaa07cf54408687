//! Theme management for the web app.
//!
//! Wraps the shared [`ThemeStore`] in a Leptos context. The mode is persisted
//! in localStorage and `system` follows `prefers-color-scheme`.

mod appearance;
mod storage;
mod theme_select;

use std::rc::Rc;

use app_core::theme::ThemeStore;
use contracts::enums::theme_mode::{EffectiveAppearance, ThemeMode};
use contracts::shared::theme::ThemePreferenceState;
use futures::FutureExt;
use leptos::prelude::*;
use web_sys::window;

use crate::shared::spawner::LocalSpawner;

pub use appearance::MediaQueryAppearance;
pub use storage::LocalStorageStore;
pub use theme_select::ThemeSelector;

/// Apply the resolved appearance to the document.
fn apply_theme(appearance: EffectiveAppearance) {
    let document = match window().and_then(|w| w.document()) {
        Some(doc) => doc,
        None => return,
    };

    // Tailwind-style `dark` class on <html> for CSS variables
    if let Some(root) = document.document_element() {
        let _ = root
            .class_list()
            .toggle_with_force("dark", appearance.is_dark());
    }

    // Also set data-theme attribute on body for additional styling hooks
    if let Some(body) = document.body() {
        let _ = body.set_attribute("data-theme", appearance.as_str());
    }
}

/// Theme context type.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    /// Mirrors the store; updated synchronously on every transition.
    pub state: RwSignal<ThemePreferenceState>,
    store: StoredValue<ThemeStore, LocalStorage>,
}

impl ThemeContext {
    pub fn mode(&self) -> ThemeMode {
        self.state.get().mode
    }

    pub fn is_dark(&self) -> bool {
        self.state.get().is_dark()
    }

    /// Run `f` against the underlying store.
    pub fn with_store<R>(&self, f: impl FnOnce(&ThemeStore) -> R) -> R {
        self.store.with_value(f)
    }
}

/// Provides theme context to children components.
#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let store = ThemeStore::new(
        Rc::new(LocalStorageStore),
        Rc::new(MediaQueryAppearance),
        Rc::new(LocalSpawner),
    );

    let state = RwSignal::new(store.state());
    store
        .subscribe(move |s| {
            apply_theme(s.effective);
            state.set(*s);
        })
        .detach();
    apply_theme(store.state().effective);

    // localStorage answers synchronously, so this normally resolves before
    // the first render and the page never flashes the default.
    let mut loading = Box::pin(store.initialize());
    if (&mut loading).now_or_never().is_none() {
        leptos::task::spawn_local(async move {
            loading.await;
        });
    }

    let context = ThemeContext {
        state,
        store: StoredValue::new_local(store),
    };
    provide_context(context);

    on_cleanup(move || {
        let _ = context.store.try_with_value(|store| store.shutdown());
    });

    children()
}

/// Hook to use the theme context.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}

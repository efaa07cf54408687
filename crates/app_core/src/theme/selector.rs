use contracts::enums::theme_mode::{InvalidModeError, ThemeMode};
use contracts::shared::theme::ThemePreferenceState;

use super::store::ThemeStore;

/// One entry of the selector menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeOption {
    pub mode: ThemeMode,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

impl ThemeOption {
    /// The three options, with `current` marked active.
    pub fn all(current: ThemeMode) -> [ThemeOption; 3] {
        ThemeMode::all().map(|mode| ThemeOption {
            mode,
            label: mode.display_name(),
            icon: mode.icon(),
            active: mode == current,
        })
    }
}

/// Open/closed state of the theme popover. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeSelectorState {
    open: bool,
}

impl ThemeSelectorState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Backdrop click, outside click, escape.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Menu entries against the store's current mode.
    pub fn options(&self, store: &ThemeStore) -> [ThemeOption; 3] {
        ThemeOption::all(store.mode())
    }

    /// Applies `mode` and closes the popover.
    pub fn select(&mut self, store: &ThemeStore, mode: ThemeMode) -> ThemePreferenceState {
        let state = store.set_mode(mode);
        self.open = false;
        state
    }

    /// Like [`ThemeSelectorState::select`], but for untyped input. On error
    /// neither the store nor the popover changes.
    pub fn select_str(
        &mut self,
        store: &ThemeStore,
        raw: &str,
    ) -> Result<ThemePreferenceState, InvalidModeError> {
        let state = store.set_mode_str(raw)?;
        self.open = false;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualAppearance, ManualSpawner, MemoryStore};
    use contracts::enums::theme_mode::EffectiveAppearance;
    use std::rc::Rc;

    fn store() -> ThemeStore {
        ThemeStore::new(
            Rc::new(MemoryStore::default()),
            Rc::new(ManualAppearance::new(true)),
            Rc::new(ManualSpawner::default()),
        )
    }

    #[test]
    fn test_toggle_and_dismiss() {
        let mut selector = ThemeSelectorState::default();
        assert!(!selector.is_open());
        selector.toggle();
        assert!(selector.is_open());
        selector.toggle();
        assert!(!selector.is_open());
        selector.open();
        selector.dismiss();
        assert!(!selector.is_open());
    }

    #[test]
    fn test_select_applies_and_closes() {
        let store = store();
        let mut selector = ThemeSelectorState::default();
        selector.open();

        let state = selector.select(&store, ThemeMode::Light);
        assert_eq!(state.effective, EffectiveAppearance::Light);
        assert_eq!(store.mode(), ThemeMode::Light);
        assert!(!selector.is_open());
        assert!(selector.options(&store)[0].active);
    }

    #[test]
    fn test_invalid_selection_keeps_popover_open() {
        let store = store();
        let mut selector = ThemeSelectorState::default();
        selector.open();

        assert!(selector.select_str(&store, "blue").is_err());
        assert!(selector.is_open());
        assert_eq!(store.mode(), ThemeMode::System);
    }

    #[test]
    fn test_options_mark_current_mode() {
        let options = ThemeOption::all(ThemeMode::Dark);
        let active: Vec<_> = options.iter().filter(|o| o.active).map(|o| o.mode).collect();
        assert_eq!(active, vec![ThemeMode::Dark]);
        assert_eq!(options[0].label, "Light");
        assert_eq!(options[2].icon, "⚙️");
    }
}

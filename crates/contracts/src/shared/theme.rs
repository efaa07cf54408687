use serde::{Deserialize, Serialize};

use crate::enums::theme_mode::{EffectiveAppearance, ThemeMode};

/// Key the theme mode is persisted under.
pub const THEME_STORAGE_KEY: &str = "@theme_mode";

/// The user's mode together with the appearance it resolves to.
///
/// `effective` is always `EffectiveAppearance::resolve(mode, <last OS signal>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemePreferenceState {
    pub mode: ThemeMode,
    pub effective: EffectiveAppearance,
}

impl ThemePreferenceState {
    pub fn resolve(mode: ThemeMode, os_is_dark: bool) -> Self {
        Self {
            mode,
            effective: EffectiveAppearance::resolve(mode, os_is_dark),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.effective.is_dark()
    }
}

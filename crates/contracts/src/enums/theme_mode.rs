use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's stated theme preference.
///
/// This is what gets persisted, not what gets rendered; see
/// [`EffectiveAppearance`] for the resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Label shown in the selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ThemeMode::Light => "☀️",
            ThemeMode::Dark => "🌙",
            ThemeMode::System => "⚙️",
        }
    }

    /// All modes, in the order the selector lists them.
    pub fn all() -> [ThemeMode; 3] {
        [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System]
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A theme mode string outside `light`, `dark`, `system`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid theme mode '{0}', expected one of: light, dark, system")]
pub struct InvalidModeError(pub String);

impl FromStr for ThemeMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(InvalidModeError(other.to_string())),
        }
    }
}

/// The appearance actually rendered after resolving [`ThemeMode::System`]
/// against the OS signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveAppearance {
    #[default]
    Light,
    Dark,
}

impl EffectiveAppearance {
    pub fn resolve(mode: ThemeMode, os_is_dark: bool) -> Self {
        match mode {
            ThemeMode::Light => EffectiveAppearance::Light,
            ThemeMode::Dark => EffectiveAppearance::Dark,
            ThemeMode::System => Self::from_is_dark(os_is_dark),
        }
    }

    pub fn from_is_dark(is_dark: bool) -> Self {
        if is_dark {
            EffectiveAppearance::Dark
        } else {
            EffectiveAppearance::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, EffectiveAppearance::Dark)
    }

    /// Used as the `data-theme` attribute and CSS class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveAppearance::Light => "light",
            EffectiveAppearance::Dark => "dark",
        }
    }
}

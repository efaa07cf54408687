//! Theme preference: the store and the selector that drives it.

mod selector;
mod store;

pub use selector::{ThemeOption, ThemeSelectorState};
pub use store::ThemeStore;

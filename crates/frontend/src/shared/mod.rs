pub mod api_utils;
pub mod spawner;
pub mod theme;

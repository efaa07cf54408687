pub mod auth_mode;
pub mod social_provider;
pub mod theme_mode;

pub mod auth_screen;
pub mod dashboard;

pub mod auth;
pub mod tracing;

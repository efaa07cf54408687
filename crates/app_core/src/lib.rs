//! Platform-neutral state machines behind the auth screen and theme toggle.
//!
//! Hosts (the Leptos web app, the native CLI) supply the ports in
//! [`platform`] and [`auth::client`] and render [`auth::AuthScreenView`].

pub mod auth;
pub mod platform;
pub mod subscription;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

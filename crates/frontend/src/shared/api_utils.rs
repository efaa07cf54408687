//! API utilities for talking to the auth service
//!
//! The auth service is mounted on the same origin as the app.

/// Get the base URL for API requests
///
/// # Returns
/// - Page origin like "http://localhost:3000"
/// - Empty string if window is not available (requests become relative)
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/auth/get-session");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
